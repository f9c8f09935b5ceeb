use setra_api::error::SerializerError;
use setra_api::field::FieldType;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// No conversion strategy produced a value, or one failed partway.
    /// Fatal to the single call; carries the offending input, the field
    /// name, and the declared type.
    #[error("cannot convert '{value}' to {declared} for setting '{field}': {reason}")]
    Conversion {
        value: String,
        field: String,
        declared: FieldType,
        reason: String,
    },

    /// A serializer failed while producing the stored form.
    #[error("serializer '{id}' failed: {source}")]
    Serializer {
        id: String,
        #[source]
        source: SerializerError,
    },

    /// Symbolic enum parse failed. Never returned to callers: it goes to the
    /// [`ConversionReporter`](crate::report::ConversionReporter) and the
    /// field keeps its prior value.
    #[error("no member named '{symbol}' in enum {enum_name} (setting '{field}')")]
    EnumSymbolMismatch {
        field: String,
        enum_name: String,
        symbol: String,
    },

    /// A serializer identifier resolved to nothing. Never returned to
    /// callers: conversion falls back to the built-in chain.
    #[error("serializer '{id}' is not registered")]
    UnresolvedSerializer { id: String },

    #[error("manifest error: {0}")]
    Manifest(String),
}

impl CodecError {
    /// Conversion failure carrying the offending input, field, and type.
    pub fn conversion(
        value: &str,
        field: &str,
        declared: &FieldType,
        reason: impl Into<String>,
    ) -> Self {
        CodecError::Conversion {
            value: value.to_string(),
            field: field.to_string(),
            declared: declared.clone(),
            reason: reason.into(),
        }
    }
}
