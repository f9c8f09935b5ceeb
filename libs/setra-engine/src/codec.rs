use std::sync::{Arc, OnceLock};

use regex::Regex;

use setra_api::field::FieldType;
use setra_api::slot::SettingField;
use setra_api::temporal;
use setra_api::value::SettingValue;

use crate::boolean::normalize_boolean;
use crate::error::CodecError;
use crate::fallback::FallbackRegistry;
use crate::registry::SerializerRegistry;
use crate::report::{ConversionReporter, LogReporter};

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").expect("digit pattern is valid"))
}

/// The conversion engine: typed setting values ↔ portable strings.
///
/// Both directions are stateless single-pass decision chains over the
/// declared type; the registries are only consulted, never mutated, and a
/// named serializer is re-resolved on every call. Concurrent use needs no
/// coordination.
pub struct ValueCodec {
    serializers: Arc<SerializerRegistry>,
    fallbacks: Arc<FallbackRegistry>,
    reporter: Arc<dyn ConversionReporter>,
}

impl std::fmt::Debug for ValueCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueCodec")
            .field("serializers", &self.serializers)
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}

impl ValueCodec {
    pub fn new(serializers: Arc<SerializerRegistry>) -> Self {
        Self {
            serializers,
            fallbacks: Arc::new(FallbackRegistry::new()),
            reporter: Arc::new(LogReporter),
        }
    }

    /// Replace the fallback-converter registry.
    pub fn with_fallbacks(mut self, fallbacks: Arc<FallbackRegistry>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Replace the reporter that receives swallowed conversion failures.
    pub fn with_reporter(mut self, reporter: Arc<dyn ConversionReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Deserialize `raw` into the field and assign the result.
    ///
    /// The field is left at its prior value when the chain decides to keep
    /// it (unknown enum symbol, validated fallback conversion).
    pub fn deserialize_field(
        &self,
        field: &mut dyn SettingField,
        raw: &str,
        serializer: Option<&str>,
    ) -> Result<(), CodecError> {
        let name = field.name().to_string();
        let declared = field.declared().clone();
        match self.deserialize_value(&declared, raw, serializer, &name)? {
            Some(value) => field
                .assign(value)
                .map_err(|e| CodecError::conversion(raw, &name, &declared, e.to_string())),
            None => Ok(()),
        }
    }

    /// Deserialize `raw` into a value of the declared type.
    ///
    /// `Ok(None)` means the field keeps its prior value. `field` names the
    /// slot for diagnostics only.
    pub fn deserialize_value(
        &self,
        declared: &FieldType,
        raw: &str,
        serializer: Option<&str>,
        field: &str,
    ) -> Result<Option<SettingValue>, CodecError> {
        // Optional wrapper: empty input is the explicit no-value state;
        // anything else converts against the inner type.
        let target = match declared {
            FieldType::Optional(inner) => {
                if raw.is_empty() {
                    return Ok(Some(SettingValue::Absent));
                }
                inner.as_ref()
            }
            other => other,
        };

        // String-typed fields take the stored form as-is, before any
        // serializer gets a say. Serialization is not symmetric here: it
        // still consults the serializer first.
        if matches!(target, FieldType::Str) {
            return Ok(Some(SettingValue::Str(raw.to_string())));
        }

        // Custom serializer, resolved by name at call time. An unknown
        // identifier is not an error; conversion falls through to the
        // built-in rules below.
        if let Some(id) = serializer.filter(|id| !id.is_empty()) {
            match self.serializers.resolve(id) {
                Some(s) => {
                    let value = s
                        .deserialize(raw, target)
                        .map_err(|e| CodecError::conversion(raw, field, declared, e.to_string()))?;
                    return Ok(Some(value));
                }
                None => {
                    let fallthrough = CodecError::UnresolvedSerializer { id: id.to_string() };
                    tracing::debug!(field, error = %fallthrough, "using built-in conversion");
                }
            }
        }

        // Enumerated types: digits carry the underlying code, anything else
        // is a symbolic name. A code is assigned even when no member defines
        // it; an unknown symbol keeps the prior value and goes to the
        // reporter.
        if let FieldType::Enum(spec) = target {
            if digits_re().is_match(raw) {
                let code: i32 = raw
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        CodecError::conversion(raw, field, declared, e.to_string())
                    })?;
                return Ok(Some(SettingValue::Enum { spec: spec.name.clone(), code }));
            }
            return match spec.by_name(raw) {
                Some(member) => Ok(Some(SettingValue::Enum {
                    spec: spec.name.clone(),
                    code: member.code,
                })),
                None => {
                    self.reporter.report(&CodecError::EnumSymbolMismatch {
                        field: field.to_string(),
                        enum_name: spec.name.clone(),
                        symbol: raw.to_string(),
                    });
                    Ok(None)
                }
            };
        }

        // Temporal grammars. A parse failure is not fatal by itself: the
        // rule is skipped and the chain continues.
        if matches!(target, FieldType::Duration) {
            if let Some(delta) = temporal::parse_duration(raw) {
                return Ok(Some(SettingValue::Duration(delta)));
            }
        }
        if matches!(target, FieldType::Instant) {
            if let Some(instant) = temporal::parse_instant(raw) {
                return Ok(Some(SettingValue::Instant(instant)));
            }
        }

        // Culture-invariant conversion for the remaining convertible
        // scalars; booleans are normalized first.
        match target {
            FieldType::Bool => {
                let token = normalize_boolean(target, raw);
                let token = token.trim();
                if token.eq_ignore_ascii_case("true") {
                    return Ok(Some(SettingValue::Bool(true)));
                }
                if token.eq_ignore_ascii_case("false") {
                    return Ok(Some(SettingValue::Bool(false)));
                }
                return Err(CodecError::conversion(raw, field, declared, "not a boolean token"));
            }
            FieldType::Int => {
                return raw
                    .trim()
                    .parse::<i64>()
                    .map(|v| Some(SettingValue::Int(v)))
                    .map_err(|e| CodecError::conversion(raw, field, declared, e.to_string()));
            }
            FieldType::UInt => {
                return raw
                    .trim()
                    .parse::<u64>()
                    .map(|v| Some(SettingValue::UInt(v)))
                    .map_err(|e| CodecError::conversion(raw, field, declared, e.to_string()));
            }
            FieldType::Float => {
                return raw
                    .trim()
                    .parse::<f64>()
                    .map(|v| Some(SettingValue::Float(v)))
                    .map_err(|e| CodecError::conversion(raw, field, declared, e.to_string()));
            }
            _ => {}
        }

        // Last resort: a registered fallback converter for an opaque type.
        // The conversion runs for validation but the result is not assigned;
        // the field keeps its prior value.
        if let FieldType::Opaque { name } = target {
            if let Some(converter) = self.fallbacks.resolve(name) {
                if converter.is_valid(raw) {
                    converter
                        .convert(raw)
                        .map_err(|e| CodecError::conversion(raw, field, declared, e.to_string()))?;
                    return Ok(None);
                }
            }
        }

        Err(CodecError::conversion(raw, field, declared, "no applicable conversion strategy"))
    }

    /// Serialize the field's current value to its stored form.
    pub fn serialize_field(
        &self,
        field: &dyn SettingField,
        serializer: Option<&str>,
    ) -> Result<String, CodecError> {
        let value = field.current();
        self.serialize_value(&value, field.declared(), serializer)
    }

    /// Serialize a value of the declared type to its stored form.
    ///
    /// A named serializer is consulted first; it may decline (or be
    /// unregistered), in which case the canonical stringification applies.
    /// The result is never null: absence serializes as the empty string.
    pub fn serialize_value(
        &self,
        value: &SettingValue,
        declared: &FieldType,
        serializer: Option<&str>,
    ) -> Result<String, CodecError> {
        if let Some(id) = serializer.filter(|id| !id.is_empty()) {
            match self.serializers.resolve(id) {
                Some(s) => {
                    if let Some(out) = s.serialize(value, declared).map_err(|e| {
                        CodecError::Serializer { id: id.to_string(), source: e }
                    })? {
                        return Ok(out);
                    }
                }
                None => {
                    let fallthrough = CodecError::UnresolvedSerializer { id: id.to_string() };
                    tracing::debug!(error = %fallthrough, "using canonical stringification");
                }
            }
        }
        Ok(canonical(value, declared))
    }
}

/// Canonical stringification: the built-in round-trip encoding per kind.
fn canonical(value: &SettingValue, declared: &FieldType) -> String {
    let declared = declared.unwrap_optional();
    match value {
        SettingValue::Instant(t) => temporal::format_instant(t),
        SettingValue::Duration(d) => temporal::format_duration(d),
        SettingValue::Enum { code, .. } => match declared {
            FieldType::Enum(spec) => spec
                .by_code(*code)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| code.to_string()),
            _ => code.to_string(),
        },
        SettingValue::Bool(b) => b.to_string(),
        SettingValue::Int(i) => i.to_string(),
        SettingValue::UInt(u) => u.to_string(),
        SettingValue::Float(f) => f.to_string(),
        SettingValue::Str(s) => s.clone(),
        SettingValue::Absent => String::new(),
    }
}
