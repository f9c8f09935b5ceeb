use crate::error::CodecError;

/// Side channel for conversion failures the engine swallows.
///
/// `report` is fire-and-forget: no return value, and implementations must
/// not panic.
pub trait ConversionReporter: Send + Sync {
    fn report(&self, error: &CodecError);
}

/// Default reporter: structured warning through `tracing`.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ConversionReporter for LogReporter {
    fn report(&self, error: &CodecError) {
        tracing::warn!(error = %error, "conversion failure ignored, setting keeps its previous value");
    }
}
