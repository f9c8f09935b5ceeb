use crate::error::SerializerError;
use crate::field::FieldType;
use crate::value::SettingValue;

/// Custom string ↔ value conversion, resolved by name through the engine's
/// registry.
///
/// One instance may serve many declared types; the declared type travels
/// with every call. Implementations are registered by the host at startup
/// and invoked synchronously.
pub trait SettingSerializer: Send + Sync {
    /// Serialize `value` of the declared type. `Ok(None)` declines: the
    /// engine falls back to its canonical stringification.
    fn serialize(
        &self,
        value: &SettingValue,
        declared: &FieldType,
    ) -> Result<Option<String>, SerializerError>;

    /// Parse `raw` into a value of the declared type.
    fn deserialize(&self, raw: &str, declared: &FieldType)
    -> Result<SettingValue, SerializerError>;
}
