use crate::field::FieldType;
use crate::slot::SettingField;

/// Declaration of a single setting.
///
/// Produced by `#[derive(Settings)]` or the engine's manifest, consumed when
/// applying or collecting whole settings groups.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDefinition {
    /// Storage key of the setting.
    pub name: String,

    /// Declared type of the field behind it.
    pub field_type: FieldType,

    /// Registry identifier of a custom serializer, if any.
    pub serializer: Option<String>,

    /// Serialized default, run through the same conversion chain as stored
    /// values when no stored value exists.
    pub default: Option<String>,

    pub description: String,
}

/// A struct whose fields are settings.
///
/// `definitions()` and `fields()` enumerate in declaration order; the engine
/// relies on the two lists lining up index-for-index.
pub trait SettingsGroup {
    fn definitions() -> Vec<SettingDefinition>
    where
        Self: Sized;

    fn fields(&mut self) -> Vec<Box<dyn SettingField + '_>>;
}
