pub mod definition;
pub mod error;
pub mod field;
pub mod serializer;
pub mod slot;
pub mod temporal;
pub mod value;

pub use setra_api_derive::Settings;

pub use definition::{SettingDefinition, SettingsGroup};
pub use error::{ErrorKind, SerializerError};
pub use field::{EnumMember, EnumSpec, FieldType};
pub use serializer::SettingSerializer;
pub use slot::{SettingField, SettingType, TypedSlot};
pub use value::SettingValue;
