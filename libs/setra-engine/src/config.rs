use serde::Deserialize;

use setra_api::definition::SettingDefinition;
use setra_api::field::{EnumSpec, FieldType};

use crate::error::CodecError;

/// Settings manifest — parsed from TOML.
///
/// Declares the enum specs and settings a host exposes; `definitions()`
/// turns the declarations into typed [`SettingDefinition`]s.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsManifest {
    /// Enum spec declarations, referenced by name from settings.
    #[serde(default)]
    pub enums: Vec<EnumSpec>,

    /// Setting declarations.
    #[serde(default)]
    pub settings: Vec<SettingDecl>,
}

/// Declaration of a single setting in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingDecl {
    pub name: String,

    /// Type tag: `bool`, `int`, `uint`, `float`, `string`, `duration`,
    /// `instant`, `enum`, or any other name for an opaque type.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Name of a declared enum, required for `type = "enum"`.
    #[serde(default, rename = "enum")]
    pub enum_name: Option<String>,

    /// Wrap the type as optional; the empty string then means "no value".
    #[serde(default)]
    pub optional: bool,

    /// Registry identifier of a custom serializer.
    #[serde(default)]
    pub serializer: Option<String>,

    /// Serialized default value.
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl SettingsManifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &str) -> Result<Self, CodecError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Manifest(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, CodecError> {
        toml::from_str(toml_str).map_err(|e| CodecError::Manifest(e.to_string()))
    }

    /// Build setting definitions, resolving enum references.
    pub fn definitions(&self) -> Result<Vec<SettingDefinition>, CodecError> {
        self.settings
            .iter()
            .map(|decl| {
                let base = self.field_type(decl)?;
                let field_type = if decl.optional {
                    FieldType::Optional(Box::new(base))
                } else {
                    base
                };
                Ok(SettingDefinition {
                    name: decl.name.clone(),
                    field_type,
                    serializer: decl.serializer.clone(),
                    default: decl.default.clone(),
                    description: decl.description.clone(),
                })
            })
            .collect()
    }

    fn field_type(&self, decl: &SettingDecl) -> Result<FieldType, CodecError> {
        Ok(match decl.type_name.as_str() {
            "bool" => FieldType::Bool,
            "int" => FieldType::Int,
            "uint" => FieldType::UInt,
            "float" => FieldType::Float,
            "string" => FieldType::Str,
            "duration" => FieldType::Duration,
            "instant" => FieldType::Instant,
            "enum" => {
                let enum_name = decl.enum_name.as_deref().ok_or_else(|| {
                    CodecError::Manifest(format!(
                        "setting '{}': type \"enum\" requires an `enum` key",
                        decl.name
                    ))
                })?;
                let spec = self
                    .enums
                    .iter()
                    .find(|e| e.name == enum_name)
                    .ok_or_else(|| {
                        CodecError::Manifest(format!(
                            "setting '{}': enum '{enum_name}' is not declared",
                            decl.name
                        ))
                    })?;
                FieldType::Enum(spec.clone())
            }
            other => FieldType::Opaque { name: other.to_string() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[enums]]
name = "color"
members = [
    { name = "red", code = 1 },
    { name = "green", code = 2 },
]

[[settings]]
name = "ui.color"
type = "enum"
enum = "color"
default = "green"

[[settings]]
name = "cache.ttl"
type = "duration"
default = "00:05:00"

[[settings]]
name = "page.size"
type = "int"
optional = true

[[settings]]
name = "net.bind"
type = "ipaddr"
serializer = "json"
"#;

    #[test]
    fn parse_and_build_definitions() {
        let manifest = SettingsManifest::parse(MANIFEST).unwrap();
        let defs = manifest.definitions().unwrap();
        assert_eq!(defs.len(), 4);

        assert_eq!(defs[0].name, "ui.color");
        match &defs[0].field_type {
            FieldType::Enum(spec) => {
                assert_eq!(spec.name, "color");
                assert_eq!(spec.members.len(), 2);
            }
            other => panic!("expected enum, got {other:?}"),
        }
        assert_eq!(defs[0].default.as_deref(), Some("green"));

        assert_eq!(defs[1].field_type, FieldType::Duration);
        assert_eq!(
            defs[2].field_type,
            FieldType::Optional(Box::new(FieldType::Int))
        );
        assert_eq!(
            defs[3].field_type,
            FieldType::Opaque { name: "ipaddr".into() }
        );
        assert_eq!(defs[3].serializer.as_deref(), Some("json"));
    }

    #[test]
    fn dangling_enum_reference_is_an_error() {
        let manifest = SettingsManifest::parse(
            r#"
[[settings]]
name = "ui.color"
type = "enum"
enum = "nope"
"#,
        )
        .unwrap();
        let err = manifest.definitions().unwrap_err();
        assert!(matches!(err, CodecError::Manifest(_)));
        assert!(err.to_string().contains("'nope' is not declared"));
    }

    #[test]
    fn enum_without_reference_is_an_error() {
        let manifest = SettingsManifest::parse(
            r#"
[[settings]]
name = "ui.color"
type = "enum"
"#,
        )
        .unwrap();
        assert!(manifest.definitions().is_err());
    }

    #[test]
    fn malformed_toml_is_a_manifest_error() {
        let err = SettingsManifest::parse("settings = 3").unwrap_err();
        assert!(matches!(err, CodecError::Manifest(_)));
    }
}
