use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a setting field — the closed set of conversion
/// strategies the engine dispatches on.
///
/// The engine never inspects runtime types; everything it needs to know
/// about a field is in this tag.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    /// Duration under the `[-][d.]hh:mm:ss[.fffffff]` grammar.
    Duration,
    /// Point in time, RFC 3339 with explicit offset.
    Instant,
    Enum(EnumSpec),
    /// A value that may be absent. Absence is distinct from any inner value
    /// and is the empty string on the wire.
    Optional(Box<FieldType>),
    /// A type outside the built-in chain. Conversion, if any, comes from a
    /// fallback converter registered under `name`.
    Opaque { name: String },
}

impl FieldType {
    /// Strip one optional wrapper, if present.
    pub fn unwrap_optional(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner,
            other => other,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => f.write_str("bool"),
            FieldType::Int => f.write_str("int"),
            FieldType::UInt => f.write_str("uint"),
            FieldType::Float => f.write_str("float"),
            FieldType::Str => f.write_str("string"),
            FieldType::Duration => f.write_str("duration"),
            FieldType::Instant => f.write_str("instant"),
            FieldType::Enum(spec) => write!(f, "enum {}", spec.name),
            FieldType::Optional(inner) => write!(f, "optional {inner}"),
            FieldType::Opaque { name } => f.write_str(name),
        }
    }
}

/// Enumerated type descriptor: a fixed set of named members, each backed by
/// an integer code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumSpec {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub code: i32,
}

impl EnumSpec {
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self { name: name.into(), members }
    }

    /// Member with the given underlying code.
    pub fn by_code(&self, code: i32) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.code == code)
    }

    /// Case-insensitive symbolic lookup.
    pub fn by_name(&self, symbol: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name.eq_ignore_ascii_case(symbol))
    }
}

impl EnumMember {
    pub fn new(name: impl Into<String>, code: i32) -> Self {
        Self { name: name.into(), code }
    }
}
