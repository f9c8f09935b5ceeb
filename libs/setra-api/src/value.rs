use chrono::{DateTime, FixedOffset, TimeDelta};

/// Runtime value of a single setting field.
///
/// Strategy by kind:
/// - Scalars (Bool, Int, UInt, Float): owned, conversion cost ~0
/// - Str: owned, the portable form is already a string
/// - Duration, Instant: chrono types; canonical wire grammar in [`crate::temporal`]
/// - Enum: underlying code only — names live in the declaring
///   [`EnumSpec`](crate::field::EnumSpec)
/// - Absent: the empty state of an optional field, distinct from any value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Signed duration, 100 ns wire resolution.
    Duration(TimeDelta),
    /// Point in time with explicit UTC offset.
    Instant(DateTime<FixedOffset>),
    /// Enum member by underlying code. The code need not be defined in the
    /// declaring spec; undefined codes are carried as-is.
    Enum { spec: String, code: i32 },
    /// No value — the empty state of an optional field.
    Absent,
}

impl SettingValue {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::UInt(_) => "uint",
            SettingValue::Float(_) => "float",
            SettingValue::Str(_) => "string",
            SettingValue::Duration(_) => "duration",
            SettingValue::Instant(_) => "instant",
            SettingValue::Enum { .. } => "enum",
            SettingValue::Absent => "absent",
        }
    }

    /// Whether this is the empty state of an optional field.
    pub fn is_absent(&self) -> bool {
        matches!(self, SettingValue::Absent)
    }
}
