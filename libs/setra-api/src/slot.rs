use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::error::SerializerError;
use crate::field::FieldType;
use crate::value::SettingValue;

/// A single named, typed slot on a host entity.
///
/// Constructed by the caller per field-access request; the engine never
/// retains one beyond the call.
pub trait SettingField {
    fn name(&self) -> &str;

    /// Declared type, fixed for the accessor's lifetime.
    fn declared(&self) -> &FieldType;

    /// Current value of the slot.
    fn current(&self) -> SettingValue;

    /// Replace the slot's value. The engine only assigns values matching the
    /// declared type.
    fn assign(&mut self, value: SettingValue) -> Result<(), SerializerError>;
}

/// Compile-time bridge between a Rust field type and the value model.
///
/// Implemented for the scalar, string, temporal, and `Option` shapes a
/// derived settings group may contain. Enumerated fields have no Rust-type
/// counterpart here; they go through [`FieldType::Enum`] accessors built at
/// runtime.
pub trait SettingType: Clone {
    fn field_type() -> FieldType;
    fn into_value(self) -> SettingValue;
    fn from_value(value: SettingValue) -> Result<Self, SerializerError>;
}

impl SettingType for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Bool(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Bool(v) => Ok(v),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl SettingType for i64 {
    fn field_type() -> FieldType {
        FieldType::Int
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Int(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Int(v) => Ok(v),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl SettingType for u64 {
    fn field_type() -> FieldType {
        FieldType::UInt
    }

    fn into_value(self) -> SettingValue {
        SettingValue::UInt(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::UInt(v) => Ok(v),
            other => Err(mismatch("uint", &other)),
        }
    }
}

impl SettingType for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Float(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Float(v) => Ok(v),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl SettingType for String {
    fn field_type() -> FieldType {
        FieldType::Str
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Str(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Str(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl SettingType for TimeDelta {
    fn field_type() -> FieldType {
        FieldType::Duration
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Duration(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Duration(v) => Ok(v),
            other => Err(mismatch("duration", &other)),
        }
    }
}

impl SettingType for DateTime<FixedOffset> {
    fn field_type() -> FieldType {
        FieldType::Instant
    }

    fn into_value(self) -> SettingValue {
        SettingValue::Instant(self)
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Instant(v) => Ok(v),
            other => Err(mismatch("instant", &other)),
        }
    }
}

impl<T: SettingType> SettingType for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Optional(Box::new(T::field_type()))
    }

    fn into_value(self) -> SettingValue {
        match self {
            Some(v) => v.into_value(),
            None => SettingValue::Absent,
        }
    }

    fn from_value(value: SettingValue) -> Result<Self, SerializerError> {
        match value {
            SettingValue::Absent => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

fn mismatch(expected: &str, got: &SettingValue) -> SerializerError {
    SerializerError::unsupported(format!("expected {expected} value, got {}", got.kind()))
}

/// Generic accessor over any [`SettingType`] field.
pub struct TypedSlot<'a, T: SettingType> {
    name: &'a str,
    declared: FieldType,
    value: &'a mut T,
}

impl<'a, T: SettingType> TypedSlot<'a, T> {
    pub fn new(name: &'a str, value: &'a mut T) -> Self {
        Self { name, declared: T::field_type(), value }
    }
}

impl<T: SettingType> SettingField for TypedSlot<'_, T> {
    fn name(&self) -> &str {
        self.name
    }

    fn declared(&self) -> &FieldType {
        &self.declared
    }

    fn current(&self) -> SettingValue {
        self.value.clone().into_value()
    }

    fn assign(&mut self, value: SettingValue) -> Result<(), SerializerError> {
        *self.value = T::from_value(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_slot_round_trip() {
        let mut flag = false;
        let mut slot = TypedSlot::new("enabled", &mut flag);
        assert_eq!(slot.name(), "enabled");
        assert_eq!(*slot.declared(), FieldType::Bool);
        assert_eq!(slot.current(), SettingValue::Bool(false));
        slot.assign(SettingValue::Bool(true)).unwrap();
        assert!(flag);
    }

    #[test]
    fn typed_slot_rejects_mismatched_value() {
        let mut count = 0i64;
        let mut slot = TypedSlot::new("count", &mut count);
        let err = slot.assign(SettingValue::Str("nope".into())).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Unsupported);
        assert_eq!(count, 0);
    }

    #[test]
    fn optional_field_type_wraps_inner() {
        assert_eq!(
            <Option<i64> as SettingType>::field_type(),
            FieldType::Optional(Box::new(FieldType::Int))
        );
    }

    #[test]
    fn optional_absent_round_trip() {
        let mut page: Option<i64> = Some(5);
        let mut slot = TypedSlot::new("page", &mut page);
        slot.assign(SettingValue::Absent).unwrap();
        assert_eq!(page, None);

        let mut page: Option<i64> = None;
        let mut slot = TypedSlot::new("page", &mut page);
        assert_eq!(slot.current(), SettingValue::Absent);
        slot.assign(SettingValue::Int(42)).unwrap();
        assert_eq!(page, Some(42));
    }

    #[test]
    fn temporal_field_types() {
        assert_eq!(TimeDelta::field_type(), FieldType::Duration);
        assert_eq!(
            <DateTime<FixedOffset> as SettingType>::field_type(),
            FieldType::Instant
        );
    }
}
