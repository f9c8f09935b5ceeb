use setra_api::error::SerializerError;
use setra_api::field::FieldType;
use setra_api::serializer::SettingSerializer;
use setra_api::temporal;
use setra_api::value::SettingValue;

/// Settings serializer storing values as JSON text.
///
/// Scalars map to native JSON types, temporal values to their canonical
/// string forms, enum members to the symbolic name (the raw code when the
/// declared spec has no member for it), absence to `null`.
pub struct JsonSettingSerializer;

impl SettingSerializer for JsonSettingSerializer {
    fn serialize(
        &self,
        value: &SettingValue,
        declared: &FieldType,
    ) -> Result<Option<String>, SerializerError> {
        let json = to_json(value, declared)?;
        Ok(Some(serde_json::to_string(&json)?))
    }

    fn deserialize(
        &self,
        raw: &str,
        declared: &FieldType,
    ) -> Result<SettingValue, SerializerError> {
        let json: serde_json::Value = serde_json::from_str(raw)?;
        from_json(&json, declared.unwrap_optional())
    }
}

fn to_json(
    value: &SettingValue,
    declared: &FieldType,
) -> Result<serde_json::Value, SerializerError> {
    use serde_json::Value as Json;

    Ok(match value {
        SettingValue::Bool(b) => Json::Bool(*b),
        SettingValue::Int(i) => Json::from(*i),
        SettingValue::UInt(u) => Json::from(*u),
        SettingValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| SerializerError::unsupported("non-finite float has no JSON form"))?,
        SettingValue::Str(s) => Json::String(s.clone()),
        SettingValue::Duration(d) => Json::String(temporal::format_duration(d)),
        SettingValue::Instant(t) => Json::String(temporal::format_instant(t)),
        SettingValue::Enum { code, .. } => match declared.unwrap_optional() {
            FieldType::Enum(spec) => spec
                .by_code(*code)
                .map(|m| Json::String(m.name.clone()))
                .unwrap_or_else(|| Json::from(*code)),
            _ => Json::from(*code),
        },
        SettingValue::Absent => Json::Null,
    })
}

fn from_json(
    json: &serde_json::Value,
    target: &FieldType,
) -> Result<SettingValue, SerializerError> {
    use serde_json::Value as Json;

    if json.is_null() {
        return Ok(SettingValue::Absent);
    }

    Ok(match target {
        FieldType::Bool => SettingValue::Bool(
            json.as_bool()
                .ok_or_else(|| SerializerError::format("expected JSON boolean"))?,
        ),
        FieldType::Int => SettingValue::Int(
            json.as_i64()
                .ok_or_else(|| SerializerError::format("expected JSON integer"))?,
        ),
        FieldType::UInt => SettingValue::UInt(
            json.as_u64()
                .ok_or_else(|| SerializerError::format("expected non-negative JSON integer"))?,
        ),
        FieldType::Float => SettingValue::Float(
            json.as_f64()
                .ok_or_else(|| SerializerError::format("expected JSON number"))?,
        ),
        FieldType::Str => SettingValue::Str(
            json.as_str()
                .ok_or_else(|| SerializerError::format("expected JSON string"))?
                .to_string(),
        ),
        FieldType::Duration => {
            let s = json
                .as_str()
                .ok_or_else(|| SerializerError::format("expected JSON duration string"))?;
            SettingValue::Duration(
                temporal::parse_duration(s)
                    .ok_or_else(|| SerializerError::format(format!("'{s}' is not a duration")))?,
            )
        }
        FieldType::Instant => {
            let s = json
                .as_str()
                .ok_or_else(|| SerializerError::format("expected JSON instant string"))?;
            SettingValue::Instant(
                temporal::parse_instant(s)
                    .ok_or_else(|| SerializerError::format(format!("'{s}' is not an instant")))?,
            )
        }
        FieldType::Enum(spec) => match json {
            Json::String(s) => spec
                .by_name(s)
                .map(|m| SettingValue::Enum { spec: spec.name.clone(), code: m.code })
                .ok_or_else(|| {
                    SerializerError::format(format!("no member named '{s}' in enum {}", spec.name))
                })?,
            Json::Number(_) => {
                let code = json
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| SerializerError::format("enum code out of range"))?;
                SettingValue::Enum { spec: spec.name.clone(), code }
            }
            _ => return Err(SerializerError::format("expected enum name or code")),
        },
        FieldType::Optional(_) | FieldType::Opaque { .. } => {
            return Err(SerializerError::unsupported(format!(
                "cannot deserialize {target} from JSON"
            )));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, TimeZone};
    use setra_api::field::{EnumMember, EnumSpec};

    fn color() -> FieldType {
        FieldType::Enum(EnumSpec::new(
            "color",
            vec![EnumMember::new("red", 1), EnumMember::new("green", 2)],
        ))
    }

    fn round_trip(value: SettingValue, declared: FieldType) {
        let s = JsonSettingSerializer
            .serialize(&value, &declared)
            .unwrap()
            .unwrap();
        let back = JsonSettingSerializer.deserialize(&s, &declared).unwrap();
        assert_eq!(back, value, "round-trip through '{s}'");
    }

    #[test]
    fn scalar_round_trips() {
        round_trip(SettingValue::Bool(true), FieldType::Bool);
        round_trip(SettingValue::Int(-5), FieldType::Int);
        round_trip(SettingValue::UInt(7), FieldType::UInt);
        round_trip(SettingValue::Float(1.25), FieldType::Float);
        round_trip(SettingValue::Str("quoted \"text\"".into()), FieldType::Str);
    }

    #[test]
    fn temporal_round_trips() {
        round_trip(
            SettingValue::Duration(TimeDelta::minutes(90)),
            FieldType::Duration,
        );
        let tz = FixedOffset::east_opt(3600).unwrap();
        round_trip(
            SettingValue::Instant(tz.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()),
            FieldType::Instant,
        );
    }

    #[test]
    fn enum_stored_by_name() {
        let s = JsonSettingSerializer
            .serialize(
                &SettingValue::Enum { spec: "color".into(), code: 2 },
                &color(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(s, "\"green\"");
        round_trip(SettingValue::Enum { spec: "color".into(), code: 2 }, color());
    }

    #[test]
    fn enum_undefined_code_stored_numerically() {
        let s = JsonSettingSerializer
            .serialize(
                &SettingValue::Enum { spec: "color".into(), code: 9 },
                &color(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(s, "9");
        round_trip(SettingValue::Enum { spec: "color".into(), code: 9 }, color());
    }

    #[test]
    fn absent_is_null() {
        let declared = FieldType::Optional(Box::new(FieldType::Int));
        let s = JsonSettingSerializer
            .serialize(&SettingValue::Absent, &declared)
            .unwrap()
            .unwrap();
        assert_eq!(s, "null");
        assert_eq!(
            JsonSettingSerializer.deserialize("null", &declared).unwrap(),
            SettingValue::Absent
        );
    }

    #[test]
    fn type_mismatch_is_a_format_error() {
        let err = JsonSettingSerializer
            .deserialize("\"abc\"", &FieldType::Int)
            .unwrap_err();
        assert_eq!(err.kind, setra_api::error::ErrorKind::Format);
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let err = JsonSettingSerializer
            .deserialize("{not json", &FieldType::Int)
            .unwrap_err();
        assert_eq!(err.kind, setra_api::error::ErrorKind::Format);
    }
}
