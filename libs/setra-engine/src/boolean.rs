use setra_api::field::FieldType;

/// Reconcile numeric boolean encodings with the canonical textual tokens.
///
/// Only rewrites when the target type is boolean: `"1"` becomes `"true"`
/// and `"0"` becomes `"false"`. A string already parsing as a boolean token
/// passes through unchanged, as does everything else — later conversion
/// rejects it.
pub fn normalize_boolean<'a>(declared: &FieldType, raw: &'a str) -> &'a str {
    if !matches!(declared, FieldType::Bool) {
        return raw;
    }
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return raw;
    }
    match raw {
        "1" => "true",
        "0" => "false",
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_numeric_encodings() {
        assert_eq!(normalize_boolean(&FieldType::Bool, "1"), "true");
        assert_eq!(normalize_boolean(&FieldType::Bool, "0"), "false");
    }

    #[test]
    fn canonical_tokens_pass_through() {
        assert_eq!(normalize_boolean(&FieldType::Bool, "true"), "true");
        assert_eq!(normalize_boolean(&FieldType::Bool, "False"), "False");
        assert_eq!(normalize_boolean(&FieldType::Bool, " TRUE "), " TRUE ");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        assert_eq!(normalize_boolean(&FieldType::Bool, "yes"), "yes");
        assert_eq!(normalize_boolean(&FieldType::Bool, "2"), "2");
        assert_eq!(normalize_boolean(&FieldType::Bool, ""), "");
    }

    #[test]
    fn non_boolean_targets_untouched() {
        assert_eq!(normalize_boolean(&FieldType::Int, "1"), "1");
        assert_eq!(normalize_boolean(&FieldType::Str, "0"), "0");
    }
}
