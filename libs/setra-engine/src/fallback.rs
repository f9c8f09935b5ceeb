use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use setra_api::error::SerializerError;
use setra_api::value::SettingValue;

/// Conversion helper for a type outside the built-in chain.
///
/// Two-step shape of a validating converter: `is_valid` is a cheap test over
/// the raw string, `convert` does the work and may still fail.
pub trait FallbackConverter: Send + Sync {
    fn is_valid(&self, raw: &str) -> bool;

    fn convert(&self, raw: &str) -> Result<SettingValue, SerializerError>;
}

/// Registry of fallback converters, keyed by opaque type name.
pub struct FallbackRegistry {
    converters: RwLock<HashMap<String, Arc<dyn FallbackConverter>>>,
}

impl Default for FallbackRegistry {
    fn default() -> Self {
        Self {
            converters: RwLock::new(HashMap::new()),
        }
    }
}

impl FallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, type_name: impl Into<String>, converter: Arc<dyn FallbackConverter>) {
        let mut guard = match self.converters.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("fallback registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(type_name.into(), converter);
    }

    pub fn resolve(&self, type_name: &str) -> Option<Arc<dyn FallbackConverter>> {
        let guard = match self.converters.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("fallback registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(type_name).cloned()
    }
}

impl std::fmt::Debug for FallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = {
            let guard = match self.converters.read() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.keys().cloned().collect()
        };
        f.debug_struct("FallbackRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hex;

    impl FallbackConverter for Hex {
        fn is_valid(&self, raw: &str) -> bool {
            !raw.is_empty() && raw.chars().all(|c| c.is_ascii_hexdigit())
        }

        fn convert(&self, raw: &str) -> Result<SettingValue, SerializerError> {
            let v = i64::from_str_radix(raw, 16)
                .map_err(|e| SerializerError::format(e.to_string()))?;
            Ok(SettingValue::Int(v))
        }
    }

    #[test]
    fn resolve_by_type_name() {
        let registry = FallbackRegistry::new();
        registry.register("hex", Arc::new(Hex));
        let conv = registry.resolve("hex").unwrap();
        assert!(conv.is_valid("ff"));
        assert!(!conv.is_valid("zz"));
        assert_eq!(conv.convert("ff").unwrap(), SettingValue::Int(255));
        assert!(registry.resolve("octal").is_none());
    }
}
