use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use setra_api::serializer::SettingSerializer;

/// Registry of named serializers.
///
/// Populated by the host at startup; the codec resolves by identifier at
/// call time and never caches the result. Interior mutability so hosts can
/// keep registering after the registry has been shared.
pub struct SerializerRegistry {
    serializers: RwLock<HashMap<String, Arc<dyn SettingSerializer>>>,
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self {
            serializers: RwLock::new(HashMap::new()),
        }
    }
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: impl Into<String>, serializer: Arc<dyn SettingSerializer>) {
        let mut guard = match self.serializers.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("serializer registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(id.into(), serializer);
    }

    pub fn resolve(&self, id: &str) -> Option<Arc<dyn SettingSerializer>> {
        let guard = match self.serializers.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("serializer registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        let guard = match self.serializers.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("serializer registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.contains_key(id)
    }

    pub fn ids(&self) -> Vec<String> {
        let guard = match self.serializers.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("serializer registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.keys().cloned().collect()
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
