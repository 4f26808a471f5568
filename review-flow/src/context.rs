use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Shared key/value state for one session.
///
/// Clones share the same underlying map, so tasks running concurrently
/// under a fan-out see each other's writes.
#[derive(Clone, Debug)]
pub struct Context {
    data: Arc<DashMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: impl serde::Serialize) {
        self.set_sync(key, value);
    }

    /// Values that fail to serialize are logged and dropped.
    pub fn set_sync(&self, key: impl Into<String>, value: impl serde::Serialize) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.data.insert(key, value);
            }
            Err(e) => warn!(key = %key, error = %e, "failed to serialize context value"),
        }
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_sync(key)
    }

    pub fn get_sync<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.data.remove(key).map(|(_, v)| v)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let context = Context::new();
        let other = context.clone();
        other.set("headline", "Bridge closes").await;

        let headline: Option<String> = context.get("headline").await;
        assert_eq!(headline.as_deref(), Some("Bridge closes"));
    }

    #[tokio::test]
    async fn wrong_type_reads_as_none() {
        let context = Context::new();
        context.set("count", 3).await;

        assert_eq!(context.get_sync::<u32>("count"), Some(3));
        assert_eq!(context.get_sync::<String>("count"), None);
        assert!(context.remove("count").await.is_some());
        assert!(!context.contains_key("count"));
    }
}
