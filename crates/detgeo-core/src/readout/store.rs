use crate::core::models::hit::HitCollection;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadoutError {
    #[error("Input collection '{0}' not found in event store")]
    MissingCollection(String),

    #[error("Output collection '{0}' already exists in event store")]
    CollectionExists(String),
}

/// Named hit collections of one event.
///
/// Transforms read an existing collection and register a new one; a
/// collection is never overwritten in place.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    collections: HashMap<String, HitCollection>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, hits: HitCollection) -> Result<(), ReadoutError> {
        let name = name.into();
        if self.collections.contains_key(&name) {
            return Err(ReadoutError::CollectionExists(name));
        }
        self.collections.insert(name, hits);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&HitCollection, ReadoutError> {
        self.collections
            .get(name)
            .ok_or_else(|| ReadoutError::MissingCollection(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collection_is_an_error() {
        let store = EventStore::new();
        assert_eq!(
            store.get("SiTargetHits").unwrap_err(),
            ReadoutError::MissingCollection("SiTargetHits".to_string())
        );
    }

    #[test]
    fn collections_are_never_silently_replaced() {
        let mut store = EventStore::new();
        store.insert("SiTargetHits", Vec::new()).unwrap();
        assert_eq!(
            store.insert("SiTargetHits", Vec::new()).unwrap_err(),
            ReadoutError::CollectionExists("SiTargetHits".to_string())
        );
    }
}
