use crate::{node::SchemaType, resolve::ForwardRefs, types::Variant};
use std::{collections::HashMap, sync::Arc};

///
/// SchemaCache
///
/// Memoizes built schemas by `(entity, variant, sorted forward-ref keys)`.
/// Entries are never mutated once written; a different forward-reference set
/// always lands in a distinct entry, even for the same entity/variant.
///

#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: HashMap<String, Arc<SchemaType>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic cache key. The forward-ref segment is appended only for
    /// a non-empty map; `ForwardRefs` is a BTreeMap so its keys are already
    /// sorted.
    #[must_use]
    pub fn key(entity: &str, variant: Variant, forward_refs: &ForwardRefs) -> String {
        let mut key = format!("{entity}::{variant}");
        if !forward_refs.is_empty() {
            key.push_str("::");
            let names: Vec<&str> = forward_refs.keys().map(String::as_str).collect();
            key.push_str(&names.join(","));
        }

        key
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<SchemaType>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, schema: Arc<SchemaType>) {
        self.entries.insert(key, schema);
    }

    /// Drop every entry, or only those derived for one entity.
    pub fn clear(&mut self, entity: Option<&str>) {
        match entity {
            None => self.entries.clear(),
            Some(name) => {
                let prefix = format!("{name}::");
                self.entries.retain(|key, _| !key.starts_with(&prefix));
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// TESTS
///
