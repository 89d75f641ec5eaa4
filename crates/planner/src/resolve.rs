//! Field metadata resolution.
//!
//! Walks an [`EntitySchema`] and produces, per tag namespace, the mapping
//! from the logical names clients send to the physical dotted paths the
//! query layer addresses. Embedded groups are flattened without a prefix,
//! named relations expose their own tagged fields under `logical.` with
//! physical paths under `physical.`.

use crate::{address::column_ref, options::DEFAULT_MAX_RELATION_DEPTH};
use lazy_static::lazy_static;
use model::{
    core::data_type::DataType,
    pagination::column::ColumnRef,
    schema::{Entity, EntitySchema, FieldDef, FieldKind, Namespace},
};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTarget {
    /// Physical dotted path, e.g. `Post.User.name`.
    pub path: String,
    pub data_type: Option<DataType>,
}

impl FieldTarget {
    pub fn new(path: &str, data_type: Option<DataType>) -> Self {
        Self {
            path: path.to_string(),
            data_type,
        }
    }

    pub fn column(&self) -> ColumnRef {
        column_ref(&self.path)
    }
}

/// Logical name to physical target, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldTarget)>,
    index: HashMap<String, usize>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. An existing logical name keeps its position and takes
    /// the new target.
    pub fn insert(&mut self, logical: String, target: FieldTarget) {
        match self.index.get(&logical) {
            Some(&pos) => self.entries[pos].1 = target,
            None => {
                self.index.insert(logical.clone(), self.entries.len());
                self.entries.push((logical, target));
            }
        }
    }

    pub fn get(&self, logical: &str) -> Option<&FieldTarget> {
        self.index.get(logical).map(|&pos| &self.entries[pos].1)
    }

    pub fn path(&self, logical: &str) -> Option<&str> {
        self.get(logical).map(|t| t.path.as_str())
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.index.contains_key(logical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldTarget)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `(logical, path)` pairs, mostly useful for assertions and logging.
    pub fn paths(&self) -> Vec<(&str, &str)> {
        self.iter().map(|(k, t)| (k, t.path.as_str())).collect()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, FieldTarget);
    type IntoIter = std::vec::IntoIter<(String, FieldTarget)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub fn resolve(schema: Option<&EntitySchema>, namespace: Namespace) -> FieldMap {
    resolve_with_depth(schema, namespace, DEFAULT_MAX_RELATION_DEPTH)
}

/// Like [`resolve`], descending at most `max_depth` embedded/relation levels.
/// Past the limit a relation or embedded group contributes nothing.
pub fn resolve_with_depth(
    schema: Option<&EntitySchema>,
    namespace: Namespace,
    max_depth: usize,
) -> FieldMap {
    let mut map = FieldMap::new();
    if let Some(schema) = schema {
        collect(schema, namespace, 0, max_depth, &mut map);
    }
    map
}

fn collect(
    schema: &EntitySchema,
    namespace: Namespace,
    depth: usize,
    max_depth: usize,
    map: &mut FieldMap,
) {
    for field in schema.fields.iter().filter(|f| f.exported) {
        match &field.kind {
            FieldKind::Embedded(embedded) => {
                if depth >= max_depth {
                    depth_exceeded(schema, field, max_depth);
                    continue;
                }
                collect(embedded(), namespace, depth + 1, max_depth, map);
            }
            FieldKind::Relation { schema: related, .. } => {
                let Some(logical) = field.tag(namespace) else {
                    continue;
                };
                let physical = field.column.as_deref().unwrap_or(logical);

                if depth >= max_depth {
                    depth_exceeded(schema, field, max_depth);
                    continue;
                }

                let mut nested = FieldMap::new();
                collect(related(), namespace, depth + 1, max_depth, &mut nested);

                if nested.is_empty() {
                    map.insert(
                        logical.to_string(),
                        FieldTarget::new(physical, field.data_type),
                    );
                    continue;
                }

                for (sub_logical, target) in nested {
                    map.insert(
                        format!("{logical}.{sub_logical}"),
                        FieldTarget {
                            path: format!("{physical}.{}", target.path),
                            data_type: target.data_type,
                        },
                    );
                }
            }
            FieldKind::Scalar => {
                let Some(logical) = field.tag(namespace) else {
                    continue;
                };
                let physical = field.column.as_deref().unwrap_or(logical);
                map.insert(
                    logical.to_string(),
                    FieldTarget::new(physical, field.data_type),
                );
            }
        }
    }
}

fn depth_exceeded(schema: &EntitySchema, field: &FieldDef, max_depth: usize) {
    warn!(
        table = %schema.table,
        field = %field.name,
        max_depth,
        "Relation depth limit reached, not descending further"
    );
}

type CacheKey = (TypeId, Namespace, usize);

/// Read-mostly cache of resolved field maps, keyed by record type, namespace
/// and depth limit. Maps never change once built.
#[derive(Debug, Default)]
pub struct FieldMapCache {
    maps: RwLock<HashMap<CacheKey, Arc<FieldMap>>>,
}

lazy_static! {
    static ref GLOBAL_FIELD_MAP_CACHE: FieldMapCache = FieldMapCache::new();
}

impl FieldMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static FieldMapCache {
        &GLOBAL_FIELD_MAP_CACHE
    }

    pub fn get_or_resolve<T: Entity + 'static>(
        &self,
        namespace: Namespace,
        max_depth: usize,
    ) -> Arc<FieldMap> {
        let key = (TypeId::of::<T>(), namespace, max_depth);
        if let Some(map) = self
            .maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(map);
        }

        let resolved = Arc::new(resolve_with_depth(Some(T::schema()), namespace, max_depth));
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have resolved the same key in the meantime.
        Arc::clone(maps.entry(key).or_insert(resolved))
    }

    pub fn len(&self) -> usize {
        self.maps.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves `T`'s field map through the global cache.
pub fn resolve_entity<T: Entity + 'static>(namespace: Namespace) -> Arc<FieldMap> {
    FieldMapCache::global().get_or_resolve::<T>(namespace, DEFAULT_MAX_RELATION_DEPTH)
}
