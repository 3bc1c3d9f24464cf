//! Name-keyed catalog of concluded variants.
//!
//! The registry is an ordinary value owned by whoever needs variant lookup.
//! Entries are frozen `Arc<Variant>`s, so lookups can be handed to worker
//! threads while reconfiguration needs `&mut VariantMap`.

use crate::error::{VariantError, VariantResult};
use crate::parser::parse_variants;
use crate::variant::{templates, Variant};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct VariantMap {
    variants: BTreeMap<String, Arc<Variant>>,
}

impl VariantMap {
    /// Empty registry; call [`init`](Self::init) for the built-in variants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in template.
    pub fn init(&mut self) {
        for (name, build) in templates::BUILTIN {
            self.insert(name, build());
        }
        tracing::debug!(count = self.variants.len(), "registered built-in variants");
    }

    /// Registry holding the built-in variants.
    pub fn with_builtins() -> Self {
        let mut map = Self::new();
        map.init();
        map
    }

    /// Adds or replaces the variants defined in `source`.
    ///
    /// Parents resolve against variants defined earlier in `source`, then
    /// this registry, then the built-in templates. Returns the names that
    /// were inserted. In strict mode every problem is collected; variants
    /// without problems are still inserted and the problems are returned as
    /// [`VariantError::Config`].
    pub fn parse(&mut self, source: &str, strict: bool) -> VariantResult<Vec<String>> {
        let out = parse_variants(
            source,
            strict,
            |name| match self.variants.get(name) {
                Some(v) => Some(v.as_ref().clone()),
                None => templates::by_name(name),
            },
            |name| self.variants.contains_key(name),
        );

        let mut names = Vec::with_capacity(out.variants.len());
        for variant in out.variants {
            let name = variant.name().to_string();
            self.insert(&name, variant);
            names.push(name);
        }
        tracing::debug!(count = names.len(), strict, "parsed variant definitions");

        if out.errors.is_empty() {
            Ok(names)
        } else {
            Err(VariantError::Config(out.errors))
        }
    }

    /// [`parse`](Self::parse) on the contents of a file.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P, strict: bool) -> VariantResult<Vec<String>> {
        let source = std::fs::read_to_string(path)?;
        self.parse(&source, strict)
    }

    /// Concludes `variant` and registers it under `name`, returning the entry it replaces.
    pub fn insert(&mut self, name: &str, mut variant: Variant) -> Option<Arc<Variant>> {
        if !variant.is_concluded() {
            variant.conclude();
        }
        self.variants.insert(name.to_string(), Arc::new(variant))
    }

    /// Registers an already shared variant without copying it.
    ///
    /// An unconcluded variant is handed back as the error and the registry
    /// is left untouched.
    pub fn insert_shared(&mut self, name: &str, variant: Arc<Variant>) -> Result<Option<Arc<Variant>>, Arc<Variant>> {
        if !variant.is_concluded() {
            tracing::warn!(variant = %name, "refusing to register an unconcluded variant");
            return Err(variant);
        }
        Ok(self.variants.insert(name.to_string(), variant))
    }

    pub fn clear_all(&mut self) {
        self.variants.clear();
    }

    /// Registered names in alphabetical order.
    pub fn get_keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.variants.keys().map(String::as_str)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Arc<Variant>> {
        self.variants.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_clear() {
        let mut map = VariantMap::new();
        assert!(map.is_empty());
        map.clear_all();
        map.init();
        assert_eq!(map.len(), templates::BUILTIN.len());
        assert!(map.contains("xiangqi"));
        assert!(map.get("chess").is_some_and(|v| v.is_concluded()));
        map.clear_all();
        assert!(map.is_empty());
        assert_eq!(map.get_keys().count(), 0);
    }

    #[test]
    fn test_keys_sorted() {
        let map = VariantMap::with_builtins();
        let keys: Vec<&str> = map.get_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_insert_concludes_and_replaces() {
        let mut map = VariantMap::new();
        let mut v = Variant::new("custom");
        v.drops_mut().piece_drops = true;
        assert!(map.insert("custom", v).is_none());
        assert!(map.get("custom").is_some_and(|v| v.is_concluded()));
        let previous = map.insert("custom", Variant::new("custom"));
        assert!(previous.is_some_and(|v| v.drops().piece_drops));
    }

    #[test]
    fn test_insert_shared_keeps_identity() {
        let mut map = VariantMap::new();
        let shared = Arc::new(templates::chess());
        assert!(matches!(map.insert_shared("chess", Arc::clone(&shared)), Ok(None)));
        assert!(map.get("chess").is_some_and(|v| Arc::ptr_eq(v, &shared)));

        let raw = Arc::new(Variant::new("raw"));
        assert!(map.insert_shared("raw", raw).is_err());
        assert!(!map.contains("raw"));
    }

    #[test]
    fn test_parse_uses_registered_parent() {
        let mut map = VariantMap::new();
        let mut base = Variant::new("house");
        base.drops_mut().piece_drops = true;
        base.drops_mut().captures_to_hand = true;
        map.insert("house", base);
        let names = map.parse("[child:house]\nmustCapture = true\n", true).unwrap();
        assert_eq!(names, vec!["child".to_string()]);
        let child = map.get("child").unwrap();
        assert!(child.derived().nnue_use_pockets);
    }

    #[test]
    fn test_parse_missing_file() {
        let mut map = VariantMap::new();
        let err = map.parse_file("/nonexistent/variants.ini", false).unwrap_err();
        assert!(matches!(err, VariantError::Io(_)));
        assert!(err.config_errors().is_empty());
    }
}
