use std::ops::Index;

use indexmap::IndexMap;

use super::class::{Class, ClassQuery, ClassRef, Instance};

/// Insertion-ordered map keyed by classes.
///
/// Everything behaves like an ordinary ordered map except [`contains`],
/// which answers "is the queried class, or the class of the queried value,
/// one of the keys or a subclass of one". `contains_key` keeps exact-key
/// semantics.
///
/// [`contains`]: HierarchyMap::contains
#[derive(Debug, Clone)]
pub struct HierarchyMap<V> {
    entries: IndexMap<ClassRef, V>,
}

impl<V> HierarchyMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Is-a containment for either a class or a value.
    pub fn contains<'q>(&self, query: impl Into<ClassQuery<'q>>) -> bool {
        self.contains_class(&query.into().class())
    }

    pub fn contains_class(&self, class: &ClassRef) -> bool {
        self.entries.keys().any(|key| class.is_subclass_of(key))
    }

    pub fn contains_type<T: Class>(&self) -> bool {
        self.contains_class(&T::class())
    }

    pub fn contains_value(&self, value: &dyn Instance) -> bool {
        self.contains_class(&value.class_ref())
    }

    /// Exact key lookup, no subclass matching.
    pub fn contains_key(&self, key: &ClassRef) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites; an overwritten key keeps its position.
    pub fn insert(&mut self, key: ClassRef, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn insert_class<T: Class>(&mut self, value: V) -> Option<V> {
        self.insert(T::class(), value)
    }

    pub fn get(&self, key: &ClassRef) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &ClassRef) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &ClassRef) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, ClassRef, V> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, ClassRef, V> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, ClassRef, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, ClassRef, V> {
        self.entries.values()
    }
}

impl<V> Default for HierarchyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for HierarchyMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V> FromIterator<(ClassRef, V)> for HierarchyMap<V> {
    fn from_iter<I: IntoIterator<Item = (ClassRef, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V, const N: usize> From<[(ClassRef, V); N]> for HierarchyMap<V> {
    fn from(entries: [(ClassRef, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<V> Extend<(ClassRef, V)> for HierarchyMap<V> {
    fn extend<I: IntoIterator<Item = (ClassRef, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<V> IntoIterator for HierarchyMap<V> {
    type Item = (ClassRef, V);
    type IntoIter = indexmap::map::IntoIter<ClassRef, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a HierarchyMap<V> {
    type Item = (&'a ClassRef, &'a V);
    type IntoIter = indexmap::map::Iter<'a, ClassRef, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<V> Index<&ClassRef> for HierarchyMap<V> {
    type Output = V;

    /// Exact key lookup. Panics when the key is absent, like `IndexMap`.
    fn index(&self, key: &ClassRef) -> &V {
        &self.entries[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base;
    struct Child;
    struct Other;

    impl Class for Base {
        fn class() -> ClassRef {
            ClassRef::root::<Self>("Base")
        }
    }

    impl Class for Child {
        fn class() -> ClassRef {
            const BASES: &[fn() -> ClassRef] = &[<Base as Class>::class];
            ClassRef::new::<Self>("Child", BASES)
        }
    }

    impl Class for Other {
        fn class() -> ClassRef {
            ClassRef::root::<Self>("Other")
        }
    }

    #[test]
    fn test_contains_differs_from_contains_key() {
        let map = HierarchyMap::from([(Base::class(), 1)]);
        assert!(map.contains(Child::class()));
        assert!(!map.contains_key(&Child::class()));
        assert!(map.get(&Child::class()).is_none());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = HierarchyMap::new();
        map.insert_class::<Base>("a");
        map.insert_class::<Other>("b");
        assert_eq!(map.insert_class::<Base>("c"), Some("a"));

        let entries: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.name(), *v)).collect();
        assert_eq!(entries, vec![("Base", "c"), ("Other", "b")]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: HierarchyMap<u8> = [(Base::class(), 1), (Child::class(), 2), (Other::class(), 3)]
            .into_iter()
            .collect();
        assert_eq!(map.remove(&Child::class()), Some(2));
        let names: Vec<&str> = map.keys().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Base", "Other"]);
        assert_eq!(map[&Other::class()], 3);
    }

    #[test]
    fn test_empty_map_contains_nothing() {
        let map: HierarchyMap<()> = HierarchyMap::default();
        assert!(map.is_empty());
        assert!(!map.contains(Base::class()));
        assert!(!map.contains(&Base));
    }
}
