//! Content-addressed deduplication keyed by a structural profile.
//!
//! A profile is any `Hash + Eq` value that encodes exactly the content that
//! should make two constructions identical (e.g. a type's base handle plus
//! its kind/length/attribute bits). `insert_or_find` is the single entry
//! point every interning table in `types` and `decl` goes through: it
//! either returns the handle already registered for an equal profile, or
//! calls `factory` to allocate a new node and registers it.
use rustc_hash::FxHashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct InternTable<Profile, Idx> {
    index: FxHashMap<Profile, Idx>,
}

impl<Profile: Eq + Hash, Idx: Copy> Default for InternTable<Profile, Idx> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
        }
    }
}

impl<Profile: Eq + Hash + Clone, Idx: Copy> InternTable<Profile, Idx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle already registered for `profile`, or build and
    /// register a new one via `factory`.
    pub fn insert_or_find(&mut self, profile: Profile, factory: impl FnOnce() -> Idx) -> Idx {
        if let Some(existing) = self.index.get(&profile) {
            return *existing;
        }
        let idx = factory();
        self.index.insert(profile, idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_profile_returns_same_handle() {
        let mut table: InternTable<(u32, u32), u32> = InternTable::new();
        let mut next = 0u32;
        let mut alloc = || {
            let id = next;
            next += 1;
            id
        };
        let a = table.insert_or_find((1, 2), &mut alloc);
        let b = table.insert_or_find((1, 2), &mut alloc);
        assert_eq!(a, b);
        let c = table.insert_or_find((1, 3), &mut alloc);
        assert_ne!(a, c);
    }
}
