//! Identifier table (C2).
//!
//! Maps source-text names to canonical, handle-comparable [`NameId`]s and
//! attaches each one a mutable *front-end token*: a back-reference to the
//! declaration currently visible for that name. The source language
//! forbids shadowing within one scope unit, so this slot is a legitimate
//! fast path for "is `n` already in scope" without walking a scope chain.
//! `push_scope`/`pop_scope` save and restore the token stack; a context's
//! own declaration list (`decl::DeclContext`) remains the source of truth
//! for enumeration ("list visible declarations in this context").

use crate::core::{IStr, Interner};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(u32);

impl NameId {
    fn new(index: usize) -> Self {
        NameId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The identifier table. Generic over the token type `T` so this layer
/// carries no dependency on `decl::DeclId`.
#[derive(Debug)]
pub struct IdentifierTable<T: Copy> {
    interner: Interner,
    lookup: FxHashMap<IStr, NameId>,
    strings: Vec<IStr>,
    tokens: Vec<Option<T>>,
    save_stack: Vec<Vec<(NameId, Option<T>)>>,
}

impl<T: Copy> Default for IdentifierTable<T> {
    fn default() -> Self {
        Self {
            interner: Interner::new(),
            lookup: FxHashMap::default(),
            strings: Vec::new(),
            tokens: Vec::new(),
            save_stack: Vec::new(),
        }
    }
}

impl<T: Copy> IdentifierTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning its canonical handle. Two calls with equal
    /// strings always return the same handle.
    pub fn intern(&mut self, s: &str) -> NameId {
        if let Some(existing) = self.lookup.get(s) {
            return *existing;
        }
        let rc = self.interner.intern(s);
        let id = NameId::new(self.strings.len());
        self.strings.push(rc.clone());
        self.tokens.push(None);
        self.lookup.insert(rc, id);
        id
    }

    pub fn text(&self, id: NameId) -> &str {
        &self.strings[id.index()]
    }

    /// The declaration currently visible for `id`, if any.
    pub fn current(&self, id: NameId) -> Option<T> {
        self.tokens[id.index()]
    }

    /// Bind `id`'s front-end token to `value`. If a scope is active (via
    /// `push_scope`), records the prior value so `pop_scope` can restore it.
    pub fn bind(&mut self, id: NameId, value: T) {
        let old = self.tokens[id.index()];
        self.tokens[id.index()] = Some(value);
        if let Some(frame) = self.save_stack.last_mut() {
            frame.push((id, old));
        }
    }

    /// Open a save frame for the scope about to be entered.
    pub fn push_scope(&mut self) {
        self.save_stack.push(Vec::new());
    }

    /// Restore every front-end token touched since the matching
    /// `push_scope`, most-recent touch first so the original binding wins.
    pub fn pop_scope(&mut self) {
        let frame = self
            .save_stack
            .pop()
            .expect("pop_scope called without a matching push_scope");
        for (id, old) in frame.into_iter().rev() {
            self.tokens[id.index()] = old;
        }
    }

    pub fn scope_depth(&self) -> usize {
        self.save_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut table: IdentifierTable<u32> = IdentifierTable::new();
        let a = table.intern("i");
        let b = table.intern("i");
        assert_eq!(a, b);
        let c = table.intern("j");
        assert_ne!(a, c);
        assert_eq!(table.text(a), "i");
    }

    #[test]
    fn bind_and_lookup() {
        let mut table: IdentifierTable<u32> = IdentifierTable::new();
        let i = table.intern("i");
        assert_eq!(table.current(i), None);
        table.bind(i, 42);
        assert_eq!(table.current(i), Some(42));
    }

    #[test]
    fn scope_push_pop_restores_prior_binding() {
        let mut table: IdentifierTable<u32> = IdentifierTable::new();
        let i = table.intern("i");
        table.bind(i, 1);

        table.push_scope();
        table.bind(i, 2);
        assert_eq!(table.current(i), Some(2));
        table.pop_scope();

        assert_eq!(table.current(i), Some(1));
    }

    #[test]
    fn nested_scopes_restore_in_order() {
        let mut table: IdentifierTable<u32> = IdentifierTable::new();
        let i = table.intern("i");

        table.push_scope();
        table.bind(i, 1);
        table.push_scope();
        table.bind(i, 2);
        table.push_scope();
        table.bind(i, 3);

        table.pop_scope();
        assert_eq!(table.current(i), Some(2));
        table.pop_scope();
        assert_eq!(table.current(i), Some(1));
        table.pop_scope();
        assert_eq!(table.current(i), None);
    }

    #[test]
    #[should_panic]
    fn pop_without_push_panics() {
        let mut table: IdentifierTable<u32> = IdentifierTable::new();
        table.pop_scope();
    }
}
