//! Arena and interning substrate (C1).
//!
//! `Arena<Idx, T>` gives every node family stable, append-only storage;
//! `InternTable` builds content-addressed dedup on top of it keyed by a
//! structural profile; `Interner` is the string interner backing the
//! identifier table (`crate::ident`).

pub mod arena;
pub mod intern_table;
pub mod interner;

pub use arena::{Arena, ArenaIdx};
pub use intern_table::InternTable;
pub use interner::{IStr, Interner};
