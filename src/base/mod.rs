//! Foundation types shared by every other layer.
//!
//! - [`Position`], [`Span`] — 0-indexed line/column source locations for AST nodes.
//!
//! This module has no dependencies on any other module in the crate.

mod position;

pub use position::{Position, Span};
