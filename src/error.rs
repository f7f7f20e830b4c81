//! Internal invariant violations.
//!
//! These never cross the public API as a `Result`. The analyzer only ever
//! reaches for [`InternalError`] when a state that the state machine in
//! `sema` has already ruled out somehow occurs anyway (a corrupt handle,
//! popping the root context). Call sites immediately turn the value into a
//! panic via [`InternalError::panic`], or `.expect()`/`unreachable!()`
//! directly; the type exists only to give that panic message structure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("attempted to pop the translation-unit root context")]
    PoppedRootContext,

    #[error("declaration context handle {0:?} does not exist")]
    DanglingContext(u32),

    #[error("attempted a second BOZ coercion on an already-typed node")]
    DoubleBozCoercion,

    #[error("no enclosing scope unit to resolve label {0} against")]
    NoEnclosingScopeUnit(u32),

    #[error("label fixup site does not match the statement it names")]
    FixupSiteMismatch,
}

impl InternalError {
    /// Turn this into a panic. Centralizes the `panic!` call so every
    /// internal-invariant failure reports through the same path.
    #[track_caller]
    pub fn panic(self) -> ! {
        panic!("internal invariant violation: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let err = InternalError::DanglingContext(7);
        assert_eq!(
            err.to_string(),
            "declaration context handle 7 does not exist"
        );
    }

    #[test]
    #[should_panic(expected = "internal invariant violation")]
    fn panic_includes_prefix() {
        InternalError::PoppedRootContext.panic();
    }
}
