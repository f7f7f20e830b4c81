//! Implicit-typing letter map (§1.2, §4.5): a 26-entry table from the
//! first letter of an undeclared name to the type it takes on. Scoped
//! per program unit, so it lives on a stack the analyzer pushes and pops
//! alongside declaration contexts.

use crate::stmt::LetterSpec;
use crate::types::{BaseKind, TypeId, TypeTable};

fn letter_index(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    if c.is_ascii_lowercase() {
        Some((c as u8 - b'a') as usize)
    } else {
        None
    }
}

/// One program unit's implicit-typing state. `IMPLICIT NONE` sets `none`
/// and clears every entry; a name under it has no implicit type at all.
/// Entries hold a full [`TypeId`] rather than a bare [`BaseKind`] so that
/// an `IMPLICIT` statement's kind/length selector survives into every
/// name it covers (§4.5).
#[derive(Debug, Clone)]
pub struct ImplicitMap {
    letters: [Option<TypeId>; 26],
    none: bool,
}

impl ImplicitMap {
    /// The standard default: `I`-`N` implicit `INTEGER`, everything else
    /// implicit `REAL` (§1.2).
    pub fn defaults(types: &TypeTable) -> Self {
        let real = types.base(BaseKind::Real);
        let integer = types.base(BaseKind::Integer);
        let mut letters = [Some(real); 26];
        for c in 'i'..='n' {
            letters[letter_index(c).unwrap()] = Some(integer);
        }
        Self { letters, none: false }
    }

    pub fn set_none(&mut self) {
        self.none = true;
        self.letters = [None; 26];
    }

    pub fn is_none(&self) -> bool {
        self.none
    }

    /// Apply one `IMPLICIT` entry's letter set to `ty`, overwriting
    /// whatever those letters previously mapped to.
    pub fn apply(&mut self, ty: TypeId, letters: &[LetterSpec]) {
        for spec in letters {
            match *spec {
                LetterSpec::Single(c) => {
                    if let Some(i) = letter_index(c) {
                        self.letters[i] = Some(ty);
                    }
                }
                LetterSpec::Range(start, end) => {
                    let (Some(lo), Some(hi)) = (letter_index(start), letter_index(end)) else {
                        continue;
                    };
                    for i in lo..=hi {
                        self.letters[i] = Some(ty);
                    }
                }
            }
        }
    }

    /// The implicit type for a name starting with `first_letter`, or
    /// `None` under `IMPLICIT NONE` (the caller must then diagnose an
    /// undeclared-name error, §7 item 3).
    pub fn lookup(&self, first_letter: char) -> Option<TypeId> {
        if self.none {
            return None;
        }
        letter_index(first_letter).and_then(|i| self.letters[i])
    }
}
