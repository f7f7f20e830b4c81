//! Compile-time configuration passed once at `TranslationUnit::new`.

/// The fatal-diagnostic threshold (§5: "An implementation may offer a
/// fatal-count threshold that aborts further construction"), plus
/// reserved default storage widths, in bytes, for each numeric/logical
/// base type. Only `fatal_limit` is read today: `TypeTable`'s six base
/// types are fixed singletons with no kind parameter, and `on_type_name`
/// only ever sees a kind selector the parser supplies explicitly, so the
/// width fields are settable and independently tested but not yet
/// threaded into type construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub default_integer_kind: u32,
    pub default_real_kind: u32,
    pub double_precision_kind: u32,
    pub default_logical_kind: u32,
    pub default_character_kind: u32,
    /// Number of fatal-severity diagnostics after which construction stops
    /// early. `None` means never stop early.
    pub fatal_limit: Option<u32>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            default_integer_kind: 4,
            default_real_kind: 4,
            double_precision_kind: 8,
            default_logical_kind: 4,
            default_character_kind: 1,
            fatal_limit: None,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_integer_kind(mut self, kind: u32) -> Self {
        self.default_integer_kind = kind;
        self
    }

    pub fn with_default_real_kind(mut self, kind: u32) -> Self {
        self.default_real_kind = kind;
        self
    }

    pub fn with_fatal_limit(mut self, limit: u32) -> Self {
        self.fatal_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_widths() {
        let opts = CompileOptions::default();
        assert_eq!(opts.default_integer_kind, 4);
        assert_eq!(opts.double_precision_kind, 8);
        assert_eq!(opts.fatal_limit, None);
    }

    #[test]
    fn builder_methods_chain() {
        let opts = CompileOptions::new()
            .with_default_integer_kind(8)
            .with_fatal_limit(20);
        assert_eq!(opts.default_integer_kind, 8);
        assert_eq!(opts.fatal_limit, Some(20));
    }
}
