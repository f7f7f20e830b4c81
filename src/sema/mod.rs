//! Semantic analyzer (C7): consumes parser actions and builds the typed
//! declaration, expression, and statement trees (§4, §6).

mod implicit;
mod unit;

pub use implicit::ImplicitMap;
pub use unit::{DeclSpec, TranslationUnit};

use crate::options::CompileOptions;
use rayon::prelude::*;

/// Builds one independent `TranslationUnit` per entry in `jobs`, fanning
/// the work out across a `rayon` thread pool (§5: each unit's
/// construction is a pure function of its own parse stream, sharing no
/// mutable state with the others). `build` drives the parser actions for
/// one unit and extracts whatever `Send` result the caller actually
/// wants to keep — the unit itself is thread-confined and dropped at the
/// end of its closure.
pub fn compile_many<F, R>(jobs: Vec<CompileOptions>, build: F) -> Vec<R>
where
    F: Fn(&mut TranslationUnit) -> R + Sync,
    R: Send,
{
    jobs.into_par_iter()
        .map(|options| {
            let mut unit = TranslationUnit::new(options);
            build(&mut unit)
        })
        .collect()
}
