//! Declaration tree (C4): nested declaration contexts and the
//! declarations that live in them.

mod context;
mod node;
mod table;

pub use context::{ContextKind, DeclContext, DeclContextId};
pub use node::{Decl, DeclId, FieldDecl, ProgramDecl, RecordDecl, SubprogramDecl, VariableDecl};
pub use table::{DeclTable, Redeclaration};
