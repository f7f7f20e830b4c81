//! Declaration contexts (§3: "form a tree rooted at the translation unit").

use super::DeclId;
use crate::define_idx;
use crate::ident::NameId;
use rustc_hash::FxHashMap;

define_idx!(pub struct DeclContextId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    TranslationUnit,
    Program,
    Subprogram,
    DerivedType,
}

/// One node in the declaration-context tree. `visible` is the "fallback
/// hash map per context" from §9's design notes: it answers "what is
/// declared directly in this context" for redeclaration checks and
/// enumeration, independent of the identifier table's front-end token.
#[derive(Debug, Clone)]
pub struct DeclContext {
    pub kind: ContextKind,
    pub parent: Option<DeclContextId>,
    pub declarations: Vec<DeclId>,
    pub children: Vec<DeclContextId>,
    pub visible: FxHashMap<NameId, DeclId>,
}

impl DeclContext {
    pub fn new(kind: ContextKind, parent: Option<DeclContextId>) -> Self {
        Self {
            kind,
            parent,
            declarations: Vec::new(),
            children: Vec::new(),
            visible: FxHashMap::default(),
        }
    }
}
