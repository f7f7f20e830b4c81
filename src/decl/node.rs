//! Declaration node variants (§3).

use super::context::DeclContextId;
use crate::base::Span;
use crate::define_idx;
use crate::ident::NameId;
use crate::stmt::StmtId;
use crate::types::{AttributeFlags, TypeId};

define_idx!(pub struct DeclId);

#[derive(Debug, Clone)]
pub struct ProgramDecl {
    pub name: Option<NameId>,
    pub loc: Span,
    pub name_loc: Span,
    pub body: DeclContextId,
    /// Executable statements in source order, appended as the analyzer
    /// walks the program body.
    pub stmts: Vec<StmtId>,
}

#[derive(Debug, Clone)]
pub struct SubprogramDecl {
    pub name: NameId,
    pub loc: Span,
    pub name_loc: Span,
    pub params: Vec<DeclId>,
    /// `Some` for functions, `None` for subroutines.
    pub return_type: Option<TypeId>,
    pub body: DeclContextId,
    pub stmts: Vec<StmtId>,
}

#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub name: NameId,
    pub loc: Span,
    pub ty: TypeId,
    pub attrs: AttributeFlags,
    pub context: DeclContextId,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: NameId,
    pub loc: Span,
    pub ty: TypeId,
    pub record: DeclId,
}

#[derive(Debug, Clone)]
pub struct RecordDecl {
    pub name: NameId,
    pub loc: Span,
    pub fields: Vec<DeclId>,
    pub body: DeclContextId,
}

/// A declaration-tree node. Variants match §3 exactly: translation-unit,
/// main-program, function, subroutine, variable, field, record.
#[derive(Debug, Clone)]
pub enum Decl {
    TranslationUnit,
    MainProgram(ProgramDecl),
    Function(SubprogramDecl),
    Subroutine(SubprogramDecl),
    Variable(VariableDecl),
    Field(FieldDecl),
    Record(RecordDecl),
}

impl Decl {
    pub fn name(&self) -> Option<NameId> {
        match self {
            Decl::TranslationUnit => None,
            Decl::MainProgram(p) => p.name,
            Decl::Function(f) | Decl::Subroutine(f) => Some(f.name),
            Decl::Variable(v) => Some(v.name),
            Decl::Field(f) => Some(f.name),
            Decl::Record(r) => Some(r.name),
        }
    }

    pub fn loc(&self) -> Option<Span> {
        match self {
            Decl::TranslationUnit => None,
            Decl::MainProgram(p) => Some(p.loc),
            Decl::Function(f) | Decl::Subroutine(f) => Some(f.loc),
            Decl::Variable(v) => Some(v.loc),
            Decl::Field(f) => Some(f.loc),
            Decl::Record(r) => Some(r.loc),
        }
    }

    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Decl::Variable(v) => Some(v.ty),
            Decl::Field(f) => Some(f.ty),
            Decl::Function(f) => f.return_type,
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Decl::Variable(_))
    }
}
