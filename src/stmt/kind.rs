//! Statement node payloads (§3, §4.5, §6).

use super::label::{Label, LabelRef};
use super::StmtId;
use crate::decl::DeclId;
use crate::expr::ExprId;
use crate::ident::NameId;
use crate::types::TypeId;

/// A letter or letter-range operand of an `IMPLICIT` entry (§1.2):
/// `IMPLICIT INTEGER (I-N), REAL (A-H, O-Z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterSpec {
    Single(char),
    Range(char, char),
}

#[derive(Debug, Clone)]
pub struct ImplicitEntry {
    pub ty: TypeId,
    pub letters: Vec<LetterSpec>,
}

#[derive(Debug, Clone)]
pub struct ImplicitStmt {
    pub label: Option<Label>,
    /// `None` entries and `none == true` together model `IMPLICIT NONE`.
    pub entries: Vec<ImplicitEntry>,
    pub none: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterPair {
    pub name: NameId,
    pub decl: DeclId,
    pub value: ExprId,
}

#[derive(Debug, Clone)]
pub struct ParameterStmt {
    pub label: Option<Label>,
    pub pairs: Vec<ParameterPair>,
}

#[derive(Debug, Clone)]
pub struct DimensionStmt {
    pub label: Option<Label>,
    pub vars: Vec<DeclId>,
}

#[derive(Debug, Clone)]
pub struct ExternalStmt {
    pub label: Option<Label>,
    pub names: Vec<DeclId>,
}

#[derive(Debug, Clone)]
pub struct IntrinsicStmt {
    pub label: Option<Label>,
    pub names: Vec<NameId>,
}

#[derive(Debug, Clone)]
pub struct AsynchronousStmt {
    pub label: Option<Label>,
    pub vars: Vec<DeclId>,
}

#[derive(Debug, Clone)]
pub struct UseStmt {
    pub label: Option<Label>,
    pub module: NameId,
}

#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub label: Option<Label>,
    pub names: Vec<NameId>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentStmt {
    pub label: Option<Label>,
    pub lhs: ExprId,
    pub rhs: ExprId,
}

/// One `IF`/`ELSE IF`/`ELSE` arm. `cond == None` marks the `ELSE` arm.
#[derive(Debug, Clone)]
pub struct IfBranch {
    pub cond: Option<ExprId>,
    pub body: Vec<StmtId>,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub label: Option<Label>,
    pub branches: Vec<IfBranch>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContinueStmt {
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Copy)]
pub struct StopStmt {
    pub label: Option<Label>,
    pub code: Option<ExprId>,
}

#[derive(Debug, Clone, Copy)]
pub struct GotoStmt {
    pub label: Option<Label>,
    pub target: LabelRef,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignStmt {
    pub label: Option<Label>,
    pub target: LabelRef,
    pub var: DeclId,
}

#[derive(Debug, Clone)]
pub struct AssignedGotoStmt {
    pub label: Option<Label>,
    pub var: DeclId,
    pub allowed: Vec<LabelRef>,
}

/// `star()`, `default_char_expr()`, or an explicit format label (§6).
#[derive(Debug, Clone, Copy)]
pub enum FormatSpec {
    Star,
    CharExpr(ExprId),
    Label(Label),
}

#[derive(Debug, Clone)]
pub struct PrintStmt {
    pub label: Option<Label>,
    pub format: FormatSpec,
    pub items: Vec<ExprId>,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub label: Option<Label>,
    pub stmts: Vec<StmtId>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Implicit(ImplicitStmt),
    Parameter(ParameterStmt),
    Dimension(DimensionStmt),
    External(ExternalStmt),
    Intrinsic(IntrinsicStmt),
    Asynchronous(AsynchronousStmt),
    Use(UseStmt),
    Import(ImportStmt),

    Assignment(AssignmentStmt),
    If(IfStmt),
    Continue(ContinueStmt),
    Stop(StopStmt),
    Goto(GotoStmt),
    Assign(AssignStmt),
    AssignedGoto(AssignedGotoStmt),
    Print(PrintStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn label(&self) -> Option<Label> {
        match self {
            Stmt::Implicit(s) => s.label,
            Stmt::Parameter(s) => s.label,
            Stmt::Dimension(s) => s.label,
            Stmt::External(s) => s.label,
            Stmt::Intrinsic(s) => s.label,
            Stmt::Asynchronous(s) => s.label,
            Stmt::Use(s) => s.label,
            Stmt::Import(s) => s.label,
            Stmt::Assignment(s) => s.label,
            Stmt::If(s) => s.label,
            Stmt::Continue(s) => s.label,
            Stmt::Stop(s) => s.label,
            Stmt::Goto(s) => s.label,
            Stmt::Assign(s) => s.label,
            Stmt::AssignedGoto(s) => s.label,
            Stmt::Print(s) => s.label,
            Stmt::Block(s) => s.label,
        }
    }
}
