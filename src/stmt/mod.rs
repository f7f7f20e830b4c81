//! Statement tree (C6).

mod kind;
mod label;
mod table;

use crate::define_idx;

define_idx!(pub struct StmtId);

pub use kind::{
    AssignStmt, AssignedGotoStmt, AssignmentStmt, AsynchronousStmt, BlockStmt, ContinueStmt,
    DimensionStmt, ExternalStmt, FormatSpec, GotoStmt, IfBranch, IfStmt, ImplicitEntry,
    ImplicitStmt, ImportStmt, IntrinsicStmt, LetterSpec, ParameterPair, ParameterStmt, PrintStmt,
    Stmt, StopStmt, UseStmt,
};
pub use label::{Label, LabelFixupSite, LabelRef, LabelTable};
pub use table::StmtTable;
