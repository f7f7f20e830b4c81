//! Statement arena and construction entry points.

use super::kind::*;
use super::label::{Label, LabelFixupSite, LabelRef};
use super::StmtId;
use crate::core::Arena;
use crate::decl::DeclId;
use crate::error::InternalError;
use crate::expr::ExprId;

pub struct StmtTable {
    arena: Arena<StmtId, Stmt>,
}

impl StmtTable {
    pub fn new() -> Self {
        Self { arena: Arena::new() }
    }

    pub fn get(&self, id: StmtId) -> &Stmt {
        self.arena.get(id)
    }

    fn alloc(&mut self, stmt: Stmt) -> StmtId {
        self.arena.alloc(stmt)
    }

    pub fn make_implicit(&mut self, stmt: ImplicitStmt) -> StmtId {
        self.alloc(Stmt::Implicit(stmt))
    }

    pub fn make_parameter(&mut self, stmt: ParameterStmt) -> StmtId {
        self.alloc(Stmt::Parameter(stmt))
    }

    pub fn make_dimension(&mut self, stmt: DimensionStmt) -> StmtId {
        self.alloc(Stmt::Dimension(stmt))
    }

    pub fn make_external(&mut self, stmt: ExternalStmt) -> StmtId {
        self.alloc(Stmt::External(stmt))
    }

    pub fn make_intrinsic(&mut self, stmt: IntrinsicStmt) -> StmtId {
        self.alloc(Stmt::Intrinsic(stmt))
    }

    pub fn make_asynchronous(&mut self, stmt: AsynchronousStmt) -> StmtId {
        self.alloc(Stmt::Asynchronous(stmt))
    }

    pub fn make_use(&mut self, stmt: UseStmt) -> StmtId {
        self.alloc(Stmt::Use(stmt))
    }

    pub fn make_import(&mut self, stmt: ImportStmt) -> StmtId {
        self.alloc(Stmt::Import(stmt))
    }

    pub fn make_assignment(&mut self, label: Option<Label>, lhs: ExprId, rhs: ExprId) -> StmtId {
        self.alloc(Stmt::Assignment(AssignmentStmt { label, lhs, rhs }))
    }

    pub fn make_if(&mut self, label: Option<Label>, branches: Vec<IfBranch>) -> StmtId {
        self.alloc(Stmt::If(IfStmt { label, branches }))
    }

    pub fn make_continue(&mut self, label: Option<Label>) -> StmtId {
        self.alloc(Stmt::Continue(ContinueStmt { label }))
    }

    pub fn make_stop(&mut self, label: Option<Label>, code: Option<ExprId>) -> StmtId {
        self.alloc(Stmt::Stop(StopStmt { label, code }))
    }

    pub fn make_goto(&mut self, label: Option<Label>, target: Label) -> StmtId {
        self.alloc(Stmt::Goto(GotoStmt {
            label,
            target: LabelRef::Unresolved(target),
        }))
    }

    pub fn make_assign(&mut self, label: Option<Label>, target: Label, var: DeclId) -> StmtId {
        self.alloc(Stmt::Assign(AssignStmt {
            label,
            target: LabelRef::Unresolved(target),
            var,
        }))
    }

    pub fn make_assigned_goto(
        &mut self,
        label: Option<Label>,
        var: DeclId,
        allowed_labels: Vec<Label>,
    ) -> StmtId {
        let allowed = allowed_labels.into_iter().map(LabelRef::Unresolved).collect();
        self.alloc(Stmt::AssignedGoto(AssignedGotoStmt { label, var, allowed }))
    }

    pub fn make_print(&mut self, label: Option<Label>, format: FormatSpec, items: Vec<ExprId>) -> StmtId {
        self.alloc(Stmt::Print(PrintStmt { label, format, items }))
    }

    pub fn make_block(&mut self, label: Option<Label>, stmts: Vec<StmtId>) -> StmtId {
        self.alloc(Stmt::Block(BlockStmt { label, stmts }))
    }

    /// Rewrites a pending label reference to its resolved target (§4.5).
    /// `site` names exactly which statement and field to patch; a
    /// mismatch between `site` and the statement's actual shape is an
    /// internal invariant violation, since the analyzer constructs both
    /// from the same pending-reference record.
    pub fn apply_fixup(&mut self, site: LabelFixupSite, target: StmtId) {
        match site {
            LabelFixupSite::Goto(id) => match self.arena.get_mut(id) {
                Stmt::Goto(g) => g.target = LabelRef::Resolved(target),
                _ => InternalError::FixupSiteMismatch.panic(),
            },
            LabelFixupSite::Assign(id) => match self.arena.get_mut(id) {
                Stmt::Assign(a) => a.target = LabelRef::Resolved(target),
                _ => InternalError::FixupSiteMismatch.panic(),
            },
            LabelFixupSite::AssignedGotoEntry(id, index) => match self.arena.get_mut(id) {
                Stmt::AssignedGoto(a) => a.allowed[index] = LabelRef::Resolved(target),
                _ => InternalError::FixupSiteMismatch.panic(),
            },
        }
    }
}

impl Default for StmtTable {
    fn default() -> Self {
        Self::new()
    }
}
