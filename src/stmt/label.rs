//! Statement labels as a first-class numeric domain (§1.2) and the
//! forward-reference bookkeeping they need (§3, §4.5).

use super::StmtId;
use rustc_hash::FxHashMap;

/// A statement label: a numeric literal in `1..=99999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

impl Label {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 99_999;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// A control-flow target that starts out holding a label token and is
/// fixed up to a statement handle once the target is found (§3, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRef {
    Unresolved(Label),
    Resolved(StmtId),
}

impl LabelRef {
    pub fn label_token(self) -> Option<Label> {
        match self {
            LabelRef::Unresolved(l) => Some(l),
            LabelRef::Resolved(_) => None,
        }
    }

    pub fn resolved(self) -> Option<StmtId> {
        match self {
            LabelRef::Resolved(s) => Some(s),
            LabelRef::Unresolved(_) => None,
        }
    }
}

/// Identifies exactly which field of which statement a pending label
/// reference needs to patch, since `GotoStmt`, `AssignStmt`, and
/// `AssignedGotoStmt` shape their label references differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFixupSite {
    Goto(StmtId),
    Assign(StmtId),
    AssignedGotoEntry(StmtId, usize),
}

/// Maps defined labels to the statement they mark, scoped to one program
/// unit (§4.5: "The statement label table is a mapping from integer label
/// ... to statement handle").
#[derive(Debug, Default)]
pub struct LabelTable {
    defined: FxHashMap<Label, StmtId>,
    pending: Vec<(LabelFixupSite, Label)>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `label` as naming `stmt`. Returns the previously-defined
    /// statement if `label` was already bound in this scope unit.
    pub fn define(&mut self, label: Label, stmt: StmtId) -> Result<(), StmtId> {
        if let Some(&previous) = self.defined.get(&label) {
            return Err(previous);
        }
        self.defined.insert(label, stmt);
        Ok(())
    }

    pub fn resolve(&self, label: Label) -> Option<StmtId> {
        self.defined.get(&label).copied()
    }

    /// Record a forward reference to be fixed up once the scope unit ends.
    pub fn add_pending(&mut self, site: LabelFixupSite, label: Label) {
        self.pending.push((site, label));
    }

    /// Drains the pending list, partitioning into `(site, target)` pairs
    /// that resolved and the labels that never got a matching definition
    /// (§4.5: "an unresolved label at scope-unit end is a fatal error").
    pub fn drain_pending(&mut self) -> (Vec<(LabelFixupSite, StmtId)>, Vec<Label>) {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for (site, label) in self.pending.drain(..) {
            match self.defined.get(&label) {
                Some(&target) => resolved.push((site, target)),
                None => unresolved.push(label),
            }
        }
        (resolved, unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(n: usize) -> StmtId {
        StmtId::new(n)
    }

    #[test]
    fn label_domain_is_bounded() {
        assert!(Label::new(0).is_none());
        assert!(Label::new(1).is_some());
        assert!(Label::new(99_999).is_some());
        assert!(Label::new(100_000).is_none());
    }

    #[test]
    fn forward_reference_resolves_after_definition() {
        let mut table = LabelTable::new();
        let l = Label::new(100).unwrap();
        table.add_pending(LabelFixupSite::Goto(stmt(0)), l);
        table.define(l, stmt(1)).unwrap();
        let (resolved, unresolved) = table.drain_pending();
        assert_eq!(resolved, vec![(LabelFixupSite::Goto(stmt(0)), stmt(1))]);
        assert!(unresolved.is_empty());
    }

    #[test]
    fn missing_definition_is_reported_unresolved() {
        let mut table = LabelTable::new();
        let l = Label::new(100).unwrap();
        table.add_pending(LabelFixupSite::Goto(stmt(0)), l);
        let (resolved, unresolved) = table.drain_pending();
        assert!(resolved.is_empty());
        assert_eq!(unresolved, vec![l]);
    }

    #[test]
    fn redefining_a_label_in_the_same_scope_is_rejected() {
        let mut table = LabelTable::new();
        let l = Label::new(100).unwrap();
        table.define(l, stmt(0)).unwrap();
        assert_eq!(table.define(l, stmt(1)), Err(stmt(0)));
    }
}
