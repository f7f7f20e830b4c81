//! Declaration table: owns the context tree and the declaration arena,
//! and is the entry point the analyzer drives for scope push/pop and
//! declaration registration (§4.6 state machine).

use super::context::{ContextKind, DeclContext, DeclContextId};
use super::node::{Decl, FieldDecl, ProgramDecl, RecordDecl, SubprogramDecl, VariableDecl};
use super::DeclId;
use crate::core::Arena;
use crate::error::InternalError;
use crate::ident::NameId;
use crate::stmt::StmtId;

pub struct DeclTable {
    contexts: Arena<DeclContextId, DeclContext>,
    decls: Arena<DeclId, Decl>,
    root: DeclContextId,
    current: DeclContextId,
}

/// Returned when a name is already declared directly in the current
/// context (§7 item 2: name clash). Carries the prior declaration so the
/// caller can attach a "previous declaration is here" note.
#[derive(Debug, Clone, Copy)]
pub struct Redeclaration {
    pub previous: DeclId,
}

impl DeclTable {
    pub fn new() -> Self {
        let mut contexts = Arena::new();
        let root = contexts.alloc(DeclContext::new(ContextKind::TranslationUnit, None));
        let mut decls = Arena::new();
        decls.alloc(Decl::TranslationUnit);
        Self {
            contexts,
            decls,
            root,
            current: root,
        }
    }

    pub fn root(&self) -> DeclContextId {
        self.root
    }

    pub fn current_context(&self) -> DeclContextId {
        self.current
    }

    pub fn context(&self, id: DeclContextId) -> &DeclContext {
        self.contexts.get(id)
    }

    pub fn get(&self, id: DeclId) -> &Decl {
        self.decls.get(id)
    }

    /// Push a new context of `kind` as a child of the current one, making
    /// it current (§4.6: `ActOnMainProgram`/`ActOnSubprogram`/`ActOnDerivedTypeDecl`).
    pub fn push_context(&mut self, kind: ContextKind) -> DeclContextId {
        let parent = self.current;
        let child = self.contexts.alloc(DeclContext::new(kind, Some(parent)));
        self.contexts.get_mut(parent).children.push(child);
        self.current = child;
        tracing::trace!(?kind, context = child.index(), "push declaration context");
        child
    }

    /// Pop the current context, restoring its parent as current. Popping
    /// the root is an internal invariant violation (§4.6).
    pub fn pop_context(&mut self) -> DeclContextId {
        let popped = self.current;
        let parent = self
            .contexts
            .get(popped)
            .parent
            .unwrap_or_else(|| InternalError::PoppedRootContext.panic());
        self.current = parent;
        tracing::trace!(context = popped.index(), "pop declaration context");
        popped
    }

    /// Look up `name` directly in `ctx` (not walking parents — the caller,
    /// typically via the identifier table's front-end token, already knows
    /// whether an outer binding is visible).
    pub fn lookup_in_context(&self, ctx: DeclContextId, name: NameId) -> Option<DeclId> {
        self.contexts.get(ctx).visible.get(&name).copied()
    }

    fn register(&mut self, ctx: DeclContextId, name: NameId, decl: Decl) -> Result<DeclId, Redeclaration> {
        if let Some(previous) = self.lookup_in_context(ctx, name) {
            return Err(Redeclaration { previous });
        }
        let id = self.decls.alloc(decl);
        let context = self.contexts.get_mut(ctx);
        context.declarations.push(id);
        context.visible.insert(name, id);
        Ok(id)
    }

    pub fn declare_variable(
        &mut self,
        name: NameId,
        decl: VariableDecl,
    ) -> Result<DeclId, Redeclaration> {
        let ctx = decl.context;
        self.register(ctx, name, Decl::Variable(decl))
    }

    pub fn declare_program(&mut self, name: Option<NameId>, decl: ProgramDecl) -> DeclId {
        // Main programs live directly in the translation-unit context and
        // cannot clash with anything else declared there in this subset.
        let id = self.decls.alloc(Decl::MainProgram(decl));
        let root = self.root;
        self.contexts.get_mut(root).declarations.push(id);
        if let Some(name) = name {
            self.contexts.get_mut(root).visible.insert(name, id);
        }
        id
    }

    pub fn declare_subprogram(
        &mut self,
        ctx: DeclContextId,
        name: NameId,
        decl: SubprogramDecl,
        is_function: bool,
    ) -> Result<DeclId, Redeclaration> {
        let node = if is_function {
            Decl::Function(decl)
        } else {
            Decl::Subroutine(decl)
        };
        self.register(ctx, name, node)
    }

    pub fn declare_record(
        &mut self,
        ctx: DeclContextId,
        name: NameId,
        decl: RecordDecl,
    ) -> Result<DeclId, Redeclaration> {
        self.register(ctx, name, Decl::Record(decl))
    }

    pub fn declare_field(&mut self, record: DeclId, decl: FieldDecl) -> DeclId {
        let id = self.decls.alloc(Decl::Field(decl));
        if let Decl::Record(r) = self.decls.get_mut(record) {
            r.fields.push(id);
        }
        id
    }

    /// Union `attrs` into a variable's attribute flags (§4.5: `DIMENSION`,
    /// `EXTERNAL`, `ASYNCHRONOUS`, ... specification statements apply to
    /// an already-declared or implicitly-declared name).
    pub fn add_attrs(&mut self, decl: DeclId, attrs: crate::types::AttributeFlags) {
        if let Decl::Variable(v) = self.decls.get_mut(decl) {
            v.attrs.insert(attrs);
        }
    }

    /// Append a statement handle to a program or subprogram's body in
    /// source order (§3, §4.6).
    pub fn push_stmt(&mut self, owner: DeclId, stmt: StmtId) {
        match self.decls.get_mut(owner) {
            Decl::MainProgram(p) => p.stmts.push(stmt),
            Decl::Function(f) | Decl::Subroutine(f) => f.stmts.push(stmt),
            _ => InternalError::DanglingContext(owner.index() as u32).panic(),
        }
    }
}

impl Default for DeclTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Span;
    use crate::ident::IdentifierTable;
    use crate::types::{AttributeFlags, TypeTable};

    fn loc() -> Span {
        Span::from_coords(0, 0, 0, 1)
    }

    #[test]
    fn push_pop_restores_parent_context() {
        let mut table = DeclTable::new();
        let root = table.current_context();
        let child = table.push_context(ContextKind::Program);
        assert_ne!(root, child);
        assert_eq!(table.context(child).parent, Some(root));
        let popped = table.pop_context();
        assert_eq!(popped, child);
        assert_eq!(table.current_context(), root);
    }

    #[test]
    #[should_panic(expected = "internal invariant violation")]
    fn popping_root_panics() {
        let mut table = DeclTable::new();
        table.pop_context();
    }

    #[test]
    fn redeclaration_in_same_context_is_rejected() {
        let mut names: IdentifierTable<DeclId> = IdentifierTable::new();
        let mut types = TypeTable::new();
        let mut table = DeclTable::new();
        let ctx = table.push_context(ContextKind::Program);
        let i = names.intern("i");
        let int_ty = types.base(crate::types::BaseKind::Integer);
        let real_ty = types.base(crate::types::BaseKind::Real);

        let first = table
            .declare_variable(
                i,
                VariableDecl {
                    name: i,
                    loc: loc(),
                    ty: int_ty,
                    attrs: AttributeFlags::NONE,
                    context: ctx,
                },
            )
            .expect("first declaration succeeds");

        let second = table.declare_variable(
            i,
            VariableDecl {
                name: i,
                loc: loc(),
                ty: real_ty,
                attrs: AttributeFlags::NONE,
                context: ctx,
            },
        );

        match second {
            Err(Redeclaration { previous }) => assert_eq!(previous, first),
            Ok(_) => panic!("expected a redeclaration error"),
        }
    }
}
