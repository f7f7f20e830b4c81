//! The semantic analyzer (C7): one struct exposing one method per parser
//! action (§6), orchestrating the arena/interning substrate, identifier
//! table, type system, declaration tree, expression tree, and statement
//! tree into a single typed, resolved AST.

use super::implicit::ImplicitMap;
use crate::base::Span;
use crate::decl::{ContextKind, DeclContextId, DeclId, DeclTable, FieldDecl, ProgramDecl, RecordDecl, Redeclaration, SubprogramDecl, VariableDecl};
use crate::diag::{Diagnostic, DiagnosticEngine, RelatedInfo};
use crate::error::InternalError;
use crate::expr::{BinaryOp, ConstantMeta, ExprId, ExprTable, IntrinsicKind, UnaryOp};
use crate::ident::IdentifierTable;
use crate::options::CompileOptions;
use crate::stmt::{
    FormatSpec, IfBranch, Label, LabelFixupSite, LabelTable, LetterSpec, ParameterPair, StmtId,
    StmtTable,
};
use crate::types::{AttributeFlags, BaseKind, DimSpec, TypeId, TypeTable};

/// A type and qualifier bundle as the parser hands it to `on_type_name`,
/// before any per-entity array shape is layered on (§4.3).
#[derive(Debug, Clone)]
pub struct DeclSpec {
    pub base: BaseKind,
    pub kind: Option<ExprId>,
    pub length: Option<ExprId>,
    pub attrs: AttributeFlags,
}

/// Per-scope-unit state: the declaration context it owns, its
/// implicit-typing map, and its pending label table (§4.5, §4.6).
struct Frame {
    owner: DeclId,
    kind: ContextKind,
    context: DeclContextId,
    implicit: ImplicitMap,
    labels: LabelTable,
}

/// Owns every arena and table for one compilation and exposes the full
/// parser-facing action surface (§6). Single-threaded, single-owner
/// (§5): independent translation units share nothing and may be built
/// concurrently by the caller, e.g. with `rayon`.
pub struct TranslationUnit {
    pub names: IdentifierTable<DeclId>,
    pub types: TypeTable,
    pub decls: DeclTable,
    pub exprs: ExprTable,
    pub stmts: StmtTable,
    pub diagnostics: DiagnosticEngine,
    options: CompileOptions,
    frames: Vec<Frame>,
    stopped: bool,
}

impl TranslationUnit {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            names: IdentifierTable::new(),
            types: TypeTable::new(),
            decls: DeclTable::new(),
            exprs: ExprTable::new(),
            stmts: StmtTable::new(),
            diagnostics: DiagnosticEngine::new(),
            options,
            frames: Vec::new(),
            stopped: false,
        }
    }

    /// `false` once `CompileOptions::fatal_limit` has been reached;
    /// already-built nodes stay valid but the caller should stop driving
    /// further actions (§5).
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn report(&mut self, diag: Diagnostic) {
        if !self.diagnostics.report(diag, self.options.fatal_limit) {
            self.stopped = true;
        }
    }

    fn current_frame(&self) -> &Frame {
        self.frames
            .last()
            .unwrap_or_else(|| InternalError::NoEnclosingScopeUnit(0).panic())
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .unwrap_or_else(|| InternalError::NoEnclosingScopeUnit(0).panic())
    }

    fn define_label(&mut self, label: Option<Label>, stmt: StmtId, loc: Span) {
        let Some(l) = label else { return };
        let result = self.current_frame_mut().labels.define(l, stmt);
        if result.is_err() {
            self.report(Diagnostic::error(loc, "redefinition of label %0").with_arg(l.value() as i64));
        }
    }

    fn resolve_labels(&mut self, mut labels: LabelTable, loc: Span) {
        let (resolved, unresolved) = labels.drain_pending();
        for (site, target) in resolved {
            self.stmts.apply_fixup(site, target);
        }
        for l in unresolved {
            self.report(
                Diagnostic::fatal(loc, "reference to undefined statement label %0").with_arg(l.value() as i64),
            );
        }
    }

    // ---- Translation-unit lifecycle (§6) -------------------------------

    pub fn begin_unit(&mut self) {
        tracing::trace!("begin translation unit");
    }

    pub fn end_unit(&mut self) -> bool {
        tracing::trace!(diagnostics = self.diagnostics.len(), "end translation unit");
        !self.diagnostics.had_errors()
    }

    // ---- Program unit lifecycle (§6, §4.6) -----------------------------

    pub fn begin_main_program(&mut self, name: Option<&str>, loc: Span, name_loc: Span) -> DeclId {
        tracing::trace!(?name, "begin main program");
        let name_id = name.map(|n| self.names.intern(n));
        let context = self.decls.push_context(ContextKind::Program);
        self.names.push_scope();
        let decl = ProgramDecl {
            name: name_id,
            loc,
            name_loc,
            body: context,
            stmts: Vec::new(),
        };
        let id = self.decls.declare_program(name_id, decl);
        if let Some(n) = name_id {
            self.names.bind(n, id);
        }
        self.frames.push(Frame {
            owner: id,
            kind: ContextKind::Program,
            context,
            implicit: ImplicitMap::defaults(&self.types),
            labels: LabelTable::new(),
        });
        id
    }

    /// `body` is the program's top-level statement sequence in source
    /// order, assembled by the caller exactly as it assembles an
    /// `IfBranch`'s or `on_block`'s statement list — construction and
    /// placement stay separate for every statement kind (§4.6).
    pub fn end_main_program(&mut self, body: Vec<StmtId>, loc: Span, label: Option<Label>) -> DeclId {
        tracing::trace!("end main program");
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| InternalError::NoEnclosingScopeUnit(0).panic());
        debug_assert_eq!(frame.kind, ContextKind::Program);
        self.finish_program_unit(frame, body, loc, label)
    }

    pub fn begin_subprogram(
        &mut self,
        name: &str,
        loc: Span,
        name_loc: Span,
        is_function: bool,
        return_type: Option<TypeId>,
    ) -> DeclId {
        tracing::trace!(name, is_function, "begin subprogram");
        let name_id = self.names.intern(name);
        let enclosing = self.decls.current_context();
        let context = self.decls.push_context(ContextKind::Subprogram);
        self.names.push_scope();
        let decl = SubprogramDecl {
            name: name_id,
            loc,
            name_loc,
            params: Vec::new(),
            return_type,
            body: context,
            stmts: Vec::new(),
        };
        let id = match self.decls.declare_subprogram(enclosing, name_id, decl, is_function) {
            Ok(id) => id,
            Err(Redeclaration { previous }) => {
                self.emit_redeclaration(name, loc, previous);
                previous
            }
        };
        self.names.bind(name_id, id);
        self.frames.push(Frame {
            owner: id,
            kind: ContextKind::Subprogram,
            context,
            implicit: ImplicitMap::defaults(&self.types),
            labels: LabelTable::new(),
        });
        id
    }

    pub fn end_subprogram(&mut self, body: Vec<StmtId>, loc: Span, label: Option<Label>) -> DeclId {
        tracing::trace!("end subprogram");
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| InternalError::NoEnclosingScopeUnit(0).panic());
        debug_assert_eq!(frame.kind, ContextKind::Subprogram);
        self.finish_program_unit(frame, body, loc, label)
    }

    fn finish_program_unit(&mut self, frame: Frame, body: Vec<StmtId>, loc: Span, label: Option<Label>) -> DeclId {
        let owner = frame.owner;
        for stmt in body {
            self.decls.push_stmt(owner, stmt);
        }
        let mut labels = frame.labels;
        if let Some(l) = label {
            let marker = self.stmts.make_continue(Some(l));
            if labels.define(l, marker).is_err() {
                self.report(Diagnostic::error(loc, "redefinition of label %0").with_arg(l.value() as i64));
            }
            self.decls.push_stmt(owner, marker);
        }
        self.resolve_labels(labels, loc);
        self.decls.pop_context();
        self.names.pop_scope();
        owner
    }

    /// §9 open-question resolution: a function's `RETURN` value is
    /// always re-typed to the declared return type via the same
    /// implicit-cast machinery as assignment, including character
    /// returns (length coercion itself stays a backend concern).
    pub fn on_return_value(&mut self, owner: DeclId, expr: ExprId, loc: Span) -> ExprId {
        let return_type = self.decls.get(owner).ty();
        match return_type {
            Some(ty) => self.exprs.cast_to(expr, ty, loc),
            None => expr,
        }
    }

    // ---- Derived-type lifecycle (§4.6 `Stype`) -------------------------

    pub fn begin_derived_type(&mut self, name: &str, loc: Span, name_loc: Span) -> DeclId {
        tracing::trace!(name, "begin derived type");
        let _ = name_loc;
        let name_id = self.names.intern(name);
        let enclosing = self.decls.current_context();
        let context = self.decls.push_context(ContextKind::DerivedType);
        let decl = RecordDecl {
            name: name_id,
            loc,
            fields: Vec::new(),
            body: context,
        };
        let id = match self.decls.declare_record(enclosing, name_id, decl) {
            Ok(id) => id,
            Err(Redeclaration { previous }) => {
                self.emit_redeclaration(name, loc, previous);
                previous
            }
        };
        self.names.bind(name_id, id);
        self.names.push_scope();
        self.frames.push(Frame {
            owner: id,
            kind: ContextKind::DerivedType,
            context,
            implicit: ImplicitMap::defaults(&self.types),
            labels: LabelTable::new(),
        });
        id
    }

    pub fn end_derived_type(&mut self) -> DeclId {
        tracing::trace!("end derived type");
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| InternalError::NoEnclosingScopeUnit(0).panic());
        debug_assert_eq!(frame.kind, ContextKind::DerivedType);
        self.decls.pop_context();
        self.names.pop_scope();
        frame.owner
    }

    pub fn on_field_decl(&mut self, ty: TypeId, loc: Span, name: &str) -> DeclId {
        let name_id = self.names.intern(name);
        let record = self.current_frame().owner;
        let decl = FieldDecl { name: name_id, loc, ty, record };
        let id = self.decls.declare_field(record, decl);
        self.names.bind(name_id, id);
        id
    }

    fn emit_redeclaration(&mut self, name: &str, loc: Span, previous: DeclId) {
        let prev_loc = self.decls.get(previous).loc().unwrap_or(loc);
        self.report(
            Diagnostic::error(loc, "redeclaration of %q0")
                .with_arg(name)
                .with_related(RelatedInfo::new(prev_loc, "previous declaration is here")),
        );
    }

    /// Resolve `name` to its currently-visible declaration, or
    /// implicitly declare it under the enclosing scope unit's
    /// letter map (§4.5, §7 item 3). Used by `on_var_ref` and exposed
    /// directly as `on_implicit_entity_decl` for call sites that only
    /// need the declaration itself.
    fn declare_or_resolve(&mut self, loc: Span, name: &str) -> DeclId {
        let name_id = self.names.intern(name);
        if let Some(existing) = self.names.current(name_id) {
            return existing;
        }
        let first_letter = name.chars().next().unwrap_or('a');
        let frame = self.current_frame();
        let context = frame.context;
        let implicit_ty = frame.implicit.lookup(first_letter);
        let ty = match implicit_ty {
            Some(ty) => ty,
            None => {
                self.report(Diagnostic::error(loc, "undeclared identifier %q0 under IMPLICIT NONE").with_arg(name));
                self.types.base(BaseKind::Real)
            }
        };
        let decl = VariableDecl {
            name: name_id,
            loc,
            ty,
            attrs: AttributeFlags::NONE,
            context,
        };
        let id = match self.decls.declare_variable(name_id, decl) {
            Ok(id) => id,
            Err(_) => unreachable!("identifier table and declaration context visibility diverged"),
        };
        self.names.bind(name_id, id);
        id
    }

    // ---- Specification statements (§6) ---------------------------------

    pub fn on_type_name(&mut self, spec: DeclSpec) -> TypeId {
        self.types.make_qualified(spec.base, spec.kind, spec.length, spec.attrs)
    }

    pub fn on_entity_decl(&mut self, ty: TypeId, loc: Span, name: &str, dims: Vec<DimSpec>) -> Option<DeclId> {
        let name_id = self.names.intern(name);
        let ty = if dims.is_empty() { ty } else { self.types.make_array(ty, dims) };
        let context = self.current_frame().context;
        let decl = VariableDecl {
            name: name_id,
            loc,
            ty,
            attrs: AttributeFlags::NONE,
            context,
        };
        match self.decls.declare_variable(name_id, decl) {
            Ok(id) => {
                self.names.bind(name_id, id);
                Some(id)
            }
            Err(Redeclaration { previous }) => {
                self.emit_redeclaration(name, loc, previous);
                None
            }
        }
    }

    pub fn on_implicit_entity_decl(&mut self, loc: Span, name: &str) -> Option<DeclId> {
        Some(self.declare_or_resolve(loc, name))
    }

    pub fn on_implicit(
        &mut self,
        loc: Span,
        spec: Option<DeclSpec>,
        letters: Vec<LetterSpec>,
        none: bool,
        label: Option<Label>,
    ) -> StmtId {
        let ty = spec.map(|s| self.types.make_qualified(s.base, s.kind, s.length, s.attrs));
        if none {
            self.current_frame_mut().implicit.set_none();
        } else if let Some(ty) = ty {
            self.current_frame_mut().implicit.apply(ty, &letters);
        }
        let entries = match ty {
            Some(ty) => vec![crate::stmt::ImplicitEntry { ty, letters }],
            None => Vec::new(),
        };
        let stmt = self.stmts.make_implicit(crate::stmt::ImplicitStmt { label, entries, none });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_parameter_pair(&mut self, loc: Span, name: &str, value: ExprId) -> Option<ParameterPair> {
        if !self.exprs.is_evaluable(value) {
            let offenders = self.exprs.gather_non_evaluable_children(value);
            let bad = offenders.first().copied().unwrap_or(value);
            let bad_loc = self.exprs.loc_of(bad);
            self.report(Diagnostic::error(bad_loc, "not a constant expression"));
        }
        let name_id = self.names.intern(name);
        let ty = self.exprs.ty_of(value);
        let context = self.current_frame().context;
        let decl = VariableDecl {
            name: name_id,
            loc,
            ty,
            attrs: AttributeFlags::PARAMETER,
            context,
        };
        match self.decls.declare_variable(name_id, decl) {
            Ok(id) => {
                self.names.bind(name_id, id);
                Some(ParameterPair { name: name_id, decl: id, value })
            }
            Err(Redeclaration { previous }) => {
                self.emit_redeclaration(name, loc, previous);
                None
            }
        }
    }

    pub fn on_parameter(&mut self, loc: Span, pairs: Vec<ParameterPair>, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_parameter(crate::stmt::ParameterStmt { label, pairs });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_dimension(&mut self, loc: Span, names: Vec<&str>, label: Option<Label>) -> StmtId {
        let vars: Vec<DeclId> = names
            .into_iter()
            .map(|n| {
                let id = self.declare_or_resolve(loc, n);
                self.decls.add_attrs(id, AttributeFlags::DIMENSION);
                id
            })
            .collect();
        let stmt = self.stmts.make_dimension(crate::stmt::DimensionStmt { label, vars });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_external(&mut self, loc: Span, names: Vec<&str>, label: Option<Label>) -> StmtId {
        let vars: Vec<DeclId> = names
            .into_iter()
            .map(|n| {
                let id = self.declare_or_resolve(loc, n);
                self.decls.add_attrs(id, AttributeFlags::EXTERNAL);
                id
            })
            .collect();
        let stmt = self.stmts.make_external(crate::stmt::ExternalStmt { label, names: vars });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_intrinsic(&mut self, loc: Span, names: Vec<&str>, label: Option<Label>) -> StmtId {
        let names = names.into_iter().map(|n| self.names.intern(n)).collect();
        let stmt = self.stmts.make_intrinsic(crate::stmt::IntrinsicStmt { label, names });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_asynchronous(&mut self, loc: Span, names: Vec<&str>, label: Option<Label>) -> StmtId {
        let vars: Vec<DeclId> = names
            .into_iter()
            .map(|n| {
                let id = self.declare_or_resolve(loc, n);
                self.decls.add_attrs(id, AttributeFlags::ASYNCHRONOUS);
                id
            })
            .collect();
        let stmt = self.stmts.make_asynchronous(crate::stmt::AsynchronousStmt { label, vars });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_use(&mut self, loc: Span, module: &str, label: Option<Label>) -> StmtId {
        let module = self.names.intern(module);
        let stmt = self.stmts.make_use(crate::stmt::UseStmt { label, module });
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_import(&mut self, loc: Span, names: Vec<&str>, label: Option<Label>) -> StmtId {
        let names = names.into_iter().map(|n| self.names.intern(n)).collect();
        let stmt = self.stmts.make_import(crate::stmt::ImportStmt { label, names });
        self.define_label(label, stmt, loc);
        stmt
    }

    // ---- Executable statements (§6) -------------------------------------

    pub fn on_assignment(&mut self, lhs: ExprId, rhs: ExprId, loc: Span, label: Option<Label>) -> StmtId {
        let lhs_ty = self.exprs.ty_of(lhs);
        let rhs = if self.types.is_boz_sentinel(self.exprs.ty_of(rhs)) {
            self.coerce_boz(rhs, lhs_ty);
            rhs
        } else {
            self.exprs.cast_to(rhs, lhs_ty, loc)
        };
        let stmt = self.stmts.make_assignment(label, lhs, rhs);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_if(&mut self, branches: Vec<IfBranch>, loc: Span, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_if(label, branches);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_continue(&mut self, loc: Span, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_continue(label);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_stop(&mut self, loc: Span, code: Option<ExprId>, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_stop(label, code);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_goto(&mut self, loc: Span, target: Label, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_goto(label, target);
        self.current_frame_mut().labels.add_pending(LabelFixupSite::Goto(stmt), target);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_assign(&mut self, loc: Span, target: Label, var: DeclId, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_assign(label, target, var);
        self.current_frame_mut().labels.add_pending(LabelFixupSite::Assign(stmt), target);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_assigned_goto(&mut self, loc: Span, var: DeclId, allowed: Vec<Label>, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_assigned_goto(label, var, allowed.clone());
        for (index, target) in allowed.into_iter().enumerate() {
            self.current_frame_mut()
                .labels
                .add_pending(LabelFixupSite::AssignedGotoEntry(stmt, index), target);
        }
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_print(&mut self, loc: Span, format: FormatSpec, items: Vec<ExprId>, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_print(label, format, items);
        self.define_label(label, stmt, loc);
        stmt
    }

    pub fn on_block(&mut self, loc: Span, stmts: Vec<StmtId>, label: Option<Label>) -> StmtId {
        let stmt = self.stmts.make_block(label, stmts);
        self.define_label(label, stmt, loc);
        stmt
    }

    // ---- Expression builders (§6) ----------------------------------------

    pub fn on_integer_constant(&mut self, value: i64, loc: Span, kind_selector: Option<ExprId>) -> ExprId {
        let meta = ConstantMeta { kind_selector, end_loc: loc };
        self.exprs.make_integer_constant(value, loc, meta, &self.types)
    }

    pub fn on_real_constant(&mut self, value: f64, loc: Span, kind_selector: Option<ExprId>) -> ExprId {
        let meta = ConstantMeta { kind_selector, end_loc: loc };
        self.exprs.make_real_constant(value, loc, meta, &self.types)
    }

    pub fn on_complex_constant(&mut self, re: f64, im: f64, loc: Span) -> ExprId {
        let meta = ConstantMeta::simple(loc);
        self.exprs.make_complex_constant(re, im, loc, meta, &self.types)
    }

    pub fn on_character_constant(&mut self, value: Vec<u8>, loc: Span) -> ExprId {
        let meta = ConstantMeta::simple(loc);
        self.exprs.make_character_constant(value, loc, meta, &mut self.types)
    }

    pub fn on_logical_constant(&mut self, value: bool, loc: Span) -> ExprId {
        let meta = ConstantMeta::simple(loc);
        self.exprs.make_logical_constant(value, loc, meta, &self.types)
    }

    pub fn on_boz_literal(&mut self, bits: u64, loc: Span) -> ExprId {
        let meta = ConstantMeta::simple(loc);
        self.exprs.make_boz_constant(bits, loc, meta, &self.types)
    }

    pub fn coerce_boz(&mut self, expr: ExprId, target_type: TypeId) {
        self.exprs.coerce_boz(expr, target_type, &self.types);
    }

    pub fn on_var_ref(&mut self, loc: Span, name: &str) -> ExprId {
        let decl = self.declare_or_resolve(loc, name);
        let ty = self.decls.get(decl).ty().unwrap_or_else(|| self.types.base(BaseKind::Real));
        self.exprs.make_var_ref(decl, ty, loc)
    }

    pub fn on_substring(&mut self, target: ExprId, start: Option<ExprId>, end: Option<ExprId>, loc: Span) -> ExprId {
        self.exprs.make_substring(target, start, end, loc)
    }

    pub fn on_array_element(&mut self, target: ExprId, subscripts: Vec<ExprId>, loc: Span) -> ExprId {
        let element_ty = match self.types.kind(self.exprs.ty_of(target)) {
            crate::types::TypeKind::Array(a) => a.element,
            _ => self.exprs.ty_of(target),
        };
        self.exprs.make_array_element(target, subscripts, element_ty, loc)
    }

    pub fn on_unary_op(&mut self, op: UnaryOp, operand: ExprId, loc: Span) -> ExprId {
        self.exprs.make_unary(op, operand, loc)
    }

    pub fn on_binary_op(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId, loc: Span) -> ExprId {
        self.exprs.make_binary(op, lhs, rhs, loc, &mut self.types)
    }

    pub fn on_call(&mut self, callee: DeclId, args: Vec<ExprId>, loc: Span) -> ExprId {
        let ty = self.decls.get(callee).ty().unwrap_or_else(|| self.types.base(BaseKind::Real));
        self.exprs.make_call(callee, args, ty, loc)
    }

    pub fn on_intrinsic_call(&mut self, kind: IntrinsicKind, args: Vec<ExprId>, result_ty: TypeId, loc: Span) -> ExprId {
        self.exprs.make_intrinsic_call(kind, args, result_ty, loc)
    }

    pub fn on_implied_do(
        &mut self,
        var: DeclId,
        body: Vec<ExprId>,
        init: ExprId,
        term: ExprId,
        stride: Option<ExprId>,
        loc: Span,
    ) -> ExprId {
        let element_ty = body
            .first()
            .map(|&e| self.exprs.ty_of(e))
            .unwrap_or_else(|| self.types.base(BaseKind::Integer));
        self.exprs.make_implied_do(var, body, init, term, stride, element_ty, loc)
    }

    pub fn on_array_constructor(&mut self, items: Vec<ExprId>, loc: Span) -> ExprId {
        self.exprs.make_array_constructor(items, loc, &mut self.types)
    }

    pub fn on_repeated_constant(&mut self, count: ExprId, value: ExprId, loc: Span) -> ExprId {
        self.exprs.make_repeated_constant(count, value, loc)
    }

    pub fn on_unresolved_identifier(&mut self, name: &str, loc: Span) -> ExprId {
        let name_id = self.names.intern(name);
        let ty = self.types.base(BaseKind::Integer);
        self.exprs.make_unresolved_identifier(name_id, ty, loc)
    }

    pub fn resolve_identifier(&mut self, expr: ExprId, name: &str, loc: Span) {
        let decl = self.declare_or_resolve(loc, name);
        let ty = self.decls.get(decl).ty().unwrap_or_else(|| self.types.base(BaseKind::Integer));
        self.exprs.resolve_identifier(expr, decl, ty);
    }

    // ---- Format specifiers (§6) ------------------------------------------

    pub fn star(&self) -> FormatSpec {
        FormatSpec::Star
    }

    pub fn default_char_expr(&self, expr: ExprId) -> FormatSpec {
        FormatSpec::CharExpr(expr)
    }

    pub fn label(&self, value: u32) -> Option<Label> {
        Label::new(value)
    }
}

impl Default for TranslationUnit {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
