//! Expression arena and construction entry points (§4.4).

use super::kind::{BinaryOp, ConstantMeta, Expr, ExprKind, UnaryOp};
use super::ExprId;
use crate::base::Span;
use crate::core::Arena;
use crate::decl::DeclId;
use crate::error::InternalError;
use crate::types::{is_numeric, promote, BaseKind, TypeId, TypeKind, TypeTable};

/// `Some(length)` if `ty` is a character type (`length` is `None` for a
/// bare, unselected character); `None` if `ty` is not character at all.
fn character_length(types: &TypeTable, ty: TypeId) -> Option<Option<ExprId>> {
    match types.kind(ty) {
        TypeKind::Base(BaseKind::Character) => Some(None),
        TypeKind::Qualified(q) if q.base == BaseKind::Character => Some(q.length),
        _ => None,
    }
}

pub struct ExprTable {
    arena: Arena<ExprId, Expr>,
}

impl ExprTable {
    pub fn new() -> Self {
        Self { arena: Arena::new() }
    }

    pub fn get(&self, id: ExprId) -> &Expr {
        self.arena.get(id)
    }

    pub fn ty_of(&self, id: ExprId) -> TypeId {
        self.arena.get(id).ty
    }

    pub fn loc_of(&self, id: ExprId) -> Span {
        self.arena.get(id).loc
    }

    fn alloc(&mut self, kind: ExprKind, ty: TypeId, loc: Span) -> ExprId {
        self.arena.alloc(Expr { kind, ty, loc })
    }

    // ---- Constants ------------------------------------------------

    pub fn make_integer_constant(
        &mut self,
        value: i64,
        loc: Span,
        meta: ConstantMeta,
        types: &TypeTable,
    ) -> ExprId {
        let ty = types.base(BaseKind::Integer);
        self.alloc(ExprKind::IntegerConstant { value, meta }, ty, loc)
    }

    pub fn make_real_constant(
        &mut self,
        value: f64,
        loc: Span,
        meta: ConstantMeta,
        types: &TypeTable,
    ) -> ExprId {
        let ty = types.base(BaseKind::Real);
        self.alloc(ExprKind::RealConstant { value, meta }, ty, loc)
    }

    pub fn make_complex_constant(
        &mut self,
        re: f64,
        im: f64,
        loc: Span,
        meta: ConstantMeta,
        types: &TypeTable,
    ) -> ExprId {
        let ty = types.base(BaseKind::Complex);
        self.alloc(ExprKind::ComplexConstant { re, im, meta }, ty, loc)
    }

    pub fn make_character_constant(
        &mut self,
        value: Vec<u8>,
        loc: Span,
        meta: ConstantMeta,
        types: &mut TypeTable,
    ) -> ExprId {
        let len = value.len() as i64;
        let length_expr = self.make_integer_constant(len, loc, ConstantMeta::simple(loc), types);
        let ty = types.make_character(Some(length_expr), None);
        self.alloc(ExprKind::CharacterConstant { value, meta }, ty, loc)
    }

    pub fn make_logical_constant(
        &mut self,
        value: bool,
        loc: Span,
        meta: ConstantMeta,
        types: &TypeTable,
    ) -> ExprId {
        let ty = types.base(BaseKind::Logical);
        self.alloc(ExprKind::LogicalConstant { value, meta }, ty, loc)
    }

    /// §4.4: a BOZ literal starts out tagged with the untyped sentinel.
    pub fn make_boz_constant(
        &mut self,
        bits: u64,
        loc: Span,
        meta: ConstantMeta,
        types: &TypeTable,
    ) -> ExprId {
        self.alloc(ExprKind::BozConstant { bits, meta }, types.boz_sentinel(), loc)
    }

    /// The first typed context a BOZ expression is used in reinterprets
    /// its raw bits as `target_type` and rewrites the node's type
    /// in place. A second attempt is an internal invariant violation: a
    /// BOZ literal only ever appears once, at its single point of use.
    pub fn coerce_boz(&mut self, id: ExprId, target_type: TypeId, types: &TypeTable) {
        if !types.is_boz_sentinel(self.arena.get(id).ty) {
            InternalError::DoubleBozCoercion.panic();
        }
        self.arena.get_mut(id).ty = target_type;
    }

    // ---- Designators ------------------------------------------------

    pub fn make_var_ref(&mut self, decl: DeclId, ty: TypeId, loc: Span) -> ExprId {
        self.alloc(ExprKind::Var(decl), ty, loc)
    }

    pub fn make_substring(
        &mut self,
        target: ExprId,
        start: Option<ExprId>,
        end: Option<ExprId>,
        loc: Span,
    ) -> ExprId {
        let ty = self.ty_of(target);
        self.alloc(ExprKind::Substring { target, start, end }, ty, loc)
    }

    pub fn make_array_element(
        &mut self,
        target: ExprId,
        subscripts: Vec<ExprId>,
        element_ty: TypeId,
        loc: Span,
    ) -> ExprId {
        self.alloc(ExprKind::ArrayElement { target, subscripts }, element_ty, loc)
    }

    // ---- Operators ----------------------------------------------------

    pub fn make_unary(&mut self, op: UnaryOp, operand: ExprId, loc: Span) -> ExprId {
        let ty = self.ty_of(operand);
        self.alloc(ExprKind::Unary { op, operand }, ty, loc)
    }

    fn wrap_cast(&mut self, expr: ExprId, to: TypeId, loc: Span) -> ExprId {
        self.alloc(ExprKind::ImplicitCast { to, expr }, to, loc)
    }

    /// Wraps `expr` in an implicit cast to `to` unless it is already that
    /// type. Used outside binary-operator construction wherever a value
    /// is retyped to a fixed destination: assignment (§9) and a
    /// function's `RETURN` value (§9, open-question resolution).
    pub fn cast_to(&mut self, expr: ExprId, to: TypeId, loc: Span) -> ExprId {
        if self.ty_of(expr) == to {
            expr
        } else {
            self.wrap_cast(expr, to, loc)
        }
    }

    /// Builds a binary expression, inserting implicit casts per the
    /// promotion ladder (§4.4). Non-numeric mismatches (e.g. a type
    /// error the analyzer has already diagnosed) fall back to the LHS
    /// type, matching §7 item 4 ("result type defaults to the wider
    /// operand's type").
    pub fn make_binary(
        &mut self,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        loc: Span,
        types: &mut TypeTable,
    ) -> ExprId {
        if op.is_arithmetic() {
            return self.make_arithmetic(op, lhs, rhs, loc, types);
        }
        if op == BinaryOp::Concat {
            return self.make_concat(lhs, rhs, loc, types);
        }
        if op.is_relational() {
            let ty = types.base(BaseKind::Logical);
            return self.alloc(ExprKind::Binary { op, lhs, rhs }, ty, loc);
        }
        if op.is_logical_connective() {
            let ty = self.ty_of(lhs);
            return self.alloc(ExprKind::Binary { op, lhs, rhs }, ty, loc);
        }
        // Defined (user) operator: result type is a placeholder until the
        // resolved operator-function's return type is known to the caller.
        let ty = self.ty_of(lhs);
        self.alloc(ExprKind::Binary { op, lhs, rhs }, ty, loc)
    }

    fn make_arithmetic(
        &mut self,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        loc: Span,
        types: &mut TypeTable,
    ) -> ExprId {
        let lk = types.base_kind_of(self.ty_of(lhs));
        let rk = types.base_kind_of(self.ty_of(rhs));
        let (Some(lk), Some(rk)) = (lk, rk) else {
            let ty = self.ty_of(lhs);
            return self.alloc(ExprKind::Binary { op, lhs, rhs }, ty, loc);
        };
        if !is_numeric(lk) || !is_numeric(rk) {
            let ty = self.ty_of(lhs);
            return self.alloc(ExprKind::Binary { op, lhs, rhs }, ty, loc);
        }
        let result_kind = promote(lk, rk);
        let result_ty = types.base(result_kind);
        let lhs = if lk != result_kind {
            self.wrap_cast(lhs, result_ty, loc)
        } else {
            lhs
        };
        let rhs = if rk != result_kind {
            self.wrap_cast(rhs, result_ty, loc)
        } else {
            rhs
        };
        self.alloc(ExprKind::Binary { op, lhs, rhs }, result_ty, loc)
    }

    fn make_concat(
        &mut self,
        lhs: ExprId,
        rhs: ExprId,
        loc: Span,
        types: &mut TypeTable,
    ) -> ExprId {
        let lhs_len = character_length(types, self.ty_of(lhs));
        let rhs_len = character_length(types, self.ty_of(rhs));
        let result_ty = match (lhs_len, rhs_len) {
            (Some(Some(ll)), Some(Some(rl))) => {
                let sum = self.make_binary(BinaryOp::Add, ll, rl, loc, types);
                types.make_character(Some(sum), None)
            }
            _ => types.base(BaseKind::Character),
        };
        self.alloc(ExprKind::Binary { op: BinaryOp::Concat, lhs, rhs }, result_ty, loc)
    }

    // ---- Calls ----------------------------------------------------

    pub fn make_call(&mut self, callee: DeclId, args: Vec<ExprId>, ty: TypeId, loc: Span) -> ExprId {
        self.alloc(ExprKind::Call { callee, args }, ty, loc)
    }

    pub fn make_intrinsic_call(
        &mut self,
        kind: super::kind::IntrinsicKind,
        args: Vec<ExprId>,
        ty: TypeId,
        loc: Span,
    ) -> ExprId {
        self.alloc(ExprKind::IntrinsicCall { kind, args }, ty, loc)
    }

    // ---- Implied-do / array constructors -------------------------------

    pub fn make_implied_do(
        &mut self,
        var: DeclId,
        body: Vec<ExprId>,
        init: ExprId,
        term: ExprId,
        stride: Option<ExprId>,
        element_ty: TypeId,
        loc: Span,
    ) -> ExprId {
        self.alloc(
            ExprKind::ImpliedDo {
                var,
                body,
                init,
                term,
                stride,
            },
            element_ty,
            loc,
        )
    }

    /// Contribution of one array-constructor/`DATA`-value-list item to the
    /// constructor's total length: one element for a plain expression,
    /// `term - init + 1` for an implied-do item, which produces one
    /// element per loop iteration (§4.4).
    fn array_item_length(&mut self, item: ExprId, loc: Span, types: &mut TypeTable) -> ExprId {
        let implied_do_bounds = match &self.arena.get(item).kind {
            ExprKind::ImpliedDo { init, term, .. } => Some((*init, *term)),
            _ => None,
        };
        match implied_do_bounds {
            Some((init, term)) => {
                let span = self.make_binary(BinaryOp::Sub, term, init, loc, types);
                let one = self.make_integer_constant(1, loc, ConstantMeta::simple(loc), types);
                self.make_binary(BinaryOp::Add, span, one, loc, types)
            }
            None => self.make_integer_constant(1, loc, ConstantMeta::simple(loc), types),
        }
    }

    /// §4.4: the common element type is computed with the binary-operator
    /// promotion ladder over every item's (non-array) base kind, every
    /// item is cast to it, and the constructor's length is the sum of each
    /// item's contributed length (an implied-do item contributes more than
    /// one element).
    pub fn make_array_constructor(
        &mut self,
        items: Vec<ExprId>,
        loc: Span,
        types: &mut TypeTable,
    ) -> ExprId {
        let mut common: Option<BaseKind> = None;
        for &item in &items {
            if let Some(k) = types.base_kind_of(self.ty_of(item)) {
                common = Some(match common {
                    Some(c) if is_numeric(c) && is_numeric(k) => promote(c, k),
                    Some(c) => c,
                    None => k,
                });
            }
        }
        let element_ty = common.map(|k| types.base(k)).unwrap_or_else(|| {
            items
                .first()
                .map(|&i| self.ty_of(i))
                .unwrap_or_else(|| types.base(BaseKind::Integer))
        });

        let mut length: Option<ExprId> = None;
        for &item in &items {
            let contribution = self.array_item_length(item, loc, types);
            length = Some(match length {
                Some(total) => self.make_binary(BinaryOp::Add, total, contribution, loc, types),
                None => contribution,
            });
        }
        let length = length.unwrap_or_else(|| self.make_integer_constant(0, loc, ConstantMeta::simple(loc), types));

        let items: Vec<ExprId> = items.into_iter().map(|item| self.cast_to(item, element_ty, loc)).collect();
        let array_ty = types.make_array(
            element_ty,
            vec![crate::types::DimSpec::Explicit {
                lower: None,
                upper: length,
            }],
        );
        self.alloc(ExprKind::ArrayConstructor { items }, array_ty, loc)
    }

    pub fn make_repeated_constant(
        &mut self,
        count: ExprId,
        value: ExprId,
        loc: Span,
    ) -> ExprId {
        let ty = self.ty_of(value);
        self.alloc(ExprKind::RepeatedConstant { count, value }, ty, loc)
    }

    pub fn make_unresolved_identifier(
        &mut self,
        name: crate::ident::NameId,
        ty: TypeId,
        loc: Span,
    ) -> ExprId {
        self.alloc(ExprKind::UnresolvedIdentifier { name }, ty, loc)
    }

    /// Rewrites an `UnresolvedIdentifier` node into a `Var` once the name
    /// has a declaration, as happens at data-statement completion (§3).
    pub fn resolve_identifier(&mut self, id: ExprId, decl: DeclId, ty: TypeId) {
        let node = self.arena.get_mut(id);
        debug_assert!(matches!(node.kind, ExprKind::UnresolvedIdentifier { .. }));
        node.kind = ExprKind::Var(decl);
        node.ty = ty;
    }
}

impl Default for ExprTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::DeclId;

    fn loc() -> Span {
        Span::from_coords(0, 0, 0, 1)
    }

    #[test]
    fn array_constructor_casts_items_to_the_promoted_common_type() {
        let mut exprs = ExprTable::new();
        let mut types = TypeTable::new();
        let i = exprs.make_integer_constant(1, loc(), ConstantMeta::simple(loc()), &types);
        let r = exprs.make_real_constant(2.0, loc(), ConstantMeta::simple(loc()), &types);
        let array = exprs.make_array_constructor(vec![i, r], loc(), &mut types);
        let real_ty = types.base(BaseKind::Real);
        match &exprs.get(array).kind {
            ExprKind::ArrayConstructor { items } => {
                assert_eq!(items.len(), 2);
                match &exprs.get(items[0]).kind {
                    ExprKind::ImplicitCast { to, expr } => {
                        assert_eq!(*to, real_ty);
                        assert_eq!(*expr, i);
                    }
                    other => panic!("expected the integer item cast to real, found {other:?}"),
                }
                assert_eq!(items[1], r);
            }
            other => panic!("expected an array constructor, found {other:?}"),
        }
    }

    #[test]
    fn array_constructor_length_counts_implied_do_iterations_not_syntactic_items() {
        let mut exprs = ExprTable::new();
        let mut types = TypeTable::new();
        let var = DeclId::new(0);
        let init = exprs.make_integer_constant(1, loc(), ConstantMeta::simple(loc()), &types);
        let term = exprs.make_integer_constant(10, loc(), ConstantMeta::simple(loc()), &types);
        let body_elem = exprs.make_integer_constant(0, loc(), ConstantMeta::simple(loc()), &types);
        let int_ty = types.base(BaseKind::Integer);
        let implied_do =
            exprs.make_implied_do(var, vec![body_elem], init, term, None, int_ty, loc());
        let plain = exprs.make_integer_constant(99, loc(), ConstantMeta::simple(loc()), &types);

        let array = exprs.make_array_constructor(vec![implied_do, plain], loc(), &mut types);
        match types.kind(exprs.ty_of(array)) {
            TypeKind::Array(a) => match &a.dims[0] {
                crate::types::DimSpec::Explicit { upper, .. } => {
                    // (term - init + 1) + 1, not items.len() == 2.
                    match &exprs.get(*upper).kind {
                        ExprKind::Binary { op: BinaryOp::Add, lhs, .. } => match &exprs.get(*lhs).kind {
                            ExprKind::Binary { op: BinaryOp::Add, .. } => {}
                            other => panic!("expected the implied-do span nested on the left, found {other:?}"),
                        },
                        other => panic!("expected a summed length expression, found {other:?}"),
                    }
                }
                other => panic!("expected an explicit dimension, found {other:?}"),
            },
            other => panic!("expected an array type, found {other:?}"),
        }
    }
}
