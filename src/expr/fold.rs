//! Constant folding (§4.4, §8 "Constant folding").
//!
//! Folding never panics: non-evaluability is `None`, and
//! `gather_non_evaluable_children` hands the analyzer the leaves it needs
//! for diagnostic context ("not a constant expression: %0").

use super::kind::{BinaryOp, ExprKind, UnaryOp};
use super::table::ExprTable;
use super::ExprId;

impl ExprTable {
    /// Folds integer-valued constant expressions. Overflow wraps
    /// two's-complement, matching the declared kind's host arithmetic.
    pub fn evaluate_as_integer(&self, id: ExprId) -> Option<i64> {
        match &self.get(id).kind {
            ExprKind::IntegerConstant { value, .. } => Some(*value),
            ExprKind::Unary { op: UnaryOp::Plus, operand } => self.evaluate_as_integer(*operand),
            ExprKind::Unary { op: UnaryOp::Minus, operand } => {
                self.evaluate_as_integer(*operand).map(i64::wrapping_neg)
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let l = self.evaluate_as_integer(*lhs)?;
                let r = self.evaluate_as_integer(*rhs)?;
                match op {
                    BinaryOp::Add => Some(l.wrapping_add(r)),
                    BinaryOp::Sub => Some(l.wrapping_sub(r)),
                    BinaryOp::Mul => Some(l.wrapping_mul(r)),
                    BinaryOp::Div if r != 0 => Some(l.wrapping_div(r)),
                    BinaryOp::Power if r >= 0 && r <= u32::MAX as i64 => {
                        Some(l.wrapping_pow(r as u32))
                    }
                    _ => None,
                }
            }
            ExprKind::ImplicitCast { expr, .. } => self.evaluate_as_integer(*expr),
            _ => None,
        }
    }

    /// Whether `id`'s whole subtree is a compile-time constant.
    pub fn is_evaluable(&self, id: ExprId) -> bool {
        match &self.get(id).kind {
            ExprKind::IntegerConstant { .. }
            | ExprKind::RealConstant { .. }
            | ExprKind::ComplexConstant { .. }
            | ExprKind::LogicalConstant { .. }
            | ExprKind::CharacterConstant { .. } => true,
            ExprKind::Unary { operand, .. } => self.is_evaluable(*operand),
            ExprKind::Binary { lhs, rhs, .. } => self.is_evaluable(*lhs) && self.is_evaluable(*rhs),
            ExprKind::ImplicitCast { expr, .. } => self.is_evaluable(*expr),
            _ => false,
        }
    }

    /// The non-constant leaves blocking `id` from folding, depth-first.
    pub fn gather_non_evaluable_children(&self, id: ExprId) -> Vec<ExprId> {
        let mut out = Vec::new();
        self.gather_non_evaluable_into(id, &mut out);
        out
    }

    fn gather_non_evaluable_into(&self, id: ExprId, out: &mut Vec<ExprId>) {
        match &self.get(id).kind {
            ExprKind::Unary { operand, .. } => self.visit_child(*operand, out),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_child(*lhs, out);
                self.visit_child(*rhs, out);
            }
            ExprKind::ImplicitCast { expr, .. } => self.visit_child(*expr, out),
            _ => {}
        }
    }

    fn visit_child(&self, child: ExprId, out: &mut Vec<ExprId>) {
        if self.is_evaluable(child) {
            return;
        }
        out.push(child);
        self.gather_non_evaluable_into(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Span;
    use crate::expr::kind::ConstantMeta;
    use crate::types::TypeTable;

    fn loc() -> Span {
        Span::from_coords(0, 0, 0, 1)
    }

    #[test]
    fn folds_simple_arithmetic() {
        let mut types = TypeTable::new();
        let mut exprs = ExprTable::new();
        let a = exprs.make_integer_constant(2, loc(), ConstantMeta::simple(loc()), &types);
        let b = exprs.make_integer_constant(3, loc(), ConstantMeta::simple(loc()), &types);
        let sum = exprs.make_binary(BinaryOp::Add, a, b, loc(), &mut types);
        assert_eq!(exprs.evaluate_as_integer(sum), Some(5));
    }

    #[test]
    fn non_constant_operand_is_not_evaluable() {
        let mut types = TypeTable::new();
        let mut exprs = ExprTable::new();
        let a = exprs.make_integer_constant(2, loc(), ConstantMeta::simple(loc()), &types);
        let mut names: crate::ident::IdentifierTable<()> = crate::ident::IdentifierTable::new();
        let n = names.intern("n");
        let var = exprs.make_unresolved_identifier(
            n,
            types.base(crate::types::BaseKind::Integer),
            loc(),
        );
        let sum = exprs.make_binary(BinaryOp::Add, a, var, loc(), &mut types);
        assert!(!exprs.is_evaluable(sum));
        assert_eq!(exprs.evaluate_as_integer(sum), None);
        assert_eq!(exprs.gather_non_evaluable_children(sum), vec![var]);
    }
}
