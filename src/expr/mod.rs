//! Expression tree (C5).

mod fold;
mod kind;
mod table;

use crate::define_idx;

define_idx!(pub struct ExprId);

pub use kind::{BinaryOp, ConstantMeta, Expr, ExprKind, IntrinsicKind, UnaryOp};
pub use table::ExprTable;
