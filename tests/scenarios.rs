//! End-to-end scenarios driving `TranslationUnit` the way a parser would:
//! one action call per statement/expression, in source order.

use fortran_sema::base::Span;
use fortran_sema::expr::{BinaryOp, ExprId, ExprKind};
use fortran_sema::stmt::{Label, LabelRef, Stmt};
use fortran_sema::types::{AttributeFlags, BaseKind, DimSpec};
use fortran_sema::{CompileOptions, DeclSpec, Severity, TranslationUnit};

fn loc() -> Span {
    Span::from_coords(0, 0, 0, 1)
}

fn integer_spec() -> DeclSpec {
    DeclSpec {
        base: BaseKind::Integer,
        kind: None,
        length: None,
        attrs: AttributeFlags::NONE,
    }
}

fn real_spec() -> DeclSpec {
    DeclSpec {
        base: BaseKind::Real,
        kind: None,
        length: None,
        attrs: AttributeFlags::NONE,
    }
}

fn var_of(tu: &TranslationUnit, expr: ExprId) -> fortran_sema::decl::DeclId {
    match &tu.exprs.get(expr).kind {
        ExprKind::Var(decl) => *decl,
        other => panic!("expected a Var expression, found {other:?}"),
    }
}

/// §8 scenario 1: implicit typing creates `I` (default integer) and `X`
/// (default real) from their first assignment, with no diagnostics.
#[test]
fn implicit_typing_creates_default_typed_variables() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_unit();
    tu.begin_main_program(Some("p"), loc(), loc());

    let i_ref = tu.on_var_ref(loc(), "i");
    let one = tu.on_integer_constant(1, loc(), None);
    let s1 = tu.on_assignment(i_ref, one, loc(), None);

    let x_ref = tu.on_var_ref(loc(), "x");
    let one_real = tu.on_real_constant(1.0, loc(), None);
    let s2 = tu.on_assignment(x_ref, one_real, loc(), None);

    tu.end_main_program(vec![s1, s2], loc(), None);
    tu.end_unit();

    assert!(!tu.diagnostics.had_errors());

    let i_decl = var_of(&tu, i_ref);
    let x_decl = var_of(&tu, x_ref);
    assert_eq!(tu.decls.get(i_decl).ty(), Some(tu.types.base(BaseKind::Integer)));
    assert_eq!(tu.decls.get(x_decl).ty(), Some(tu.types.base(BaseKind::Real)));
}

/// §8 scenario 2: `X = X + Y * Z` nests multiplication inside addition.
#[test]
fn binary_operator_precedence_nests_multiply_inside_add() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let x_lhs = tu.on_var_ref(loc(), "x");
    let x_rhs = tu.on_var_ref(loc(), "x");
    let y = tu.on_var_ref(loc(), "y");
    let z = tu.on_var_ref(loc(), "z");
    let mul = tu.on_binary_op(BinaryOp::Mul, y, z, loc());
    let add = tu.on_binary_op(BinaryOp::Add, x_rhs, mul, loc());
    let assignment = tu.on_assignment(x_lhs, add, loc(), None);

    match tu.stmts.get(assignment) {
        Stmt::Assignment(a) => {
            assert_eq!(a.lhs, x_lhs);
            assert_eq!(a.rhs, add);
        }
        other => panic!("expected an assignment, found {other:?}"),
    }
    match &tu.exprs.get(add).kind {
        ExprKind::Binary { op: BinaryOp::Add, lhs, rhs } => {
            assert_eq!(*lhs, x_rhs);
            assert_eq!(*rhs, mul);
        }
        other => panic!("expected a top-level Add, found {other:?}"),
    }
}

/// §8 scenario 3: `I = R` between an `INTEGER` and a `REAL` wraps the
/// right-hand side in an implicit cast to the left-hand side's type.
#[test]
fn assignment_inserts_implicit_cast_on_type_mismatch() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let int_ty = tu.on_type_name(integer_spec());
    tu.on_entity_decl(int_ty, loc(), "i", vec![]);
    let real_ty = tu.on_type_name(real_spec());
    tu.on_entity_decl(real_ty, loc(), "r", vec![]);

    let i_ref = tu.on_var_ref(loc(), "i");
    let r_ref = tu.on_var_ref(loc(), "r");
    let assignment = tu.on_assignment(i_ref, r_ref, loc(), None);

    match tu.stmts.get(assignment) {
        Stmt::Assignment(a) => {
            assert_eq!(a.lhs, i_ref);
            match &tu.exprs.get(a.rhs).kind {
                ExprKind::ImplicitCast { to, expr } => {
                    assert_eq!(*to, int_ty);
                    assert_eq!(*expr, r_ref);
                }
                other => panic!("expected an implicit cast, found {other:?}"),
            }
        }
        other => panic!("expected an assignment, found {other:?}"),
    }
}

/// §8 scenario 4: redeclaring `I` with a different type is rejected; only
/// the first declaration survives.
#[test]
fn redeclaration_is_rejected_with_a_note_at_the_first_declaration() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let int_ty = tu.on_type_name(integer_spec());
    let first = tu.on_entity_decl(int_ty, loc(), "i", vec![]);
    assert!(first.is_some());

    let real_ty = tu.on_type_name(real_spec());
    let second = tu.on_entity_decl(real_ty, loc(), "i", vec![]);
    assert!(second.is_none());

    let errors: Vec<_> = tu
        .diagnostics
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].related.len(), 1);
}

/// §8 scenario 5: `DATA (A(I), I=1,10) / 10*0 /` builds an implied-do over
/// `ArrayElement(A, I)` and a matching repeated-constant initializer.
#[test]
fn implied_do_and_repeated_constant_match_the_data_statement_shape() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let ten = tu.on_integer_constant(10, loc(), None);
    let int_ty = tu.on_type_name(integer_spec());
    let a = tu.on_entity_decl(int_ty, loc(), "a", vec![DimSpec::Explicit { lower: None, upper: ten }]);
    assert!(a.is_some());

    let a_ref = tu.on_var_ref(loc(), "a");
    let i_ref = tu.on_var_ref(loc(), "i");
    let i_decl = var_of(&tu, i_ref);
    assert_eq!(tu.decls.get(i_decl).ty(), Some(tu.types.base(BaseKind::Integer)));

    let element = tu.on_array_element(a_ref, vec![i_ref], loc());
    let init = tu.on_integer_constant(1, loc(), None);
    let term = tu.on_integer_constant(10, loc(), None);
    let implied_do = tu.on_implied_do(i_decl, vec![element], init, term, None, loc());

    match &tu.exprs.get(implied_do).kind {
        ExprKind::ImpliedDo { var, body, init: i, term: t, stride } => {
            assert_eq!(*var, i_decl);
            assert_eq!(body, &vec![element]);
            assert_eq!(*i, init);
            assert_eq!(*t, term);
            assert_eq!(*stride, None);
        }
        other => panic!("expected an implied-do, found {other:?}"),
    }

    let count = tu.on_integer_constant(10, loc(), None);
    let zero = tu.on_integer_constant(0, loc(), None);
    let repeated = tu.on_repeated_constant(count, zero, loc());
    match &tu.exprs.get(repeated).kind {
        ExprKind::RepeatedConstant { count: c, value } => {
            assert_eq!(*c, count);
            assert_eq!(*value, zero);
        }
        other => panic!("expected a repeated constant, found {other:?}"),
    }
}

/// §8 scenario 6: a forward `GOTO` resolves to the statement its target
/// label marks once the scope unit ends.
#[test]
fn forward_goto_resolves_to_its_label_at_scope_end() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let target_label = tu.label(100).unwrap();
    let goto = tu.on_goto(loc(), target_label, None);
    let target_stmt = tu.on_continue(loc(), Some(target_label));
    tu.end_main_program(vec![goto, target_stmt], loc(), None);

    assert!(!tu.diagnostics.had_errors());
    match tu.stmts.get(goto) {
        Stmt::Goto(g) => assert_eq!(g.target, LabelRef::Resolved(target_stmt)),
        other => panic!("expected a goto, found {other:?}"),
    }
}

/// §8 scenario 6 (negative case): removing the label definition leaves
/// the goto unresolved, which is a fatal diagnostic at scope-unit end.
#[test]
fn goto_with_no_matching_label_is_a_fatal_diagnostic() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let target_label = tu.label(100).unwrap();
    let goto = tu.on_goto(loc(), target_label, None);
    tu.end_main_program(vec![goto], loc(), None);

    assert!(tu.diagnostics.had_errors());
    assert!(tu
        .diagnostics
        .diagnostics()
        .iter()
        .any(|d| d.severity == Severity::Fatal));
}

/// Supplemented behavior: a labeled `END` acts as a jump target, the way
/// a labeled `RETURN`'s implicit `CONTINUE` would in the full language.
#[test]
fn goto_to_a_labeled_end_resolves() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let end_label = tu.label(99).unwrap();
    let goto = tu.on_goto(loc(), end_label, None);
    tu.end_main_program(vec![goto], loc(), Some(end_label));

    assert!(!tu.diagnostics.had_errors());
    match tu.stmts.get(goto) {
        Stmt::Goto(g) => assert!(matches!(g.target, LabelRef::Resolved(_))),
        other => panic!("expected a goto, found {other:?}"),
    }
}

/// §1.2 BOZ-literal typing by context: assigning a BOZ literal to a typed
/// variable resolves its bits against the variable's type in place,
/// rather than wrapping it in an implicit cast like an ordinary mismatch.
#[test]
fn boz_literal_assigned_to_a_typed_variable_is_coerced_in_place() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());

    let int_ty = tu.on_type_name(integer_spec());
    tu.on_entity_decl(int_ty, loc(), "i", vec![]);

    let i_ref = tu.on_var_ref(loc(), "i");
    let boz = tu.on_boz_literal(0xff, loc());
    let assignment = tu.on_assignment(i_ref, boz, loc(), None);

    match tu.stmts.get(assignment) {
        Stmt::Assignment(a) => assert_eq!(a.rhs, boz),
        other => panic!("expected an assignment, found {other:?}"),
    }
    assert_eq!(tu.exprs.ty_of(boz), int_ty);
    assert!(!tu.diagnostics.had_errors());
}

/// `IMPLICIT NONE` forbids auto-declaration and falls back to a synthetic
/// default-real declaration so construction can continue (§7 item 3).
#[test]
fn implicit_none_reports_undeclared_identifier_and_recovers() {
    let mut tu = TranslationUnit::new(CompileOptions::default());
    tu.begin_main_program(None, loc(), loc());
    tu.on_implicit(loc(), None, vec![], true, None);

    let i_ref = tu.on_var_ref(loc(), "i");
    assert!(tu.diagnostics.had_errors());
    let decl = var_of(&tu, i_ref);
    assert_eq!(tu.decls.get(decl).ty(), Some(tu.types.base(BaseKind::Real)));
}
