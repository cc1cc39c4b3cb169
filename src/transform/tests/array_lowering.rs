//! Structural scenarios for `ArrayLowering`: Ackermannisation
//! and the `READ`-over-`WRITE`/`ITE` push-through rules.

use bvlower_core::{ASTNode, Kind, NodeFactory, SubstitutionMap, Type};
use bvlower_transform::{postcondition, transform_formula_top_level, Config, SolverCtx, TransformCache, Xform};

/// Run one `transform_term` with a fresh per-call cache, the way
/// `transform_formula_top_level` does, while letting `solver`'s
/// side tables persist across calls.
fn transform(f: &mut NodeFactory, solver: &mut SolverCtx, subst: &SubstitutionMap, node: ASTNode) -> ASTNode {
    let mut cache = TransformCache::new();
    let mut xform = Xform::new(f, solver, &mut cache, subst, Config::default());
    xform.transform_term(node).unwrap()
}

#[test]
fn two_distinct_reads_build_an_ite_chain() {
    let mut f = NodeFactory::new();
    let a = f.create_array_symbol("A", 4, 4);
    let i = f.create_symbol("i", Type::Bitvec, 4, 0);
    let j = f.create_symbol("j", Type::Bitvec, 4, 0);
    let read_i = f.create_read(a, i);
    let read_j = f.create_read(a, j);

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();

    let v1 = transform(&mut f, &mut solver, &subst, read_i);
    assert_eq!(f.kind(v1), Kind::Symbol);

    let second = transform(&mut f, &mut solver, &subst, read_j);
    assert_eq!(f.kind(second), Kind::Ite);
    let children = f.children(second).to_vec();
    assert_eq!(f.kind(children[0]), Kind::Eq);
    assert_eq!(f.children(children[0]).to_vec(), vec![i, j]);
    assert_eq!(children[1], v1);
    assert_eq!(f.kind(children[2]), Kind::Symbol);
    assert_ne!(children[2], v1);

    assert_eq!(solver.symbol_count(), 2);
}

#[test]
fn read_over_write_same_index() {
    let mut f = NodeFactory::new();
    let a = f.create_array_symbol("A", 4, 4);
    let i = f.create_symbol("i", Type::Bitvec, 4, 0);
    let j = f.create_symbol("j", Type::Bitvec, 4, 0);
    let v = f.create_symbol("v", Type::Bitvec, 4, 0);
    let write = f.create_write(a, i, v);
    let read = f.create_read(write, j);

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();

    let result = transform(&mut f, &mut solver, &subst, read);
    assert_eq!(f.kind(result), Kind::Ite);
    let children = f.children(result).to_vec();
    assert_eq!(f.kind(children[0]), Kind::Eq);
    assert_eq!(f.children(children[0]).to_vec(), vec![i, j]);
    assert_eq!(children[1], v);
    // the inner READ(A, j) is itself lowered to a fresh Ackermann symbol
    assert_eq!(f.kind(children[2]), Kind::Symbol);

    assert!(postcondition::check(&f, result).is_ok());
}

#[test]
fn read_over_ite_pushes_through_branches() {
    let mut f = NodeFactory::new();
    let a1 = f.create_array_symbol("A1", 4, 4);
    let a2 = f.create_array_symbol("A2", 4, 4);
    let c = f.create_symbol("c", Type::Boolean, 0, 0);
    let i = f.create_symbol("i", Type::Bitvec, 4, 0);
    let arr_ite = f.create_ite(c, a1, a2);
    let read = f.create_read(arr_ite, i);

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();

    let result = transform(&mut f, &mut solver, &subst, read);
    assert_eq!(f.kind(result), Kind::Ite);
    let children = f.children(result).to_vec();
    assert_eq!(children[0], c);
    assert_eq!(f.kind(children[1]), Kind::Symbol);
    assert_eq!(f.kind(children[2]), Kind::Symbol);
    assert_ne!(children[1], children[2]);
    assert_eq!(solver.symbol_count(), 2);
}

#[test]
fn rerunning_top_level_on_the_same_formula_adds_no_symbols() {
    let mut f = NodeFactory::new();
    let a = f.create_array_symbol("A", 4, 4);
    let i = f.create_symbol("i", Type::Bitvec, 4, 0);
    let read = f.create_read(a, i);
    let formula = f.create_eq(read, read);

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();
    let config = Config::default();

    let r1 = transform_formula_top_level(&mut f, &mut solver, &subst, config, formula).unwrap();
    let after_first = solver.symbol_count();
    let r2 = transform_formula_top_level(&mut f, &mut solver, &subst, config, formula).unwrap();

    assert_eq!(r1, r2);
    assert_eq!(solver.symbol_count(), after_first);
}

#[test]
fn unsupported_write_at_term_position_is_an_error() {
    let mut f = NodeFactory::new();
    let a = f.create_array_symbol("A", 4, 4);
    let i = f.create_symbol("i", Type::Bitvec, 4, 0);
    let v = f.create_symbol("v", Type::Bitvec, 4, 0);
    let write = f.create_write(a, i, v);

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();

    let mut cache = TransformCache::new();
    let mut xform = Xform::new(&mut f, &mut solver, &mut cache, &subst, Config::default());
    assert!(xform.transform_term(write).is_err());
}
