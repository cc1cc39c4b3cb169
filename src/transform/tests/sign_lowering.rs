//! Semantic equivalence of `SignLowering` against a reference evaluator,
//! plus the divisor-zero guard, checked on 4-bit constants.

use bvlower_core::{bval, ASTNode, Kind, NodeFactory, SubstitutionMap};
use bvlower_transform::{Config, SolverCtx, TransformCache, Xform};
use proptest::prelude::*;

const WIDTH: u32 = 4;

/// A tiny evaluator over ground (variable-free) bit-vector/boolean terms,
/// independent of the transform itself, used as the oracle for
/// property-based equivalence checks.
fn eval(f: &NodeFactory, n: ASTNode) -> u128 {
    let w = f.value_width(n);
    match f.kind(n) {
        Kind::True => 1,
        Kind::False => 0,
        Kind::BvConst => f.const_value(n).unwrap(),
        Kind::Not => {
            if eval(f, f.children(n)[0]) != 0 {
                0
            } else {
                1
            }
        }
        Kind::Eq => {
            let c = f.children(n);
            (eval(f, c[0]) == eval(f, c[1])) as u128
        }
        Kind::Neq => {
            let c = f.children(n);
            (eval(f, c[0]) != eval(f, c[1])) as u128
        }
        Kind::Xor => {
            let c = f.children(n);
            ((eval(f, c[0]) != 0) ^ (eval(f, c[1]) != 0)) as u128
        }
        Kind::Ite => {
            let c = f.children(n);
            if eval(f, c[0]) != 0 {
                eval(f, c[1])
            } else {
                eval(f, c[2])
            }
        }
        Kind::BvUminus => {
            let c = f.children(n);
            bval::wrapping_neg(eval(f, c[0]), w)
        }
        Kind::BvPlus => {
            let c = f.children(n);
            bval::wrapping_add(eval(f, c[0]), eval(f, c[1]), w)
        }
        Kind::BvDiv => {
            let c = f.children(n);
            bval::udiv(eval(f, c[0]), eval(f, c[1]), w)
        }
        Kind::BvMod => {
            let c = f.children(n);
            bval::umod(eval(f, c[0]), eval(f, c[1]), w)
        }
        Kind::BvExtract => {
            let c = f.children(n);
            let hi = f.const_value(c[1]).unwrap() as u32;
            let lo = f.const_value(c[2]).unwrap() as u32;
            (eval(f, c[0]) >> lo) & bval::mask(hi - lo + 1)
        }
        k => panic!("eval: unsupported kind {:?}", k),
    }
}

fn lower_term(f: &mut NodeFactory, config: Config, node: ASTNode) -> ASTNode {
    let mut solver = SolverCtx::new();
    let mut cache = TransformCache::new();
    let subst = SubstitutionMap::new();
    let mut xform = Xform::new(f, &mut solver, &mut cache, &subst, config);
    xform.transform_term(node).expect("lowering should not fail on well-typed ground terms")
}

/// Reference signed division, truncated toward zero (Rust's `/` on
/// signed integers already does this).
fn ref_sdiv(a: i128, b: i128) -> i128 {
    a / b
}

/// Reference signed remainder: sign matches the dividend.
fn ref_srem(a: i128, b: i128) -> i128 {
    a % b
}

/// Reference signed modulus: sign matches the divisor (Python-style `%`).
fn ref_smod(a: i128, b: i128) -> i128 {
    let m = a % b;
    if m != 0 && (m < 0) != (b < 0) {
        m + b
    } else {
        m
    }
}

fn nonzero_width4() -> impl Strategy<Value = u128> {
    (1u128..16).prop_map(|v| v)
}

proptest! {
    #[test]
    fn sbvdiv_matches_reference(a in 0u128..16, b in nonzero_width4()) {
        let mut f = NodeFactory::new();
        let x = f.create_bvconst(WIDTH, a);
        let y = f.create_bvconst(WIDTH, b);
        let node = f.create_term(Kind::SbvDiv, WIDTH, &[x, y]);
        let lowered = lower_term(&mut f, Config::default(), node);

        let expected = bval::from_signed(ref_sdiv(bval::to_signed(a, WIDTH), bval::to_signed(b, WIDTH)), WIDTH);
        prop_assert_eq!(eval(&f, lowered), expected);
    }

    #[test]
    fn sbvrem_matches_reference(a in 0u128..16, b in nonzero_width4()) {
        let mut f = NodeFactory::new();
        let x = f.create_bvconst(WIDTH, a);
        let y = f.create_bvconst(WIDTH, b);
        let node = f.create_term(Kind::SbvRem, WIDTH, &[x, y]);
        let lowered = lower_term(&mut f, Config::default(), node);

        let expected = bval::from_signed(ref_srem(bval::to_signed(a, WIDTH), bval::to_signed(b, WIDTH)), WIDTH);
        prop_assert_eq!(eval(&f, lowered), expected);
    }

    #[test]
    fn sbvmod_matches_reference(a in 0u128..16, b in nonzero_width4()) {
        let mut f = NodeFactory::new();
        let x = f.create_bvconst(WIDTH, a);
        let y = f.create_bvconst(WIDTH, b);
        let node = f.create_term(Kind::SbvMod, WIDTH, &[x, y]);
        let lowered = lower_term(&mut f, Config::default(), node);

        let expected = bval::from_signed(ref_smod(bval::to_signed(a, WIDTH), bval::to_signed(b, WIDTH)), WIDTH);
        prop_assert_eq!(eval(&f, lowered), expected);
    }

    #[test]
    fn division_by_zero_returns_one(a in 0u128..16, signed in any::<bool>()) {
        let mut f = NodeFactory::new();
        let x = f.create_bvconst(WIDTH, a);
        let zero = f.create_zero_const(WIDTH);
        let kind = if signed { Kind::SbvDiv } else { Kind::BvDiv };
        let node = f.create_term(kind, WIDTH, &[x, zero]);
        let config = Config { division_by_zero_returns_one: true, ..Config::default() };
        let lowered = lower_term(&mut f, config, node);
        prop_assert_eq!(eval(&f, lowered), 1);
    }
}

#[test]
fn concrete_scenario_sbvdiv() {
    // SBVDIV(0b1110, 0b0011) -> 0b0000
    let mut f = NodeFactory::new();
    let a = f.create_bvconst(WIDTH, 0b1110);
    let b = f.create_bvconst(WIDTH, 0b0011);
    let node = f.create_term(Kind::SbvDiv, WIDTH, &[a, b]);
    let lowered = lower_term(&mut f, Config::default(), node);
    assert_eq!(eval(&f, lowered), 0b0000);
}

#[test]
fn concrete_scenario_sbvrem() {
    // SBVREM(0b1110, 0b0011) -> 0b1110
    let mut f = NodeFactory::new();
    let a = f.create_bvconst(WIDTH, 0b1110);
    let b = f.create_bvconst(WIDTH, 0b0011);
    let node = f.create_term(Kind::SbvRem, WIDTH, &[a, b]);
    let lowered = lower_term(&mut f, Config::default(), node);
    assert_eq!(eval(&f, lowered), 0b1110);
}

#[test]
fn concrete_scenario_sbvmod() {
    // SBVMOD(0b1110, 0b0011) -> 0b0001
    let mut f = NodeFactory::new();
    let a = f.create_bvconst(WIDTH, 0b1110);
    let b = f.create_bvconst(WIDTH, 0b0011);
    let node = f.create_term(Kind::SbvMod, WIDTH, &[a, b]);
    let lowered = lower_term(&mut f, Config::default(), node);
    assert_eq!(eval(&f, lowered), 0b0001);
}

#[test]
fn concrete_scenario_bvdiv_by_zero() {
    // BVDIV(x, 0) with division_by_zero_returns_one -> 1
    let mut f = NodeFactory::new();
    let x = f.create_bvconst(WIDTH, 0b0101);
    let zero = f.create_zero_const(WIDTH);
    let node = f.create_term(Kind::BvDiv, WIDTH, &[x, zero]);
    let config = Config { division_by_zero_returns_one: true, ..Config::default() };
    let lowered = lower_term(&mut f, config, node);
    assert_eq!(eval(&f, lowered), 0b0001);
}

#[test]
fn no_signed_kind_survives_lowering() {
    let mut f = NodeFactory::new();
    let a = f.create_bvconst(WIDTH, 7);
    let b = f.create_bvconst(WIDTH, 3);
    let node = f.create_term(Kind::SbvMod, WIDTH, &[a, b]);
    let lowered = lower_term(&mut f, Config::default(), node);
    assert!(bvlower_transform::postcondition::check(&f, lowered).is_ok());
}
