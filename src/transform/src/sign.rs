//! `SignLowering`: rewrites `SBVDIV`/`SBVREM`/`SBVMOD` into unsigned
//! expressions. `BVMOD` is computed once and negated at the end rather
//! than recomputed per branch — it's the expensive primitive here.

use crate::error::{Error, Result};
use bvlower_core::{ASTNode, Kind, NodeFactory};
use log::trace;

/// `msb(x) = (x[hi:hi] == 1)`: a 1-bit `BVEXTRACT` compared by `EQ` to
/// the 1-bit constant `1`. Index constants for `BVEXTRACT` are always
/// 32 bits wide, independent of the operand's own width.
fn msb(f: &mut NodeFactory, x: ASTNode, hi: u32) -> ASTNode {
    let one = f.create_one_const(1);
    let bit = f.create_bvextract(x, hi, hi);
    f.create_eq(one, bit)
}

/// `abs(x) = ITE(msb(x), -x, x)`, given `msb(x)` already computed.
fn abs_given_msb(f: &mut NodeFactory, width: u32, x: ASTNode, is_neg: ASTNode) -> ASTNode {
    let neg_x = f.create_bvuminus(width, x);
    f.create_ite(is_neg, neg_x, x)
}

/// Lower a single `SBVDIV`/`SBVREM`/`SBVMOD` node with already-transformed
/// children. Returns the unsigned-only replacement, simplified once at
/// the end.
pub fn lower_signed(f: &mut NodeFactory, node: ASTNode) -> Result<ASTNode> {
    let kind = f.kind(node);
    let width = f.value_width(node);
    let children = f.children(node).to_vec();
    if children.len() != 2 {
        return Err(Error::IllegalKind {
            node,
            kind,
            where_: "sign-lowering",
        });
    }
    let dividend = children[0];
    let divisor = children[1];
    let hi = width.saturating_sub(1);

    let cond_dividend = msb(f, dividend, hi);
    let cond_divisor = msb(f, divisor, hi);

    let pos_dividend = abs_given_msb(f, width, dividend, cond_dividend);
    let pos_divisor = abs_given_msb(f, width, divisor, cond_divisor);

    let result = match kind {
        Kind::SbvRem => {
            // BVMOD is expensive: compute it once.
            let modnode = f.create_bvmod(width, pos_dividend, pos_divisor);
            let neg_mod = f.create_bvuminus(width, modnode);
            f.create_ite(cond_dividend, neg_mod, modnode)
        }
        Kind::SbvMod => {
            let urem = f.create_bvmod(width, pos_dividend, pos_divisor);
            let neg_urem = f.create_bvuminus(width, urem);
            let rev = f.create_ite(cond_dividend, neg_urem, urem);
            let xor_node = f.create_xor(cond_dividend, cond_divisor);
            let plus = f.create_bvplus(width, rev, divisor);
            f.create_ite(xor_node, plus, rev)
        }
        Kind::SbvDiv => {
            let divnode = f.create_bvdiv(width, pos_dividend, pos_divisor);
            let neg_div = f.create_bvuminus(width, divnode);
            let xor_node = f.create_xor(cond_dividend, cond_divisor);
            f.create_ite(xor_node, neg_div, divnode)
        }
        _ => {
            return Err(Error::IllegalKind {
                node,
                kind,
                where_: "sign-lowering",
            })
        }
    };

    let simplified = f.simplify_term_top_level(result);
    trace!("sign-lowering {:?} -> {:?}", node, simplified);
    Ok(simplified)
}
