//! `PostCondition`: walks a transformed formula and
//! asserts the shape the rest of the pipeline relies on — no signed
//! division kinds, no `READ`/`WRITE`, and no nonzero index width left
//! anywhere. Debug-only: a violation here means this crate has a bug,
//! not that the input was ill-formed.

use crate::error::{Error, Result};
use bvlower_core::{ASTNode, Kind, NodeFactory};
use fxhash::FxHashSet;

pub fn check(f: &NodeFactory, root: ASTNode) -> Result<()> {
    let mut seen = FxHashSet::default();
    check_rec(f, root, &mut seen)
}

fn check_rec(f: &NodeFactory, n: ASTNode, seen: &mut FxHashSet<ASTNode>) -> Result<()> {
    if !seen.insert(n) {
        return Ok(());
    }

    let kind = f.kind(n);
    match kind {
        Kind::SbvDiv | Kind::SbvRem | Kind::SbvMod => {
            return Err(Error::IllegalKind {
                node: n,
                kind,
                where_: "post-condition (signed arithmetic survived)",
            })
        }
        Kind::Read | Kind::Write => {
            return Err(Error::IllegalKind {
                node: n,
                kind,
                where_: "post-condition (array op survived)",
            })
        }
        _ => {}
    }

    if f.index_width(n) != 0 {
        return Err(Error::WidthMismatch { input: n, result: n });
    }

    for &c in f.children(n) {
        check_rec(f, c, seen)?;
    }
    Ok(())
}
