//! `TopLevel`: the only entry point callers outside this
//! crate should use.

use crate::{cache::TransformCache, config::Config, post, solver_ctx::SolverCtx, xform::Xform};
use crate::error::{Error, Result};
use bvlower_core::{ASTNode, NodeFactory, SubstitutionMap, Type};

/// Lower a Boolean-typed formula to a pure bit-vector formula.
///
/// `solver` carries state across any number of calls; a
/// fresh `TransformCache` is allocated per call and dropped at the end.
pub fn transform_formula_top_level(
    f: &mut NodeFactory,
    solver: &mut SolverCtx,
    subst: &SubstitutionMap,
    config: Config,
    form: ASTNode,
) -> Result<ASTNode> {
    if f.ty(form) != Type::Boolean {
        return Err(Error::NotAFormula(form));
    }

    let mut cache = TransformCache::new();
    let result = {
        let mut xform = Xform::new(f, solver, &mut cache, subst, config);
        xform.transform_formula(form)?
    };

    if cfg!(debug_assertions) {
        post::check(f, result)?;
    }

    Ok(result)
}
