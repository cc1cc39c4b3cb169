//! Shared recursion context for `FormulaTransform`/`TermTransform`/
//! `ArrayLowering`.
//!
//! Modelling the mutual recursion as methods on one struct holding
//! borrowed state avoids a coroutine or CPS transform while keeping the
//! cache and solver-lifetime tables as ordinary Rust borrows instead of
//! statics.

use crate::{cache::TransformCache, config::Config, solver_ctx::SolverCtx};
use bvlower_core::{NodeFactory, SubstitutionMap};

pub struct Xform<'a> {
    pub f: &'a mut NodeFactory,
    pub solver: &'a mut SolverCtx,
    pub cache: &'a mut TransformCache,
    pub subst: &'a SubstitutionMap,
    pub config: Config,
}

impl<'a> Xform<'a> {
    pub fn new(
        f: &'a mut NodeFactory,
        solver: &'a mut SolverCtx,
        cache: &'a mut TransformCache,
        subst: &'a SubstitutionMap,
        config: Config,
    ) -> Self {
        Xform { f, solver, cache, subst, config }
    }
}
