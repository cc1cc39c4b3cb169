//! `SolverCtx`: the solver-lifetime state `ArrayLowering` mutates.
//!
//! Unlike `TransformCache`, this survives across any number of top-level
//! calls — later queries must see Ackermann variables introduced by
//! earlier ones. It lives on the solver context object the
//! caller owns, not behind a `static`.

use bvlower_core::ASTNode;
use fxhash::{FxHashMap, FxHashSet};

#[derive(Default)]
pub struct SolverCtx {
    /// `READ(A, i)` (transformed `i`) -> the Ackermann symbol for it.
    pub(crate) arrayread_symbol: FxHashMap<ASTNode, ASTNode>,

    /// `READ(A, i)` -> the fully-expanded ITE chain produced the first
    /// time it was lowered; repeated reads of the same `(A,i)` return
    /// this identical expression.
    pub(crate) arrayread_ite: FxHashMap<ASTNode, ASTNode>,

    /// Array symbol -> transformed read indices seen so far, in
    /// DAG-traversal (insertion) order.
    pub(crate) arrayname_readindices: FxHashMap<ASTNode, Vec<ASTNode>>,

    /// Symbols manufactured by `ArrayLowering`, for downstream model
    /// reconstruction.
    pub(crate) introduced_symbols: FxHashSet<ASTNode>,

    symbol_count: u64,
}

impl SolverCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post-increment counter used to build fresh Ackermann variable
    /// names (`"<arrname>array_<n>"`).
    pub(crate) fn next_symbol_id(&mut self) -> u64 {
        let n = self.symbol_count;
        self.symbol_count += 1;
        n
    }

    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    pub fn introduced_symbols(&self) -> impl Iterator<Item = &ASTNode> {
        self.introduced_symbols.iter()
    }

    pub fn arrayread_symbol(&self, read: ASTNode) -> Option<ASTNode> {
        self.arrayread_symbol.get(&read).copied()
    }

    pub fn arrayread_ite(&self, read: ASTNode) -> Option<ASTNode> {
        self.arrayread_ite.get(&read).copied()
    }

    pub fn read_indices(&self, arr: ASTNode) -> &[ASTNode] {
        self.arrayname_readindices
            .get(&arr)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
