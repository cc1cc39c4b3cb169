//! `CheckSubstitutionMap`: a read-only map from (typically
//! constant-index) array reads to a statically known value, consulted by
//! `ArrayLowering` before it manufactures a fresh Ackermann variable.
//!
//! Population of this map (e.g. from a counter-example or a prior solve)
//! is external to this crate; we only provide the lookup surface the
//! transform depends on.

use crate::node::ASTNode;
use fxhash::FxHashMap;

#[derive(Default)]
pub struct SubstitutionMap {
    map: FxHashMap<ASTNode, ASTNode>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, read: ASTNode, value: ASTNode) {
        self.map.insert(read, value);
    }

    /// `CheckSubstitutionMap(node, out_value)`: returns the bound value,
    /// if any.
    pub fn check(&self, node: ASTNode) -> Option<ASTNode> {
        self.map.get(&node).copied()
    }
}
