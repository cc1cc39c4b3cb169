//! `TransformMap`: the per-invocation memo table.
//!
//! Lifecycle is tied to exactly one top-level call: an explicit scoped
//! value created on entry to `transform_formula_top_level` and dropped
//! on every exit path, including early returns via `?`.

use bvlower_core::ASTNode;
use fxhash::FxHashMap;

#[derive(Default)]
pub struct TransformCache {
    map: FxHashMap<ASTNode, ASTNode>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, n: ASTNode) -> Option<ASTNode> {
        self.map.get(&n).copied()
    }

    /// Cache writes only ever happen for non-leaf nodes — leaves are
    /// cheap enough that memoising them just wastes a
    /// hashmap slot, so callers only call this when the input node has
    /// at least one child.
    pub fn insert(&mut self, from: ASTNode, to: ASTNode) {
        self.map.insert(from, to);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}
