//! Hash-consed AST node handles.
//!
//! An `ASTNode` is a `Copy` index into the arena owned by a `NodeFactory`.
//! Two handles compare equal iff they index the same interned node —
//! node identity is handle identity, not structural comparison, which is
//! why every cache in this crate keys on `ASTNode` directly rather than
//! re-deriving `Eq`/`Hash` from the node's structure each time.

use crate::kind::{Kind, Type};
use smallvec::SmallVec;
use std::rc::Rc;

pub type Children = SmallVec<[ASTNode; 3]>;

/// A handle into a `NodeFactory`'s arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ASTNode(pub(crate) u32);

impl ASTNode {
    /// Raw arena index, for use in `fxhash`-backed maps/sets that want a
    /// cheap `Hash` impl.
    pub fn idx(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for ASTNode {
    fn fmt(&self, out: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(out, "n{}", self.0)
    }
}

/// Per-node payload beyond kind/type/widths/children.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Payload {
    None,
    Symbol(Rc<str>),
    Const(u128),
}

/// The structural data of a node — the key used for hash-consing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeData {
    pub kind: Kind,
    pub ty: Type,
    pub value_width: u32,
    pub index_width: u32,
    pub children: Children,
    pub payload: Payload,
}

impl NodeData {
    pub fn name(&self) -> Option<&str> {
        match &self.payload {
            Payload::Symbol(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn const_value(&self) -> Option<u128> {
        match &self.payload {
            Payload::Const(v) => Some(*v),
            _ => None,
        }
    }
}
