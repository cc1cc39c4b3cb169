//! The hash-consed AST this crate's transform operates over.
//!
//! Node construction, hash-consing, a minimal simplifier, and the
//! substitution map — kept deliberately small so the transform layer in
//! `bvlower-transform` has something real to sit on.

pub mod bval;
pub mod factory;
pub mod kind;
pub mod node;
pub mod pp;
pub mod subst;

pub use crate::{
    factory::NodeFactory,
    kind::{Kind, Type},
    node::{ASTNode, NodeData, Payload},
    pp::{pp_ast, PpNode},
    subst::SubstitutionMap,
};
