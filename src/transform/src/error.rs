//! One sum-typed error, carrying the offending node, for every fatal
//! condition the transform can hit. Every error here is a
//! solver/programmer invariant violation: none are meant to be handled
//! by the caller beyond propagation and diagnosis, but funnelling them
//! through `Result` lets tests assert on the specific `Kind`.

use bvlower_core::{ASTNode, Kind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a formula: root node {0:?} is not Boolean-typed")]
    NotAFormula(ASTNode),

    #[error("illegal kind {kind:?} at {where_} position for node {node:?}")]
    IllegalKind {
        node: ASTNode,
        kind: Kind,
        where_: &'static str,
    },

    #[error("WRITE encountered outside of a parent READ: {0:?}")]
    UnsupportedTermWrite(ASTNode),

    #[error("width mismatch: input {input:?} and result {result:?} disagree on value/index width")]
    WidthMismatch { input: ASTNode, result: ASTNode },

    #[error("WRITE's array argument is not array-typed: {0:?}")]
    WriteOnNonArray(ASTNode),

    #[error("READ's array argument is of unsupported kind {kind:?}: {node:?}")]
    BadArrayShape { node: ASTNode, kind: Kind },

    #[error("no Ackermann variable recorded for prior read {0:?}")]
    MissingAckermannSymbol(ASTNode),

    #[error("READ over non-array-shaped node {0:?}")]
    ReadOnNonArray(ASTNode),
}

pub type Result<T> = std::result::Result<T, Error>;
