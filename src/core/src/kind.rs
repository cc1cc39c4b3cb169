//! The closed set of node kinds and types.
//!
//! The `Kind`/`Type` enumeration driving the AST: a tagged sum,
//! dispatched on by value, with no inheritance.

use std::fmt;

/// The type of a node's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    Bitvec,
    Array,
}

/// Node kind. Arity and typing rules are fixed per-kind; see `NodeFactory`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    True,
    False,
    Symbol,
    BvConst,
    Undefined,

    // boolean connectives
    Not,
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Iff,
    Implies,
    /// Conditional. Boolean-typed when used as a formula, bitvector- or
    /// array-typed when used as a term; the `Type` field on the node
    /// disambiguates.
    Ite,

    // comparisons
    Eq,
    Neq,
    BvLt,
    BvLe,
    BvGt,
    BvGe,
    BvSlt,
    BvSle,
    BvSgt,
    BvSge,

    // bitvector arithmetic
    BvPlus,
    BvMinus,
    BvUminus,
    BvDiv,
    BvMod,
    BvExtract,
    BvConcat,

    // signed arithmetic, lowered away by this crate
    SbvDiv,
    SbvRem,
    SbvMod,

    // arrays, eliminated by this crate
    Read,
    Write,
}

impl Kind {
    /// Is this kind only ever found in formula (Boolean) position, i.e.
    /// dispatched on by `FormulaTransform` rather than `TermTransform`?
    ///
    /// `Ite` and `Symbol` are deliberately excluded: both can appear at
    /// either position, disambiguated by `Type`, exactly as in the
    /// original AST.
    pub fn is_pure_connective(self) -> bool {
        use Kind::*;
        matches!(self, Not | And | Or | Nand | Nor | Xor | Iff | Implies)
    }

    /// Comparison kinds: two term children, one boolean result.
    pub fn is_comparison(self) -> bool {
        use Kind::*;
        matches!(
            self,
            BvLt | BvLe | BvGt | BvGe | BvSlt | BvSle | BvSgt | BvSge | Neq
        )
    }

    pub fn is_signed_arith(self) -> bool {
        matches!(self, Kind::SbvDiv | Kind::SbvRem | Kind::SbvMod)
    }

    pub fn is_division(self) -> bool {
        matches!(
            self,
            Kind::BvDiv | Kind::BvMod | Kind::SbvDiv | Kind::SbvRem | Kind::SbvMod
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "{:?}", self)
    }
}
