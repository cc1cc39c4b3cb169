//! `NodeFactory`: the hash-consing arena and the small set of
//! "simplifying" constructors the transform layer treats as an external
//! collaborator. The simplifier here is intentionally
//! minimal — constant folding and syntactic `ITE`/`EQ` collapses — since
//! a general algebraic simplifier is explicitly out of this crate's
//! scope; it exists so the transform compiles, is idempotent, and its
//! post-conditions are checkable.

use crate::{
    bval,
    kind::{Kind, Type},
    node::{ASTNode, Children, NodeData, Payload},
};
use fxhash::FxHashMap;
use std::rc::Rc;

pub struct NodeFactory {
    arena: Vec<NodeData>,
    interning: FxHashMap<NodeData, ASTNode>,
    true_: ASTNode,
    false_: ASTNode,
}

impl NodeFactory {
    pub fn new() -> Self {
        let mut arena = Vec::new();
        let mut interning = FxHashMap::default();

        let mut push = |arena: &mut Vec<NodeData>, interning: &mut FxHashMap<NodeData, ASTNode>, d: NodeData| {
            let n = ASTNode(arena.len() as u32);
            arena.push(d.clone());
            interning.insert(d, n);
            n
        };

        let true_ = push(
            &mut arena,
            &mut interning,
            NodeData {
                kind: Kind::True,
                ty: Type::Boolean,
                value_width: 0,
                index_width: 0,
                children: Children::new(),
                payload: Payload::None,
            },
        );
        let false_ = push(
            &mut arena,
            &mut interning,
            NodeData {
                kind: Kind::False,
                ty: Type::Boolean,
                value_width: 0,
                index_width: 0,
                children: Children::new(),
                payload: Payload::None,
            },
        );

        NodeFactory { arena, interning, true_, false_ }
    }

    pub fn true_(&self) -> ASTNode {
        self.true_
    }
    pub fn false_(&self) -> ASTNode {
        self.false_
    }

    pub fn data(&self, n: ASTNode) -> &NodeData {
        &self.arena[n.0 as usize]
    }

    pub fn kind(&self, n: ASTNode) -> Kind {
        self.data(n).kind
    }
    pub fn ty(&self, n: ASTNode) -> Type {
        self.data(n).ty
    }
    pub fn value_width(&self, n: ASTNode) -> u32 {
        self.data(n).value_width
    }
    pub fn index_width(&self, n: ASTNode) -> u32 {
        self.data(n).index_width
    }
    pub fn children(&self, n: ASTNode) -> &[ASTNode] {
        &self.data(n).children
    }
    pub fn name(&self, n: ASTNode) -> Option<&str> {
        self.data(n).name()
    }
    pub fn const_value(&self, n: ASTNode) -> Option<u128> {
        self.data(n).const_value()
    }

    pub fn is_true(&self, n: ASTNode) -> bool {
        n == self.true_
    }
    pub fn is_false(&self, n: ASTNode) -> bool {
        n == self.false_
    }

    fn intern(&mut self, d: NodeData) -> ASTNode {
        if let Some(&n) = self.interning.get(&d) {
            return n;
        }
        let n = ASTNode(self.arena.len() as u32);
        self.arena.push(d.clone());
        self.interning.insert(d, n);
        n
    }

    /// Lowest-level constructor: callers fix every field explicitly,
    /// matching the "immutable hash-consed node" invariant — no node is
    /// ever mutated after creation (a deliberate departure from the
    /// original `SetIndexWidth`-after-the-fact pattern; see DESIGN.md).
    pub fn mk_node<I: Into<Children>>(
        &mut self,
        kind: Kind,
        ty: Type,
        value_width: u32,
        index_width: u32,
        children: I,
        payload: Payload,
    ) -> ASTNode {
        self.intern(NodeData {
            kind,
            ty,
            value_width,
            index_width,
            children: children.into(),
            payload,
        })
    }

    /// A boolean-typed node (connective, comparison, equality).
    pub fn create_node(&mut self, kind: Kind, children: &[ASTNode]) -> ASTNode {
        self.mk_node(kind, Type::Boolean, 0, 0, children.iter().cloned().collect::<Children>(), Payload::None)
    }

    /// A bitvector-typed term with no index width (the common case).
    pub fn create_term(&mut self, kind: Kind, value_width: u32, children: &[ASTNode]) -> ASTNode {
        self.mk_node(kind, Type::Bitvec, value_width, 0, children.iter().cloned().collect::<Children>(), Payload::None)
    }

    pub fn create_symbol(&mut self, name: &str, ty: Type, value_width: u32, index_width: u32) -> ASTNode {
        self.mk_node(
            Kind::Symbol,
            ty,
            value_width,
            index_width,
            Children::new(),
            Payload::Symbol(Rc::from(name)),
        )
    }

    pub fn create_bvconst(&mut self, width: u32, value: u128) -> ASTNode {
        self.mk_node(
            Kind::BvConst,
            Type::Bitvec,
            width,
            0,
            Children::new(),
            Payload::Const(bval::trunc(value, width)),
        )
    }

    pub fn create_zero_const(&mut self, width: u32) -> ASTNode {
        self.create_bvconst(width, 0)
    }
    pub fn create_one_const(&mut self, width: u32) -> ASTNode {
        self.create_bvconst(width, 1)
    }

    /// `READ(arr, idx)`: value width is the array's element width.
    /// `Read` is itself bitvector-typed, not array-typed, so its own
    /// index width is 0 like any other non-array node.
    pub fn create_read(&mut self, arr: ASTNode, idx: ASTNode) -> ASTNode {
        let vw = self.value_width(arr);
        self.mk_node(Kind::Read, Type::Bitvec, vw, 0, [arr, idx].iter().cloned().collect::<Children>(), Payload::None)
    }

    /// `WRITE(arr, idx, val)`: array-typed, same element/index widths as
    /// `arr`.
    pub fn create_write(&mut self, arr: ASTNode, idx: ASTNode, val: ASTNode) -> ASTNode {
        let vw = self.value_width(val);
        let iw = self.value_width(idx);
        self.mk_node(
            Kind::Write,
            Type::Array,
            vw,
            iw,
            [arr, idx, val].iter().cloned().collect::<Children>(),
            Payload::None,
        )
    }

    pub fn create_array_symbol(&mut self, name: &str, value_width: u32, index_width: u32) -> ASTNode {
        self.create_symbol(name, Type::Array, value_width, index_width)
    }

    /// Unconditional term/array ITE — callers (the simplifying
    /// constructor, the array-lowering write/ITE-push rules) are
    /// responsible for checking that `then`/`els` agree in type & width.
    pub fn create_ite(&mut self, cond: ASTNode, then: ASTNode, els: ASTNode) -> ASTNode {
        let ty = self.ty(then);
        let vw = self.value_width(then);
        let iw = self.index_width(then);
        self.mk_node(Kind::Ite, ty, vw, iw, [cond, then, els].iter().cloned().collect::<Children>(), Payload::None)
    }

    pub fn create_bvextract(&mut self, x: ASTNode, hi: u32, lo: u32) -> ASTNode {
        let hi_c = self.create_bvconst(32, hi as u128);
        let lo_c = self.create_bvconst(32, lo as u128);
        self.create_term(Kind::BvExtract, hi - lo + 1, &[x, hi_c, lo_c])
    }

    pub fn create_bvuminus(&mut self, width: u32, x: ASTNode) -> ASTNode {
        self.create_term(Kind::BvUminus, width, &[x])
    }
    pub fn create_bvplus(&mut self, width: u32, a: ASTNode, b: ASTNode) -> ASTNode {
        self.create_term(Kind::BvPlus, width, &[a, b])
    }
    pub fn create_bvdiv(&mut self, width: u32, a: ASTNode, b: ASTNode) -> ASTNode {
        self.create_term(Kind::BvDiv, width, &[a, b])
    }
    pub fn create_bvmod(&mut self, width: u32, a: ASTNode, b: ASTNode) -> ASTNode {
        self.create_term(Kind::BvMod, width, &[a, b])
    }

    pub fn create_eq(&mut self, a: ASTNode, b: ASTNode) -> ASTNode {
        self.create_node(Kind::Eq, &[a, b])
    }
    pub fn create_xor(&mut self, a: ASTNode, b: ASTNode) -> ASTNode {
        self.create_node(Kind::Xor, &[a, b])
    }

    /// `CreateSimplifiedEQ`: collapses syntactically/constant-identical
    /// sides to `TRUE`/`FALSE` rather than emitting an `EQ` node.
    pub fn create_simplified_eq(&mut self, a: ASTNode, b: ASTNode) -> ASTNode {
        if a == b {
            return self.true_;
        }
        if let (Some(va), Some(vb)) = (self.const_value(a), self.const_value(b)) {
            return if va == vb { self.true_ } else { self.false_ };
        }
        self.create_eq(a, b)
    }

    /// `CreateSimplifiedTermITE`: collapses on a constant condition or
    /// syntactically-identical branches.
    pub fn create_simplified_term_ite(&mut self, cond: ASTNode, then: ASTNode, els: ASTNode) -> ASTNode {
        if self.is_true(cond) {
            return then;
        }
        if self.is_false(cond) {
            return els;
        }
        if then == els {
            return then;
        }
        self.create_ite(cond, then, els)
    }

    /// `BVTypeCheck`: shallow well-typedness assertion on a single node,
    /// assuming its children are already well-typed. Not a full type
    /// checker — just enough to catch the width mismatches this crate's
    /// rewrites must never introduce.
    pub fn bv_type_check(&self, n: ASTNode) -> bool {
        let d = self.data(n);
        match d.kind {
            Kind::BvPlus | Kind::BvMinus | Kind::BvDiv | Kind::BvMod => {
                d.children.len() == 2
                    && d.children.iter().all(|&c| self.value_width(c) == d.value_width)
            }
            Kind::BvUminus => d.children.len() == 1 && self.value_width(d.children[0]) == d.value_width,
            Kind::Ite => {
                d.children.len() == 3
                    && self.value_width(d.children[1]) == d.value_width
                    && self.value_width(d.children[2]) == d.value_width
                    && self.ty(d.children[1]) == d.ty
                    && self.ty(d.children[2]) == d.ty
            }
            Kind::Eq | Kind::Neq => {
                d.children.len() == 2 && self.value_width(d.children[0]) == self.value_width(d.children[1])
            }
            Kind::Read => d.children.len() == 2 && self.ty(d.children[0]) == Type::Array,
            Kind::Write => {
                d.children.len() == 3
                    && self.ty(d.children[0]) == Type::Array
                    && self.value_width(d.children[2]) == d.value_width
            }
            _ => true,
        }
    }

    /// `SimplifyTerm_TopLevel`: a minimal bottom-up pass folding constant
    /// conditions and redundant branches introduced by a rewrite (chiefly
    /// used by `SignLowering` on the `ITE` tree it just built). Uses a
    /// call-local memo, independent of the transform's own cache.
    pub fn simplify_term_top_level(&mut self, n: ASTNode) -> ASTNode {
        let mut memo = FxHashMap::default();
        self.simplify_rec(n, &mut memo)
    }

    fn simplify_rec(&mut self, n: ASTNode, memo: &mut FxHashMap<ASTNode, ASTNode>) -> ASTNode {
        if let Some(&u) = memo.get(&n) {
            return u;
        }
        let d = self.data(n).clone();
        let u = if d.children.is_empty() {
            n
        } else {
            match d.kind {
                Kind::Ite => {
                    let c = self.simplify_rec(d.children[0], memo);
                    let t = self.simplify_rec(d.children[1], memo);
                    let e = self.simplify_rec(d.children[2], memo);
                    self.create_simplified_term_ite(c, t, e)
                }
                Kind::Eq => {
                    let a = self.simplify_rec(d.children[0], memo);
                    let b = self.simplify_rec(d.children[1], memo);
                    self.create_simplified_eq(a, b)
                }
                _ => {
                    let mut kids = Children::new();
                    for &c in d.children.iter() {
                        kids.push(self.simplify_rec(c, memo));
                    }
                    if kids.as_slice() == d.children.as_slice() {
                        n
                    } else {
                        self.mk_node(d.kind, d.ty, d.value_width, d.index_width, kids, d.payload.clone())
                    }
                }
            }
        };
        memo.insert(n, u);
        u
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}
