//! Rendering `ASTNode`s as S-expressions via `bvlower-pretty`, for trace
//! logging and test-failure messages. A node on its own doesn't know how
//! to print itself (it's just a handle), so it's paired here with the
//! factory that owns it.

use crate::{factory::NodeFactory, node::ASTNode};
use bvlower_pretty::{Ctx, Pretty};

/// A node paired with the factory that can resolve it; implements
/// `Pretty` by borrowing both.
#[derive(Copy, Clone)]
pub struct PpNode<'a>(pub &'a NodeFactory, pub ASTNode);

/// `ast::pp(f, &n)`.
pub fn pp_ast(f: &NodeFactory, n: ASTNode) -> PpNode<'_> {
    PpNode(f, n)
}

impl<'a> Pretty for PpNode<'a> {
    fn pp(&self, ctx: &mut Ctx) {
        let PpNode(f, n) = *self;
        let d = f.data(n);
        if let Some(name) = d.name() {
            ctx.text(name);
            return;
        }
        if let Some(v) = d.const_value() {
            ctx.text_string(format!("0b{:0w$b}", v, w = d.value_width.max(1) as usize));
            return;
        }
        if d.children.is_empty() {
            ctx.text_string(format!("{}", d.kind));
            return;
        }
        ctx.sexp(|ctx| {
            ctx.text_string(format!("{}", d.kind));
            for &c in d.children.iter() {
                ctx.space();
                ctx.pp(&PpNode(f, c));
            }
        });
    }
}
