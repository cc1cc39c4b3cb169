//! `TermTransform`: the recursive walk over terms.

use crate::{
    error::{Error, Result},
    sign,
    xform::Xform,
};
use bvlower_core::{pp_ast, ASTNode, Kind, Payload};
use log::trace;

impl<'a> Xform<'a> {
    pub fn transform_term(&mut self, term: ASTNode) -> Result<ASTNode> {
        if let Some(cached) = self.cache.get(term) {
            return Ok(cached);
        }

        let kind = self.f.kind(term);
        let result = match kind {
            Kind::Symbol | Kind::BvConst => term,
            Kind::Write => return Err(Error::UnsupportedTermWrite(term)),
            Kind::Read => self.transform_array(term)?,
            Kind::Ite => {
                let children = self.f.children(term).to_vec();
                let index_width = self.f.index_width(term);
                let cond = self.transform_formula(children[0])?;
                let thn = self.transform_term(children[1])?;
                let els = self.transform_term(children[2])?;
                let result = self.f.create_simplified_term_ite(cond, thn, els);
                if self.f.index_width(result) != index_width {
                    return Err(Error::WidthMismatch { input: term, result });
                }
                result
            }
            _ => {
                let children = self.f.children(term).to_vec();
                let ty = self.f.ty(term);
                let value_width = self.f.value_width(term);
                let index_width = self.f.index_width(term);

                let mut out = Vec::with_capacity(children.len());
                for c in children {
                    out.push(self.transform_term(c)?);
                }
                let mut result =
                    self.f.mk_node(kind, ty, value_width, index_width, out, Payload::None);

                if kind.is_division() {
                    if kind.is_signed_arith() {
                        result = sign::lower_signed(self.f, result)?;
                    }
                    if self.config.division_by_zero_returns_one {
                        // The divisor-zero guard must read off the
                        // *post*-lowering node: it needs to protect the
                        // final unsigned division too, not just the
                        // signed form it replaced.
                        let divisor = self.f.children(result)[1];
                        let vw = self.f.value_width(result);
                        let zero = self.f.create_zero_const(vw);
                        let one = self.f.create_one_const(vw);
                        let is_zero = self.f.create_simplified_eq(zero, divisor);
                        result = self.f.create_simplified_term_ite(is_zero, one, result);
                    }
                }
                result
            }
        };

        if !self.f.children(term).is_empty() {
            self.cache.insert(term, result);
        }

        if self.f.value_width(term) != self.f.value_width(result)
            || self.f.index_width(term) != self.f.index_width(result)
        {
            return Err(Error::WidthMismatch { input: term, result });
        }

        if term != result {
            trace!(
                "term {} -> {}",
                bvlower_pretty::display(pp_ast(self.f, term)),
                bvlower_pretty::display(pp_ast(self.f, result))
            );
        }
        Ok(result)
    }
}
