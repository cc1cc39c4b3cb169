//! `FormulaTransform`: the recursive walk over formulas.

use crate::{
    error::{Error, Result},
    xform::Xform,
};
use bvlower_core::{pp_ast, Kind, Type};
use log::trace;

impl<'a> Xform<'a> {
    pub fn transform_formula(&mut self, form: bvlower_core::ASTNode) -> Result<bvlower_core::ASTNode> {
        if let Some(cached) = self.cache.get(form) {
            return Ok(cached);
        }

        let kind = self.f.kind(form);
        let result = match kind {
            Kind::True | Kind::False => form,
            Kind::Symbol if self.f.ty(form) == Type::Boolean => form,
            Kind::Not => {
                let child = self.f.children(form)[0];
                let child = self.transform_formula(child)?;
                self.f.create_node(Kind::Not, &[child])
            }
            k if k.is_comparison() => {
                let children = self.f.children(form).to_vec();
                let a = self.transform_term(children[0])?;
                let b = self.transform_term(children[1])?;
                self.f.create_node(k, &[a, b])
            }
            Kind::Eq => {
                let children = self.f.children(form).to_vec();
                let t1 = self.transform_term(children[0])?;
                let t2 = self.transform_term(children[1])?;
                self.f.create_simplified_eq(t1, t2)
            }
            k if k.is_pure_connective() || k == Kind::Ite => {
                let children = self.f.children(form).to_vec();
                let mut out = Vec::with_capacity(children.len());
                for c in children {
                    out.push(self.transform_formula(c)?);
                }
                self.f.create_node(k, &out)
            }
            _ => {
                return Err(Error::IllegalKind {
                    node: form,
                    kind,
                    where_: "formula",
                })
            }
        };

        if !self.f.children(form).is_empty() {
            self.cache.insert(form, result);
        }
        if form != result {
            trace!("formula {} -> {}", bvlower_pretty::display(pp_ast(self.f, form)), bvlower_pretty::display(pp_ast(self.f, result)));
        }
        Ok(result)
    }
}
