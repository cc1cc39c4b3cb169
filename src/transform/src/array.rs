//! `ArrayLowering`: eliminates `READ`/`WRITE` via
//! Ackermannization and ITE chains.

use crate::{
    error::{Error, Result},
    xform::Xform,
};
use bvlower_core::{pp_ast, ASTNode, Kind, Type};
use log::trace;

impl<'a> Xform<'a> {
    /// Entry point: `term` must be a `READ(A, i)` node, with `i` not yet
    /// transformed.
    pub fn transform_array(&mut self, term: ASTNode) -> Result<ASTNode> {
        if let Some(cached) = self.cache.get(term) {
            return Ok(cached);
        }

        let children = self.f.children(term).to_vec();
        let arr = children[0];
        let idx = children[1];

        // canonical form, used for every side-table lookup
        let idx_t = self.transform_term(idx)?;
        let p = self.f.create_read(arr, idx_t);

        if let Some(cached) = self.solver.arrayread_ite(p) {
            self.cache.insert(term, cached);
            return Ok(cached);
        }

        let result = match self.f.kind(arr) {
            Kind::Symbol => self.read_over_symbol(arr, idx_t, p)?,
            Kind::Write => self.read_over_write(arr, idx_t)?,
            Kind::Ite => self.read_over_ite(arr, idx_t)?,
            _ => return Err(Error::ReadOnNonArray(term)),
        };

        self.cache.insert(term, result);
        trace!(
            "array-read {} -> {}",
            bvlower_pretty::display(pp_ast(self.f, term)),
            bvlower_pretty::display(pp_ast(self.f, result))
        );
        Ok(result)
    }

    /// `READ(A, i)` with `A` a bare array symbol.
    fn read_over_symbol(&mut self, arr: ASTNode, idx_t: ASTNode, p: ASTNode) -> Result<ASTNode> {
        let v = if let Some(val) = self.subst.check(p) {
            // Bound by the substitution map. Deliberately *not* recorded
            // in `introduced_symbols` — it wasn't manufactured here.
            self.solver.arrayread_symbol.insert(p, val);
            val
        } else if let Some(existing) = self.solver.arrayread_symbol(p) {
            existing
        } else {
            let prefix = self.f.name(arr).unwrap_or("arr").to_string();
            let id = self.solver.next_symbol_id();
            let name = format!("{}array_{}", prefix, id);
            let vw = self.f.value_width(p);
            // A plain scalar bitvector, not an array: index_width is 0.
            let sym = self.f.create_symbol(&name, Type::Bitvec, vw, 0);
            self.solver.arrayread_symbol.insert(p, sym);
            self.solver.introduced_symbols.insert(sym);
            sym
        };

        let e = if self.config.arrayread_refinement_flag {
            // A bare variable; the ITE chain is built later by a
            // refinement loop outside this crate.
            v
        } else {
            let read_indices = self.solver.read_indices(arr).to_vec();
            let mut e = v;
            // Reverse-insertion order: the most recent read sits at the
            // innermost (default) position. Preserved bit-for-bit since
            // downstream SAT behaviour is sensitive to this shape

            for &j in read_indices.iter().rev() {
                let cond = self.f.create_simplified_eq(idx_t, j);
                if self.f.is_false(cond) {
                    continue;
                }
                let arr_read = self.f.create_read(arr, j);
                let v_j = self
                    .solver
                    .arrayread_symbol(arr_read)
                    .ok_or(Error::MissingAckermannSymbol(arr_read))?;
                e = self.f.create_simplified_term_ite(cond, v_j, e);
            }
            e
        };

        self.solver
            .arrayname_readindices
            .entry(arr)
            .or_insert_with(Vec::new)
            .push(idx_t);
        self.solver.arrayread_ite.insert(p, e);
        Ok(e)
    }

    /// `READ(WRITE(B, wi, wv), i)`.
    fn read_over_write(&mut self, write: ASTNode, idx_t: ASTNode) -> Result<ASTNode> {
        let wchildren = self.f.children(write).to_vec();
        let (b, wi, wv) = (wchildren[0], wchildren[1], wchildren[2]);

        if self.f.ty(b) != Type::Array {
            return Err(Error::WriteOnNonArray(write));
        }

        let wi_t = self.transform_term(wi)?;
        let wv_t = self.transform_term(wv)?;

        match self.f.kind(b) {
            Kind::Symbol | Kind::Write => {
                let cond = self.f.create_simplified_eq(wi_t, idx_t);
                let read_b = self.f.create_read(b, idx_t);
                let inner = self.transform_array(read_b)?;
                Ok(self.f.create_simplified_term_ite(cond, wv_t, inner))
            }
            Kind::Ite => {
                let ite_children = self.f.children(b).to_vec();
                let (c, t, e) = (ite_children[0], ite_children[1], ite_children[2]);
                let write_true = self.f.create_write(t, wi_t, wv_t);
                let write_false = self.f.create_write(e, wi_t, wv_t);
                let c_t = self.transform_formula(c)?;
                let a_prime = self.f.create_simplified_term_ite(c_t, write_true, write_false);
                debug_assert!(self.f.bv_type_check(a_prime), "rebuilt WRITE/ITE fails to type-check");
                let read_a_prime = self.f.create_read(a_prime, idx_t);
                self.transform_array(read_a_prime)
            }
            k => Err(Error::BadArrayShape { node: write, kind: k }),
        }
    }

    /// `READ(ITE(c, t, e), i)`.
    fn read_over_ite(&mut self, arr_ite: ASTNode, idx_t: ASTNode) -> Result<ASTNode> {
        let children = self.f.children(arr_ite).to_vec();
        let (c, t, e) = (children[0], children[1], children[2]);

        let c_t = self.transform_formula(c)?;
        let read_t = self.f.create_read(t, idx_t);
        let rt = self.transform_array(read_t)?;
        let read_e = self.f.create_read(e, idx_t);
        let re = self.transform_array(read_e)?;
        Ok(self.f.create_simplified_term_ite(c_t, rt, re))
    }
}
