//! A demo binary: build a small formula mixing array reads/writes and
//! signed division directly through `NodeFactory` (there is no parser in
//! this crate — see SPEC_FULL.md §0) and print it before/after lowering.

extern crate bvlower_core;
extern crate bvlower_logger;
extern crate bvlower_pretty;
extern crate bvlower_transform;
#[macro_use]
extern crate log;

use bvlower_core::{pp_ast, Kind, NodeFactory, SubstitutionMap, Type};
use bvlower_transform::{transform_formula_top_level, Config, SolverCtx};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    bvlower_logger::init();

    let mut f = NodeFactory::new();

    // x : bv8, a : array(bv8 -> bv8)
    let x = f.create_symbol("x", Type::Bitvec, 8, 0);
    let y = f.create_symbol("y", Type::Bitvec, 8, 0);
    let a = f.create_array_symbol("a", 8, 8);

    // a' = WRITE(a, x, y)
    let a_written = f.create_write(a, x, y);
    // READ(a', x)
    let read = f.create_read(a_written, x);

    // SBVDIV(x, y)
    let sdiv = f.create_term(Kind::SbvDiv, 8, &[x, y]);

    // formula: READ(a', x) == SBVDIV(x, y)
    let formula = f.create_eq(read, sdiv);

    info!("input formula: {}", bvlower_pretty::display(pp_ast(&f, formula)));

    let mut solver = SolverCtx::new();
    let subst = SubstitutionMap::new();
    let config = Config::default();

    let lowered = transform_formula_top_level(&mut f, &mut solver, &subst, config, formula)?;

    info!(
        "lowered formula: {}",
        bvlower_pretty::display(pp_ast(&f, lowered))
    );
    info!("introduced {} Ackermann symbol(s)", solver.symbol_count());
    println!("{}", bvlower_pretty::display(pp_ast(&f, lowered)));

    Ok(())
}
