//! Read-only configuration flags. Plain `Copy` struct, no
//! config-file parsing — that machinery belongs upstream of this crate.

#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// When set, every division/modulus (signed or unsigned) whose
    /// divisor is zero returns `1` of matching width instead of leaving
    /// the divide-by-zero case to the downstream encoding.
    pub division_by_zero_returns_one: bool,

    /// When set, array reads produce a bare Ackermann variable and defer
    /// ITE-chain construction to a separate refinement loop.
    pub arrayread_refinement_flag: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            division_by_zero_returns_one: false,
            arrayread_refinement_flag: false,
        }
    }
}
