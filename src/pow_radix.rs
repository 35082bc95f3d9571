//! Fixed-base windowed modular exponentiation.
//!
//! Precomputes a table of powers of a single base element so that
//! `base^e mod P` can be answered with `rows` table lookups and
//! multiplications instead of a full square-and-multiply ladder.

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{U256, U4096};
use tracing::debug;

use crate::params::P_LIMBS;

/// Memory/speed tier for a [`PowRadix`] table. Larger tables trade memory for
/// fewer multiplications per exponentiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowRadixOption {
    /// No table; falls back to a generic modpow.
    NoAcceleration,
    /// 8-bit windows, ~4 MB for the production group.
    LowMemoryUse,
    /// 12-bit windows, ~44 MB for the production group.
    HighMemoryUse,
    /// 16-bit windows, ~500 MB for the production group.
    ExtremeMemoryUse,
}

impl PowRadixOption {
    fn window_bits(self) -> Option<u32> {
        match self {
            PowRadixOption::NoAcceleration => None,
            PowRadixOption::LowMemoryUse => Some(8),
            PowRadixOption::HighMemoryUse => Some(12),
            PowRadixOption::ExtremeMemoryUse => Some(16),
        }
    }
}

/// A precomputed table of powers of one base element, able to answer
/// `base^e mod P` for any `e` in `[0, Q)`.
pub(crate) struct PowRadix {
    option: PowRadixOption,
    k: u32,
    table: Vec<Vec<U4096>>,
    p_params: DynResidueParams<P_LIMBS>,
}

impl PowRadix {
    pub(crate) fn new(
        base: U4096,
        option: PowRadixOption,
        p_params: DynResidueParams<P_LIMBS>,
        q_bits: usize,
    ) -> Self {
        let Some(k) = option.window_bits() else {
            return PowRadix {
                option,
                k: 0,
                table: Vec::new(),
                p_params,
            };
        };
        let rows = q_bits.div_ceil(k as usize);
        let cols = 1usize << k;

        let mut table = Vec::with_capacity(rows);
        let mut row_base = DynResidue::new(&base, p_params);
        for _ in 0..rows {
            let mut row = Vec::with_capacity(cols);
            let mut acc = DynResidue::new(&U4096::ONE, p_params);
            row.push(acc.retrieve());
            for _ in 1..cols {
                acc = acc.mul(&row_base);
                row.push(acc.retrieve());
            }
            // next row's base is this row's base raised to 2^k
            for _ in 0..k {
                row_base = row_base.square();
            }
            table.push(row);
        }

        debug!(
            tier = ?option,
            k,
            rows,
            cols,
            "built pow-radix table"
        );

        PowRadix {
            option,
            k,
            table,
            p_params,
        }
    }

    pub(crate) fn option(&self) -> PowRadixOption {
        self.option
    }

    /// `base^e mod P`, equivalent to a naive modpow for any `e < Q`.
    pub(crate) fn pow(&self, base: &U4096, e: &U256) -> U4096 {
        if self.table.is_empty() {
            let base_res = DynResidue::new(base, self.p_params);
            return base_res.pow(e).retrieve();
        }

        let mask = U256::ONE.shl_vartime(self.k as usize).wrapping_sub(&U256::ONE);
        let mut acc = DynResidue::new(&U4096::ONE, self.p_params);
        for (i, row) in self.table.iter().enumerate() {
            let digit = e.shr_vartime(i * self.k as usize).bitand(&mask);
            let idx = digit.as_words()[0] as usize;
            let factor = DynResidue::new(&row[idx], self.p_params);
            acc = acc.mul(&factor);
        }
        acc.retrieve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSet;

    #[test]
    fn matches_naive_modpow_across_tiers() {
        let params = ParamSet::TestSmall.load();
        let p_params = DynResidueParams::new(&params.p);
        let q_bits = params.q.bits_vartime();

        for tier in [
            PowRadixOption::NoAcceleration,
            PowRadixOption::LowMemoryUse,
            PowRadixOption::HighMemoryUse,
        ] {
            let radix = PowRadix::new(params.g, tier, p_params, q_bits);
            for e in [0u64, 1, 2, 17, 1000, 32632] {
                let e = U256::from_u64(e);
                let naive = DynResidue::new(&params.g, p_params).pow(&e).retrieve();
                assert_eq!(radix.pow(&params.g, &e), naive, "tier {:?} mismatched at e={:?}", tier, e);
            }
        }
    }
}
