use std::sync::{Arc, OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{NonZero, U256, U4096};
use tracing::error;

use crate::dlog::DLog;
use crate::error::{Error, Result};
use crate::group::element::{
    bytes_to_u256_checked, bytes_to_u256_mod, bytes_to_u4096_checked, bytes_to_u4096_mod,
    ElementModP, ElementModQ,
};
use crate::params::{ParamSet, P_LIMBS, Q_LIMBS};
use crate::pow_radix::{PowRadix, PowRadixOption};

/// Holds the group parameters and caches (pow-radix table, discrete-log
/// table) shared by every [`ElementModP`]/[`ElementModQ`] it produces.
///
/// Immutable after construction and safe to share across threads: it is
/// always handed out wrapped in an `Arc`.
pub struct GroupContext {
    pub(crate) p: U4096,
    pub(crate) q: U256,
    pub(crate) g: U4096,
    pub(crate) r: U4096,
    pub(crate) p_params: DynResidueParams<P_LIMBS>,
    pub(crate) q_params: DynResidueParams<Q_LIMBS>,
    production: bool,
    pow_radix_option: PowRadixOption,
    g_pow_radix: OnceLock<PowRadix>,
    dlog: DLog,
}

impl GroupContext {
    /// Builds a new context from a bundled parameter set. Constructing a
    /// context is the expensive, one-time setup step; reuse the returned
    /// `Arc` across every operation that needs this group.
    pub fn new(param_set: ParamSet, pow_radix_option: PowRadixOption) -> Arc<GroupContext> {
        let params = param_set.load();
        let p_params = DynResidueParams::new(&params.p);
        let q_params = DynResidueParams::new(&params.q);
        Arc::new(GroupContext {
            p: params.p,
            q: params.q,
            g: params.g,
            r: params.r,
            p_params,
            q_params,
            production: matches!(param_set, ParamSet::Production),
            pow_radix_option,
            g_pow_radix: OnceLock::new(),
            dlog: DLog::new(params.g, p_params, params.dlog_max),
        })
    }

    pub fn p(&self) -> &U4096 {
        &self.p
    }

    pub fn q(&self) -> &U256 {
        &self.q
    }

    pub fn g(&self) -> &U4096 {
        &self.g
    }

    pub fn r(&self) -> &U4096 {
        &self.r
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Two contexts may interoperate iff they share the same production flag
    /// (which in practice means the same bundled parameters).
    pub fn is_compatible(&self, other: &GroupContext) -> bool {
        self.production == other.production
    }

    pub fn assert_compatible(&self, other: &GroupContext) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            error!("rejected operation between incompatible group contexts");
            Err(Error::IncompatibleContext)
        }
    }

    fn g_radix(&self) -> &PowRadix {
        self.g_pow_radix.get_or_init(|| {
            PowRadix::new(self.g, self.pow_radix_option, self.p_params, self.q.bits_vartime())
        })
    }

    // --- cached constants ---

    pub fn zero_mod_p(self: &Arc<Self>) -> ElementModP {
        ElementModP::new(U4096::ZERO, self.clone())
    }

    pub fn one_mod_p(self: &Arc<Self>) -> ElementModP {
        ElementModP::new(U4096::ONE, self.clone())
    }

    pub fn two_mod_p(self: &Arc<Self>) -> ElementModP {
        ElementModP::new(U4096::from_u64(2), self.clone())
    }

    pub fn g_mod_p(self: &Arc<Self>) -> ElementModP {
        ElementModP::new(self.g, self.clone())
    }

    pub fn g_squared_mod_p(self: &Arc<Self>) -> ElementModP {
        let g_res = DynResidue::new(&self.g, self.p_params);
        ElementModP::new(g_res.square().retrieve(), self.clone())
    }

    /// Q represented as a P-space element; used as the exponent when
    /// checking subgroup membership.
    pub fn q_mod_p(self: &Arc<Self>) -> ElementModP {
        let q_as_p = self.q.resize();
        ElementModP::new(q_as_p, self.clone())
    }

    pub fn zero_mod_q(self: &Arc<Self>) -> ElementModQ {
        ElementModQ::new(U256::ZERO, self.clone())
    }

    pub fn one_mod_q(self: &Arc<Self>) -> ElementModQ {
        ElementModQ::new(U256::ONE, self.clone())
    }

    pub fn two_mod_q(self: &Arc<Self>) -> ElementModQ {
        ElementModQ::new(U256::from_u64(2), self.clone())
    }

    // --- factories ---

    /// Interpret `bytes` as a nonnegative big-endian integer, reduce mod P,
    /// and bump up to `minimum` if the reduced value fell short.
    pub fn safe_binary_to_element_mod_p(self: &Arc<Self>, bytes: &[u8], minimum: u64) -> ElementModP {
        let nz_p = NonZero::new(self.p).expect("P is prime, hence nonzero");
        let mut value = bytes_to_u4096_mod(bytes, &nz_p);
        let minimum = U4096::from_u64(minimum);
        if value < minimum {
            value = value.wrapping_add(&minimum);
        }
        ElementModP::new(value, self.clone())
    }

    pub fn safe_binary_to_element_mod_q(self: &Arc<Self>, bytes: &[u8], minimum: u64) -> ElementModQ {
        let nz_q = NonZero::new(self.q).expect("Q is prime, hence nonzero");
        let mut value = bytes_to_u256_mod(bytes, &nz_q);
        let minimum = U256::from_u64(minimum);
        if value < minimum {
            value = value.wrapping_add(&minimum);
        }
        ElementModQ::new(value, self.clone())
    }

    /// Same interpretation as [`Self::safe_binary_to_element_mod_p`], but
    /// `None` if the integer is `>= P`.
    pub fn binary_to_element_mod_p(self: &Arc<Self>, bytes: &[u8]) -> Option<ElementModP> {
        let value = bytes_to_u4096_checked(bytes)?;
        if value >= self.p {
            return None;
        }
        Some(ElementModP::new(value, self.clone()))
    }

    pub fn binary_to_element_mod_q(self: &Arc<Self>, bytes: &[u8]) -> Option<ElementModQ> {
        let value = bytes_to_u256_checked(bytes)?;
        if value >= self.q {
            return None;
        }
        Some(ElementModQ::new(value, self.clone()))
    }

    pub fn ulong_to_element_mod_p(self: &Arc<Self>, u: u64) -> Result<ElementModP> {
        let value = U4096::from_u64(u);
        if value >= self.p {
            return Err(Error::OutOfRange);
        }
        Ok(ElementModP::new(value, self.clone()))
    }

    pub fn ulong_to_element_mod_q(self: &Arc<Self>, u: u64) -> Result<ElementModQ> {
        let value = U256::from_u64(u);
        if value >= self.q {
            return Err(Error::OutOfRange);
        }
        Ok(ElementModQ::new(value, self.clone()))
    }

    pub fn base64_to_element_mod_p(self: &Arc<Self>, s: &str) -> Result<Option<ElementModP>> {
        if s.is_empty() {
            return Err(Error::InvalidArgument("empty base64 string"));
        }
        match STANDARD.decode(s) {
            Ok(bytes) => Ok(self.binary_to_element_mod_p(&bytes)),
            Err(_) => Ok(None),
        }
    }

    pub fn base64_to_element_mod_q(self: &Arc<Self>, s: &str) -> Result<Option<ElementModQ>> {
        if s.is_empty() {
            return Err(Error::InvalidArgument("empty base64 string"));
        }
        match STANDARD.decode(s) {
            Ok(bytes) => Ok(self.binary_to_element_mod_q(&bytes)),
            Err(_) => Ok(None),
        }
    }

    /// 32 cryptographically secure random bytes, fed through
    /// [`Self::safe_binary_to_element_mod_q`].
    pub fn random_element_mod_q(self: &Arc<Self>, minimum: u64) -> ElementModQ {
        let mut bytes = [0u8; 32];
        crate::rng::fill_secure(&mut bytes);
        self.safe_binary_to_element_mod_q(&bytes, minimum)
    }

    /// `G^e mod P`, accelerated via this context's pow-radix table.
    pub fn g_pow_p(self: &Arc<Self>, e: &ElementModQ) -> Result<ElementModP> {
        self.assert_compatible(&e.context)?;
        let value = self.g_radix().pow(&self.g, &e.value);
        Ok(ElementModP::new(value, self.clone()))
    }

    /// `G^e mod P` for small literal exponents, using the cached constants
    /// for e in {0,1,2} and falling back to [`Self::g_pow_p`] otherwise.
    pub fn g_pow_p_small(self: &Arc<Self>, e: u64) -> Result<ElementModP> {
        match e {
            0 => Ok(self.one_mod_p()),
            1 => Ok(self.g_mod_p()),
            2 => Ok(self.g_squared_mod_p()),
            _ => {
                let exp = self.ulong_to_element_mod_q(e)?;
                self.g_pow_p(&exp)
            }
        }
    }

    /// Discrete log of `h` base `G`, or `None` if it would exceed the cache's cap.
    pub fn dlog(&self, h: &ElementModP) -> Option<u64> {
        self.dlog.solve(&h.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(option: PowRadixOption) -> Arc<GroupContext> {
        GroupContext::new(ParamSet::TestSmall, option)
    }

    #[test]
    fn exponent_homomorphism() {
        let ctx = ctx(PowRadixOption::NoAcceleration);
        let a = ctx.ulong_to_element_mod_q(17).unwrap();
        let b = ctx.ulong_to_element_mod_q(42).unwrap();
        let sum = a.add(&b).unwrap();

        let lhs = ctx.g_pow_p(&a).unwrap().mul(&ctx.g_pow_p(&b).unwrap()).unwrap();
        let rhs = ctx.g_pow_p(&sum).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn g_pow_p_small_matches_generic_path() {
        let ctx = ctx(PowRadixOption::NoAcceleration);
        assert_eq!(ctx.g_pow_p_small(0).unwrap(), ctx.one_mod_p());
        assert_eq!(ctx.g_pow_p_small(1).unwrap(), ctx.g_mod_p());
        assert_eq!(ctx.g_pow_p_small(2).unwrap(), ctx.g_squared_mod_p());

        let exp = ctx.ulong_to_element_mod_q(5).unwrap();
        assert_eq!(ctx.g_pow_p_small(5).unwrap(), ctx.g_pow_p(&exp).unwrap());
    }

    #[test]
    fn acceleration_tiers_agree_with_each_other() {
        let no_accel = ctx(PowRadixOption::NoAcceleration);
        let low_mem = ctx(PowRadixOption::LowMemoryUse);
        let high_mem = ctx(PowRadixOption::HighMemoryUse);

        for e in [0u64, 1, 2, 1000, 32632] {
            let exp_a = no_accel.ulong_to_element_mod_q(e).unwrap();
            let exp_b = low_mem.ulong_to_element_mod_q(e).unwrap();
            let exp_c = high_mem.ulong_to_element_mod_q(e).unwrap();
            assert_eq!(
                no_accel.g_pow_p(&exp_a).unwrap().value(),
                low_mem.g_pow_p(&exp_b).unwrap().value()
            );
            assert_eq!(
                no_accel.g_pow_p(&exp_a).unwrap().value(),
                high_mem.g_pow_p(&exp_c).unwrap().value()
            );
        }
    }

    #[test]
    fn accelerate_pow_matches_pow_p() {
        let ctx = ctx(PowRadixOption::NoAcceleration);
        let base = ctx.g_squared_mod_p();
        let accelerated = base.accelerate(PowRadixOption::LowMemoryUse);
        let exponent = ctx.ulong_to_element_mod_q(777).unwrap();
        assert_eq!(accelerated.pow_p(&exponent).unwrap(), base.pow_p(&exponent).unwrap());
    }

    #[test]
    fn residue_generator_range() {
        let ctx = ctx(PowRadixOption::NoAcceleration);
        for e in 0u64..50 {
            let exp = ctx.ulong_to_element_mod_q(e).unwrap();
            let h = ctx.g_pow_p(&exp).unwrap();
            assert!(h.is_valid_residue(), "G^{e} should be a valid residue");
        }
    }

    #[test]
    fn ulong_to_element_mod_p_out_of_range_in_test_group() {
        // 16-bit test P is far smaller than a typical u64; a large literal
        // should be rejected rather than silently truncated.
        let ctx = ctx(PowRadixOption::NoAcceleration);
        assert_eq!(ctx.ulong_to_element_mod_p(u64::MAX), Err(Error::OutOfRange));
    }

    #[test]
    fn random_element_mod_q_respects_minimum() {
        let ctx = ctx(PowRadixOption::NoAcceleration);
        for _ in 0..20 {
            let e = ctx.random_element_mod_q(1);
            assert!(e.in_bounds_no_zero());
        }
    }
}
