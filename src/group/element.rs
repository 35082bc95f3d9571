use std::cmp::Ordering;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_bigint::modular::runtime_mod::DynResidue;
use crypto_bigint::{Encoding, NonZero, U256, U4096};

use crate::error::{Error, Result};
use crate::group::GroupContext;
use crate::pow_radix::PowRadix;

/// An element of `Z_P`, carrying the context it was built from.
///
/// Cheap to clone: the residue is a fixed-size value and the context is
/// reference-counted.
#[derive(Clone)]
pub struct ElementModP {
    pub(crate) value: U4096,
    pub(crate) context: Arc<GroupContext>,
    pub(crate) accelerator: Option<Arc<PowRadix>>,
}

/// An element of `Z_Q`, carrying the context it was built from.
#[derive(Clone)]
pub struct ElementModQ {
    pub(crate) value: U256,
    pub(crate) context: Arc<GroupContext>,
}

impl std::fmt::Debug for ElementModP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementModP")
            .field("value", &self.value)
            .field("accelerated", &self.accelerator.as_ref().map(|r| r.option()))
            .finish()
    }
}

impl std::fmt::Debug for ElementModQ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementModQ").field("value", &self.value).finish()
    }
}

impl PartialEq for ElementModP {
    fn eq(&self, other: &Self) -> bool {
        self.context.is_compatible(&other.context) && self.value == other.value
    }
}
impl Eq for ElementModP {}

impl PartialEq for ElementModQ {
    fn eq(&self, other: &Self) -> bool {
        self.context.is_compatible(&other.context) && self.value == other.value
    }
}
impl Eq for ElementModQ {}

impl PartialOrd for ElementModP {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.context.is_compatible(&other.context) {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

impl PartialOrd for ElementModQ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.context.is_compatible(&other.context) {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

impl ElementModP {
    pub(crate) fn new(value: U4096, context: Arc<GroupContext>) -> Self {
        debug_assert!(value < context.p, "ElementModP constructed out of bounds");
        ElementModP {
            value,
            context,
            accelerator: None,
        }
    }

    /// Is this residue in `[0, P)`.
    pub fn in_bounds(&self) -> bool {
        self.value < self.context.p
    }

    /// Is this residue in `[1, P)`.
    pub fn in_bounds_no_zero(&self) -> bool {
        self.in_bounds() && self.value != U4096::ZERO
    }

    /// `true` iff this element is in the order-Q subgroup, i.e.
    /// `in_bounds() && self^Q == 1 (mod P)`.
    pub fn is_valid_residue(&self) -> bool {
        if !self.in_bounds() {
            return false;
        }
        let exponent = self.context.q_mod_p();
        let residue = DynResidue::new(&self.value, self.context.p_params);
        residue.pow(&exponent.value).retrieve() == U4096::ONE
    }

    /// Big-endian bytes, minimal length (no leading zero byte unless the
    /// value is itself zero).
    pub fn to_bytes(&self) -> Vec<u8> {
        strip_leading_zeros(&self.value.to_be_bytes())
    }

    /// Standard-alphabet base64 of [`Self::to_bytes`].
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// `self^exponent mod P`. Uses this element's cached accelerator if one
    /// was built via [`Self::accelerate`], otherwise falls back to a plain
    /// modpow.
    pub fn pow_p(&self, exponent: &ElementModQ) -> Result<ElementModP> {
        self.context.assert_compatible(&exponent.context)?;
        let value = match &self.accelerator {
            Some(radix) => radix.pow(&self.value, &exponent.value),
            None => DynResidue::new(&self.value, self.context.p_params)
                .pow(&exponent.value)
                .retrieve(),
        };
        Ok(ElementModP::new(value, self.context.clone()))
    }

    /// Returns a new element equal to this one but carrying its own
    /// lazily-built pow-radix table, so repeated [`Self::pow_p`] calls on it
    /// are accelerated.
    pub fn accelerate(&self, option: crate::pow_radix::PowRadixOption) -> ElementModP {
        let q_bits = self.context.q.bits_vartime();
        let radix = PowRadix::new(self.value, option, self.context.p_params, q_bits);
        ElementModP {
            value: self.value,
            context: self.context.clone(),
            accelerator: Some(Arc::new(radix)),
        }
    }

    pub fn mul(&self, other: &Self) -> Result<ElementModP> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.p_params);
        let b = DynResidue::new(&other.value, self.context.p_params);
        Ok(ElementModP::new(a.mul(&b).retrieve(), self.context.clone()))
    }

    pub fn add(&self, other: &Self) -> Result<ElementModP> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.p_params);
        let b = DynResidue::new(&other.value, self.context.p_params);
        Ok(ElementModP::new(a.add(&b).retrieve(), self.context.clone()))
    }

    pub fn sub(&self, other: &Self) -> Result<ElementModP> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.p_params);
        let b = DynResidue::new(&other.value, self.context.p_params);
        Ok(ElementModP::new(a.sub(&b).retrieve(), self.context.clone()))
    }

    pub fn neg(&self) -> ElementModP {
        let a = DynResidue::new(&self.value, self.context.p_params);
        ElementModP::new(a.neg().retrieve(), self.context.clone())
    }

    /// Multiplicative inverse mod P. Fails with [`Error::DomainError`] for the
    /// zero element.
    pub fn mult_inv(&self) -> Result<ElementModP> {
        let a = DynResidue::new(&self.value, self.context.p_params);
        let (inv, is_some) = a.invert();
        if bool::from(is_some) {
            Ok(ElementModP::new(inv.retrieve(), self.context.clone()))
        } else {
            Err(Error::DomainError)
        }
    }

    pub fn div(&self, other: &Self) -> Result<ElementModP> {
        self.mul(&other.mult_inv()?)
    }

    pub fn value(&self) -> &U4096 {
        &self.value
    }

    pub fn context(&self) -> &Arc<GroupContext> {
        &self.context
    }
}

impl ElementModQ {
    pub(crate) fn new(value: U256, context: Arc<GroupContext>) -> Self {
        debug_assert!(value < context.q, "ElementModQ constructed out of bounds");
        ElementModQ { value, context }
    }

    pub fn in_bounds(&self) -> bool {
        self.value < self.context.q
    }

    pub fn in_bounds_no_zero(&self) -> bool {
        self.in_bounds() && self.value != U256::ZERO
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        strip_leading_zeros(&self.value.to_be_bytes())
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn mul(&self, other: &Self) -> Result<ElementModQ> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.q_params);
        let b = DynResidue::new(&other.value, self.context.q_params);
        Ok(ElementModQ::new(a.mul(&b).retrieve(), self.context.clone()))
    }

    pub fn add(&self, other: &Self) -> Result<ElementModQ> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.q_params);
        let b = DynResidue::new(&other.value, self.context.q_params);
        Ok(ElementModQ::new(a.add(&b).retrieve(), self.context.clone()))
    }

    pub fn sub(&self, other: &Self) -> Result<ElementModQ> {
        self.context.assert_compatible(&other.context)?;
        let a = DynResidue::new(&self.value, self.context.q_params);
        let b = DynResidue::new(&other.value, self.context.q_params);
        Ok(ElementModQ::new(a.sub(&b).retrieve(), self.context.clone()))
    }

    pub fn neg(&self) -> ElementModQ {
        let a = DynResidue::new(&self.value, self.context.q_params);
        ElementModQ::new(a.neg().retrieve(), self.context.clone())
    }

    pub fn mult_inv(&self) -> Result<ElementModQ> {
        let a = DynResidue::new(&self.value, self.context.q_params);
        let (inv, is_some) = a.invert();
        if bool::from(is_some) {
            Ok(ElementModQ::new(inv.retrieve(), self.context.clone()))
        } else {
            Err(Error::DomainError)
        }
    }

    pub fn div(&self, other: &Self) -> Result<ElementModQ> {
        self.mul(&other.mult_inv()?)
    }

    pub fn value(&self) -> &U256 {
        &self.value
    }

    /// Mutable access to the residue, used by [`crate::elgamal::ElGamalKeypair`]'s
    /// `Drop` impl to scrub a secret key's last copy.
    pub(crate) fn value_mut(&mut self) -> &mut U256 {
        &mut self.value
    }

    pub fn context(&self) -> &Arc<GroupContext> {
        &self.context
    }
}

pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let first_nonzero = bytes.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(idx) => bytes[idx..].to_vec(),
        None => vec![0],
    }
}

pub(crate) fn bytes_to_u4096_mod(bytes: &[u8], modulus: &NonZero<U4096>) -> U4096 {
    let padded = pad_to(bytes, U4096::BYTES);
    U4096::from_be_slice(&padded).rem(modulus)
}

pub(crate) fn bytes_to_u256_mod(bytes: &[u8], modulus: &NonZero<U256>) -> U256 {
    let padded = pad_to(bytes, U256::BYTES);
    U256::from_be_slice(&padded).rem(modulus)
}

/// Interprets `bytes` strictly: returns `None` if the integer would not fit
/// in `U4096`'s native width at all (i.e. more significant bytes than the
/// type can hold).
pub(crate) fn bytes_to_u4096_checked(bytes: &[u8]) -> Option<U4096> {
    if bytes.len() > U4096::BYTES {
        let extra = &bytes[..bytes.len() - U4096::BYTES];
        if extra.iter().any(|&b| b != 0) {
            return None;
        }
    }
    let padded = pad_to(bytes, U4096::BYTES);
    Some(U4096::from_be_slice(&padded))
}

pub(crate) fn bytes_to_u256_checked(bytes: &[u8]) -> Option<U256> {
    if bytes.len() > U256::BYTES {
        let extra = &bytes[..bytes.len() - U256::BYTES];
        if extra.iter().any(|&b| b != 0) {
            return None;
        }
    }
    let padded = pad_to(bytes, U256::BYTES);
    Some(U256::from_be_slice(&padded))
}

fn pad_to(bytes: &[u8], width: usize) -> Vec<u8> {
    if bytes.len() >= width {
        return bytes[bytes.len() - width..].to_vec();
    }
    let mut padded = vec![0u8; width - bytes.len()];
    padded.extend_from_slice(bytes);
    padded
}

#[cfg(test)]
mod tests {
    use crate::group::GroupContext;
    use crate::params::ParamSet;
    use crate::pow_radix::PowRadixOption;

    fn ctx() -> std::sync::Arc<GroupContext> {
        GroupContext::new(ParamSet::TestSmall, PowRadixOption::NoAcceleration)
    }

    #[test]
    fn q_additive_group_laws() {
        let ctx = ctx();
        let zero = ctx.zero_mod_q();
        let one = ctx.one_mod_q();
        let two = ctx.two_mod_q();
        let a = ctx.ulong_to_element_mod_q(12345).unwrap();
        let b = ctx.ulong_to_element_mod_q(6789).unwrap();
        let c = ctx.ulong_to_element_mod_q(42).unwrap();

        assert_eq!(a.add(&zero).unwrap(), a);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        assert_eq!(a.add(&b).unwrap().add(&c).unwrap(), a.add(&b.add(&c).unwrap()).unwrap());
        assert_eq!(a.sub(&zero).unwrap(), a);
        assert_eq!(a.sub(&b).unwrap(), b.sub(&a).unwrap().neg());
        assert_eq!(a.add(&a.neg()).unwrap(), zero);
        assert_eq!(one.add(&one).unwrap(), two);
    }

    #[test]
    fn q_multiplicative_laws() {
        let ctx = ctx();
        let one = ctx.one_mod_q();
        let a = ctx.ulong_to_element_mod_q(777).unwrap();
        let b = ctx.ulong_to_element_mod_q(333).unwrap();
        let c = ctx.ulong_to_element_mod_q(9).unwrap();

        assert_eq!(a.mul(&one).unwrap(), a);
        assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        assert_eq!(a.mul(&b).unwrap().mul(&c).unwrap(), a.mul(&b.mul(&c).unwrap()).unwrap());
        assert_eq!(a.mul(&a.mult_inv().unwrap()).unwrap(), one);
        assert_eq!(a.div(&a).unwrap(), one);
    }

    #[test]
    fn p_multiplicative_laws() {
        let ctx = ctx();
        let one = ctx.one_mod_p();
        let a = ctx.g_mod_p();
        let b = ctx.g_squared_mod_p();

        assert_eq!(a.mul(&one).unwrap(), a);
        assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        assert_eq!(a.mul(&a.mult_inv().unwrap()).unwrap(), one);
        assert_eq!(a.div(&a).unwrap(), one);
    }

    #[test]
    fn mult_inv_of_zero_is_domain_error() {
        let ctx = ctx();
        let zero = ctx.zero_mod_p();
        assert_eq!(zero.mult_inv(), Err(crate::error::Error::DomainError));
    }

    #[test]
    fn bounds_checks() {
        let ctx = ctx();
        let zero = ctx.zero_mod_p();
        let one = ctx.one_mod_p();
        assert!(zero.in_bounds());
        assert!(!zero.in_bounds_no_zero());
        assert!(one.in_bounds_no_zero());
    }

    #[test]
    fn g_is_a_valid_residue() {
        let ctx = ctx();
        assert!(ctx.g_mod_p().is_valid_residue());
        assert!(ctx.g_squared_mod_p().is_valid_residue());
    }

    #[test]
    fn binary_round_trip() {
        let ctx = ctx();
        for u in [0u64, 1, 2, 12345, 32632] {
            let e = ctx.ulong_to_element_mod_q(u).unwrap();
            let bytes = e.to_bytes();
            assert_eq!(ctx.binary_to_element_mod_q(&bytes), Some(e));
        }
    }

    #[test]
    fn base64_round_trip() {
        let ctx = ctx();
        let e = ctx.ulong_to_element_mod_p(12345).unwrap();
        let encoded = e.to_base64();
        assert_eq!(ctx.base64_to_element_mod_p(&encoded).unwrap(), Some(e));
    }

    #[test]
    fn binary_to_element_rejects_out_of_range() {
        let ctx = ctx();
        // Q = 32633 for the test group; feed in a value well above it.
        let bytes = 100_000u32.to_be_bytes();
        assert_eq!(ctx.binary_to_element_mod_q(&bytes), None);
    }

    #[test]
    fn base64_rejects_empty_and_malformed() {
        let ctx = ctx();
        assert_eq!(ctx.base64_to_element_mod_q(""), Err(crate::error::Error::InvalidArgument("empty base64 string")));
        assert_eq!(ctx.base64_to_element_mod_q("@@"), Ok(None));
        assert_eq!(ctx.base64_to_element_mod_q(&"x".repeat(10_000)), Ok(None));
    }

    #[test]
    #[tracing_test::traced_test] // enable logs in tests
    fn incompatible_contexts_are_rejected() {
        let prod = GroupContext::new(ParamSet::Production, PowRadixOption::NoAcceleration);
        let test = GroupContext::new(ParamSet::TestSmall, PowRadixOption::NoAcceleration);
        let a = prod.one_mod_p();
        let b = test.one_mod_p();
        assert_eq!(a.mul(&b), Err(crate::error::Error::IncompatibleContext));
    }
}
