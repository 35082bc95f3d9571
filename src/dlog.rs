//! Thread-safe memoized discrete-log solver.
//!
//! Recovers the exponent `x` with `G^x == h (mod P)` for `h` in the subgroup
//! generated by `G`, by extending a monotone table of known powers. The table
//! never shrinks and never forgets an answer once found.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::U4096;
use tracing::warn;

use crate::params::P_LIMBS;

struct State {
    map: HashMap<U4096, u64>,
    max_element: U4096,
    max_exponent: u64,
}

/// Memoized `G^x = h (mod P)` solver, capped at `max_exponent`.
pub(crate) struct DLog {
    state: RwLock<State>,
    /// serializes cache extension; readers never block on this
    extend_lock: Mutex<()>,
    g: U4096,
    p_params: DynResidueParams<P_LIMBS>,
    max: u64,
}

impl DLog {
    pub(crate) fn new(g: U4096, p_params: DynResidueParams<P_LIMBS>, max: u64) -> Self {
        let mut map = HashMap::new();
        map.insert(U4096::ONE, 0);
        DLog {
            state: RwLock::new(State {
                map,
                max_element: U4096::ONE,
                max_exponent: 0,
            }),
            extend_lock: Mutex::new(()),
            g,
            p_params,
            max,
        }
    }

    /// Returns the least `x >= 0` with `g^x == h`, or `None` if `x` would
    /// exceed this cache's cap.
    pub(crate) fn solve(&self, h: &U4096) -> Option<u64> {
        {
            let state = self.state.read().expect("dlog cache poisoned");
            if let Some(&x) = state.map.get(h) {
                return Some(x);
            }
        }

        let _guard = self.extend_lock.lock().expect("dlog cache poisoned");

        // someone else may have extended the table while we waited for the lock
        {
            let state = self.state.read().expect("dlog cache poisoned");
            if let Some(&x) = state.map.get(h) {
                return Some(x);
            }
        }

        let g_res = DynResidue::new(&self.g, self.p_params);
        let mut state = self.state.write().expect("dlog cache poisoned");
        let mut current = DynResidue::new(&state.max_element, self.p_params);
        loop {
            if state.max_exponent >= self.max {
                warn!(cap = self.max, "dlog cache exhausted its search cap");
                return None;
            }
            current = current.mul(&g_res);
            state.max_exponent += 1;
            let value = current.retrieve();
            let exponent = state.max_exponent;
            state.map.insert(value, exponent);
            state.max_element = value;
            if &value == h {
                return Some(state.max_exponent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSet;

    fn small_dlog() -> DLog {
        let params = ParamSet::TestSmall.load();
        let p_params = DynResidueParams::new(&params.p);
        DLog::new(params.g, p_params, params.dlog_max)
    }

    #[test]
    fn solves_small_exponents() {
        let dlog = small_dlog();
        let params = ParamSet::TestSmall.load();
        let p_params = DynResidueParams::new(&params.p);
        let g_res = DynResidue::new(&params.g, p_params);
        for x in [0u64, 1, 2, 10, 100] {
            let h = g_res.pow(&U4096::from_u64(x)).retrieve();
            assert_eq!(dlog.solve(&h), Some(x));
        }
    }

    #[test]
    fn repeated_calls_are_stable() {
        let dlog = small_dlog();
        let params = ParamSet::TestSmall.load();
        let p_params = DynResidueParams::new(&params.p);
        let g_res = DynResidue::new(&params.g, p_params);
        let h = g_res.pow(&U4096::from_u64(20_000)).retrieve();
        let first = dlog.solve(&h);
        let second = dlog.solve(&h);
        assert_eq!(first, second);
        assert_eq!(first, Some(20_000));
    }

    #[test]
    #[tracing_test::traced_test] // enable logs in tests
    fn exceeding_cap_returns_none() {
        let params = ParamSet::TestSmall.load();
        let p_params = DynResidueParams::new(&params.p);
        let dlog = DLog::new(params.g, p_params, 10);
        let g_res = DynResidue::new(&params.g, p_params);
        let h = g_res.pow(&U4096::from_u64(50)).retrieve();
        assert_eq!(dlog.solve(&h), None);
    }
}
