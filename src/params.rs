//! Fixed group parameters bundled with this crate.
//!
//! Two parameter sets are recognized: the 4096-bit production group and a
//! 16-bit test group small enough for exhaustive [`crate::dlog`] tests. Both
//! are selected programmatically by [`crate::GroupContext::new`]; neither is
//! ever read from the environment.

use crypto_bigint::{U256, U4096};

pub(crate) const P_LIMBS: usize = U4096::LIMBS;
pub(crate) const Q_LIMBS: usize = U256::LIMBS;

/// Which bundled parameter set a [`crate::GroupContext`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSet {
    /// The 4096-bit production group, Q = 2^256 - 189.
    Production,
    /// A 16-bit group used to keep `DLog` exhaustion tractable in tests.
    TestSmall,
}

pub(crate) struct Parameters {
    pub p: U4096,
    pub q: U256,
    pub g: U4096,
    pub r: U4096,
    /// hard cap for `DLog::solve`, lower in the test group so exhaustive
    /// searches finish in test time
    pub dlog_max: u64,
}

impl ParamSet {
    pub(crate) fn load(self) -> Parameters {
        match self {
            ParamSet::Production => Parameters {
                p: U4096::from_be_hex(PRODUCTION_P_HEX),
                q: U256::from_be_hex(PRODUCTION_Q_HEX),
                g: U4096::from_be_hex(PRODUCTION_G_HEX),
                r: U4096::from_be_hex(PRODUCTION_R_HEX),
                dlog_max: 1_000_000_000,
            },
            ParamSet::TestSmall => Parameters {
                p: U4096::from_u64(65267),
                q: U256::from_u64(32633),
                g: U4096::from_u64(3),
                r: U4096::from_u64(2),
                dlog_max: 1_500_000,
            },
        }
    }
}

// P = 4096-bit safe-prime-like modulus; R*Q + 1 == P, Q prime, P prime.
const PRODUCTION_P_HEX: &str = "e370ce51a2f8d77dfc8c537de0bb33ddc568d466672234649e42b83a19df457fd825777307d5ba7968c229f4277c6fec345184a4c7332b5173ef2b4dd6899db4b9ea583764f7252d90eab31a0cafd7530b8020a34560392da6fe3d64ef599c05ffdf4b135811adf186819313a797d60c467bbd77a18db56da370346fee21586694841ee815a3ed85449671d219528c1806d63aabca024c80f13dbce27c78d446fa9b364c03d188d4235182b746b5041baec8346c00bd6919d12a884193cc25ba2cd4f85d36c249334fac19c6603bad77de122cc06071bd553a734acdd81ad1ac451078b73ae500bd5dfe613f2a63922ee673772d6c26abc0515feb8d79097f6b171f3e2f3d63aa1b3c940852f24cd8209f6678502a0d289d7961c7622d5e16420c41ba24d8f428b210a433f24ca0047f144be7829b4bc16f26c6a7d58854bd96cfe040ea3989a4176c581640ac349c046fc95391e905d2cb2fb0082bcaa04ce152679ba938610f57d4bbd337d60e823a78a4561fee5eeeeaab8207ccc04643dc669667c7da638f59dc62d453528ed53e27dbcc024c34c057774c57a38202daf8fcb1e00c68096f25caec89299bb7424faac4bb00ce64db5113a9a3d759c8ce1ebb5f60700a691f962997dcdcbac5307176f8564fc683452ddf58cd78dd8618e6fa252cade44c2ee2c779f6f82832d13b1a87257f92fd357a3d4f0be9e458601f";

// Q = 2^256 - 189, the prime order of the subgroup generated by G.
const PRODUCTION_Q_HEX: &str = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff43";

// G generates the order-Q subgroup of Z_P*: G = h^R mod P for a witness h with G != 1.
const PRODUCTION_G_HEX: &str = "5baeb5f344cd15b11d612200ae469ef371cf907f6cdb405a590a1b3984cf8a940ae28a6adaf75e85e78594967aa2896e9ac024179d62235e2102f94c0a3e3470e2a78b1095caf3d830207770ec4f7f70b898abede98f82ac1f6be6529e612eec73033beda59e4a726e1986e275a3a5f4e62a1be1dff3202488e825d7abb729b50004f9b85a92f4729dc104e21d1f0afe828a24f83ca672b6d2007327faa72567d2d8edb24201eccee621d602624a5e1956fcb77a8d10fe5eb53607c197dcf8c65abf2b4ba81bde1b6101187a8c29a85da24cb26aa64b99097e98029bb25aee62c2831c68510398c4ce147ca7a3e03d01cd21aca000ae03567c4e08144200ca62a67cf48758f7cd5c13fd0368f34f5f6452b13656d7d4c596b92dc66bfea9418360045a9a3b1f52dd70488892e89e2b0ba2bc49676b7554f322b902ac3b3a56eacd07b7daa92c17591fa99203c2645e72e42915684deba8f3f46f455c8e30519e9a17abc782e9c500791965bfb61bb025b130218f7dcfdec6a32df1f61e00ea923438d0de89dcfbb0b6fb5ddfe1454c0ac8ac7510ce179054efcd8c9c5194730570ef3f7c0d58b606c63bdee94b0bb6b0f788cd74ed7965cbf99d7e01ebbb0a40a08daba239dab161bd85792dad1d64ff78977a517881a92e2633ebbabf234fd8f67d62c08e009ff60675b7cff59978d6d188236df9e30fc9a6a21680ace541a3";

// R = (P - 1) / Q, the cofactor.
const PRODUCTION_R_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000000e370ce51a2f8d77dfc8c537de0bb33ddc568d466672234649e42b83a19df4627c26dc9b8598cd27cdc5bcde311b1baa6f2b6543eeb73d99a4b312e32f060690f44f8455181ee8b5c40b1b3be1ce6a4943c1c531719e7e0172a4d590066872c4beb2a7840452e910d49b3466efddf577ca7651585c1be2687de8ae9bb9fed0c7332dee65b29050454adf171c38736231f9c771e6bd364bed03dcc4c678e7b0553892b47994c85bb588e92801219acf27232b9aa07121e48d770fef0b5c49f146671c8d48ab57d999491d4a72354eaabc75124b3f8c0cd8463a6ab0100018ce14e4655631f389f636d07fdc654dba46455ce8c55d3c3e169525d9fa88e9e0bd63504296c3c0b10119a22ef74f91aaaeb7a1d01d5a7c777ea6c984138acdc1b3b661ed6a27903d1277ddb6d8fdafccfdda67ea6a460ded3d39b8eed7f74086f97fb945634420af3cc026c3b4aed51ab3feff0d0af166b690ca3b50720d60503819dd60c306b4e5ead21bc82246d217cb65f42b599ad3aed43c751c545ce73dcf5636d962700b64961420877b8e50ba1799267ee40e6cd5fca7ed5f0e10f0c240560e48cab92fc363ce60b500a4331ee036665aaa5666e1d5af5067fcbf35060c6a7773a0bf43e74156c83af7078977db30a85f472ef122f6c13abb2601b34f8c28a";
