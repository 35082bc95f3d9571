//! End-to-end walkthrough: derive a keypair, encrypt two small integers,
//! homomorphically add the ciphertexts, and decrypt the sum. Run with
//! `cargo run --example walkthrough`.

use eg_core::elgamal::PublicKeyExt;
use eg_core::{ElGamalCiphertext, ElGamalKeypair, GroupContext, ParamSet, PowRadixOption};

fn main() -> eg_core::Result<()> {
    let ctx = GroupContext::new(ParamSet::Production, PowRadixOption::LowMemoryUse);

    let keypair = ElGamalKeypair::from_random(&ctx)?;
    println!("public key = {}", keypair.public_key().to_base64());

    let c1 = keypair.public_key().encrypt(&ctx, 3, None)?;
    let c2 = keypair.public_key().encrypt(&ctx, 4, None)?;
    let sum: ElGamalCiphertext = c1.add(&c2)?;

    let plaintext = keypair.decrypt(&sum)?.expect("sum is within the dlog cap");
    println!("3 + 4 homomorphically decrypts to {plaintext}");
    assert_eq!(plaintext, 7);

    Ok(())
}
