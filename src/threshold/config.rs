use crate::{PrimaryGroup, Scalar, threshold::srs::SRS};

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::PrimeField;

/* Struct Config models the one-time public parameters that each party needs
   to know in order to generate, verify or combine contributions. It is an
   explicit, caller-held handle: there is no process-wide state, and the
   binding must not change between a dealer's encode and a verifier's verify
   for the same round.
*/

#[derive(Clone)]
pub struct Config<E: PairingEngine> {
    pub srs: SRS<E>,   // the associated SRS
}

impl<E: PairingEngine> Config<E> {

    pub fn new(srs: SRS<E>) -> Self {
        Self { srs }
    }

    // Method for deriving the public point of a secret exponent under the
    // configured generator.
    pub fn public_key(&self, secret_key: &Scalar<E>) -> PrimaryGroup<E> {
        self.srs.g.mul(secret_key.into_repr()).into_affine()
    }
}
