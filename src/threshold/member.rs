use crate::{Identity, PrimaryGroup, Scalar, threshold::config::Config};

use ark_ec::PairingEngine;
use ark_ff::UniformRand;

use rand::Rng;


/* Struct KeyPair couples a secret exponent with its public point under the
   configured generator. */

#[derive(Clone, Debug)]
pub struct KeyPair<E: PairingEngine> {
    pub secret_key: Scalar<E>,
    pub public_key: PrimaryGroup<E>,
}

impl<E: PairingEngine> KeyPair<E> {

    // Function for generating a fresh key pair using a specified RNG.
    // The RNG must be cryptographically secure.
    pub fn generate<R: Rng>(config: &Config<E>, rng: &mut R) -> Self {
        let secret_key = Scalar::<E>::rand(rng);
        let public_key = config.public_key(&secret_key);

        Self {
            secret_key,
            public_key,
        }
    }

    // Method for binding this key pair to a party identity, yielding the
    // Member record a dealer shares against.
    pub fn member(&self, id: Identity<E>) -> Member<E> {
        Member {
            id,
            public_key: self.public_key,
        }
    }
}


/* Struct Member models a recipient known to a dealer before contribution. */

#[derive(Clone, Debug)]
pub struct Member<E: PairingEngine> {
    pub id: Identity<E>,                  // party identifier
    pub public_key: PrimaryGroup<E>,      // party public key
}


// Function for sampling a fresh party identity. Identities are
// human-meaningless and double as polynomial evaluation points.
pub fn random_identity<E: PairingEngine, R: Rng>(rng: &mut R) -> Identity<E> {
    Identity::<E>::rand(rng)
}
