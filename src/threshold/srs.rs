use crate::{
    PrimaryGroup,
    PrimaryGroupP,
    threshold::errors::ThresholdError,
};

use ark_ec::{PairingEngine, ProjectiveCurve};
use ark_ff::UniformRand;

use rand::Rng;

/* The reference string of the threshold sharing scheme: the generator of the
   public-key group that every key pair, commitment and PVSH ciphertext in a
   round is produced against. All parties of a round must share it. */

#[derive(Clone, Debug, PartialEq)]
pub struct SRS<E: PairingEngine> {
    pub g: PrimaryGroup<E>,   // generator of the primary (public key) group
}

impl<E: PairingEngine> SRS<E> {

    // Function setup generates an SRS instance using a specified RNG.
    pub fn setup<R: Rng>(rng: &mut R) -> Result<Self, ThresholdError> {
        Ok(Self {
            g: PrimaryGroupP::<E>::rand(rng).into_affine(),
        })
    }

    // Function for obtaining an SRS instance from a given generator.
    pub fn from_generator(g: PrimaryGroup<E>) -> Result<Self, ThresholdError> {
        Ok(Self { g })
    }
}
