use crate::{
    Scalar,
    threshold::{
        config::Config,
        errors::ThresholdError,
        member::Member,
        poly::shamir_evaluate_scalar,
        pvsh,
        share::{Contribution, EncryptedShare},
    },
    utils::{clear_scalar, clear_scalars},
};

use ark_ec::PairingEngine;
use ark_ff::UniformRand;

use rand::Rng;


/* Dealer-side construction of a sharing round's contribution: sample a
   secret polynomial, publish commitments to its coefficients, and hand one
   publicly-verifiable encrypted share to every member. */


// Function for building one dealer's contribution for a round.
//
// With `previous_constant`, the polynomial keeps that scalar as its fixed
// constant term so the reconstructed value survives a resharing; only the
// remaining `threshold - 1` coefficients are sampled fresh.
pub fn build_contribution<E: PairingEngine, R: Rng>(
    config: &Config<E>,
    threshold: usize,
    members: &[Member<E>],
    previous_constant: Option<Scalar<E>>,
    rng: &mut R,
) -> Result<Contribution<E>, ThresholdError> {
    if threshold < 1 {
        return Err(ThresholdError::InvalidThreshold(threshold));
    }

    if members.is_empty() {
        return Err(ThresholdError::NoMembersError);
    }

    // Sample the secret polynomial, constant term first.
    let mut coefficients = Vec::with_capacity(threshold);
    if let Some(constant) = previous_constant {
        coefficients.push(constant);
    }
    while coefficients.len() < threshold {
        coefficients.push(Scalar::<E>::rand(rng));
    }

    // The dealer's public commitment to its polynomial; the coefficients
    // themselves are never revealed.
    let public_coefficients = coefficients
        .iter()
        .map(|coefficient| config.public_key(coefficient))
        .collect::<Vec<_>>();

    let mut shares = Vec::with_capacity(members.len());

    for member in members {
        let mut share = shamir_evaluate_scalar::<E>(&coefficients, &member.id)?;
        let payload = pvsh::encode(config, &member.id, &member.public_key, &share, rng)?;

        shares.push(EncryptedShare {
            receiver_id: member.id,
            receiver_public_key: member.public_key,
            payload,
        });

        clear_scalar(&mut share);
    }

    clear_scalars(&mut coefficients);

    Ok(Contribution {
        public_coefficients,
        shares,
    })
}


/* Unit tests: */
