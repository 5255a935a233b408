use crate::threshold::errors::ThresholdError;

use ark_ec::AffineCurve;
use ark_ff::PrimeField;

use blake2s_simd::Params;

// blake2s personas are limited to 8 bytes.
const MAX_ATTEMPTS: u32 = 256;


// Function for hashing an arbitrary message onto the prime field F under a
// given persona. Rehashes with an incremented counter until the digest
// parses as a field element.
pub fn hash_to_field<F: PrimeField>(
    personalization: &[u8],
    message: &[u8],
) -> Result<F, ThresholdError> {
    for counter in 0..MAX_ATTEMPTS {
        let hash = Params::new()
            .hash_length(32)
            .personal(personalization)
            .to_state()
            .update(message)
            .update(&counter.to_le_bytes())
            .finalize();

        if let Some(field_element) = F::from_random_bytes(hash.as_bytes()) {
            return Ok(field_element);
        }
    }

    Err(ThresholdError::HashToFieldError)
}


// Function for hashing an arbitrary message onto the group generated by G's
// prime-order subgroup generator.
pub fn hash_to_group<G: AffineCurve>(
    personalization: &[u8],
    message: &[u8],
) -> Result<G::Projective, ThresholdError> {
    let scalar = hash_to_field::<G::ScalarField>(personalization, message)?;

    Ok(G::prime_subgroup_generator().mul(scalar.into_repr()))
}


/* Unit tests: */
