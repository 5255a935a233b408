pub mod hash;

use ark_ff::PrimeField;

// Secret field elements are overwritten before their backing memory is
// released. Writing through a mutable reference keeps the discipline visible
// at every call site.

/// Overwrite a secret field element with zero.
pub fn clear_scalar<F: PrimeField>(value: &mut F) {
    *value = F::zero();
}

/// Overwrite a buffer of secret field elements with zeros.
pub fn clear_scalars<F: PrimeField>(values: &mut [F]) {
    for value in values.iter_mut() {
        *value = F::zero();
    }
}
