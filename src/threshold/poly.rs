use crate::{
    Identity,
    PrimaryGroup,
    PrimaryGroupP,
    Scalar,
    threshold::errors::ThresholdError,
};

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_poly::{UVPolynomial, Polynomial as Poly, polynomial::univariate::DensePolynomial};


// A polynomial with the various coefficients in the Scalar Group
pub type Polynomial<E> = DensePolynomial<Scalar<E>>;


// Function for evaluating a secret polynomial, given by its scalar
// coefficients (constant term first), at a party identity.
pub fn shamir_evaluate_scalar<E: PairingEngine>(
    coefficients: &[Scalar<E>],
    at: &Identity<E>,
) -> Result<Scalar<E>, ThresholdError> {
    if coefficients.is_empty() {
        return Err(ThresholdError::EmptyCoefficientsError);
    }

    Ok(Polynomial::<E>::from_coefficients_slice(coefficients).evaluate(at))
}


// Function for evaluating a public polynomial, given by its group-element
// coefficients, at a party identity. Horner's method in the exponent.
pub fn shamir_evaluate_group<E: PairingEngine>(
    coefficients: &[PrimaryGroup<E>],
    at: &Identity<E>,
) -> Result<PrimaryGroup<E>, ThresholdError> {
    if coefficients.is_empty() {
        return Err(ThresholdError::EmptyCoefficientsError);
    }

    let mut sum = coefficients[coefficients.len() - 1].into_projective();

    for coefficient in coefficients.iter().rev().skip(1) {
        sum = sum.mul(at.into_repr());
        sum.add_assign_mixed(coefficient);
    }

    Ok(sum.into_affine())
}


// Computes the Lagrange coefficients for recovering a polynomial's value at
// zero from evaluations at the given pairwise-distinct points.
fn lagrange_weights<E: PairingEngine>(
    points: &[Identity<E>],
) -> Result<Vec<Scalar<E>>, ThresholdError> {
    for j in 0..points.len() {
        for k in (j + 1)..points.len() {
            if points[j] == points[k] {
                return Err(ThresholdError::RepeatedPointError);
            }
        }
    }

    let mut weights = Vec::with_capacity(points.len());

    for j in 0..points.len() {
        let x_j = points[j];
        let mut prod = Scalar::<E>::one();
        for k in 0..points.len() {
            if j != k {
                let x_k = points[k];
                prod *= x_k * (x_k - x_j).inverse().unwrap();
            }
        }

        weights.push(prod);
    }

    Ok(weights)
}


// Utility function for Lagrange recovery at zero from a given list of points
// and scalar evaluations.
pub fn lagrange_recover_scalar<E: PairingEngine>(
    evals: &[Scalar<E>],
    points: &[Identity<E>],
) -> Result<Scalar<E>, ThresholdError> {
    if evals.is_empty() {
        return Err(ThresholdError::EmptyEvaluationsError);
    }

    if evals.len() != points.len() {
        return Err(ThresholdError::DifferentPointsEvalsError);
    }

    let weights = lagrange_weights::<E>(points)?;

    let mut sum = Scalar::<E>::zero();

    for j in 0..evals.len() {
        // Recovery formula
        sum += weights[j] * evals[j];
    }

    Ok(sum)
}


// Utility function for Lagrange recovery at zero from a given list of points
// and group-element evaluations.
pub fn lagrange_recover_group<E: PairingEngine>(
    evals: &[PrimaryGroup<E>],
    points: &[Identity<E>],
) -> Result<PrimaryGroup<E>, ThresholdError> {
    if evals.is_empty() {
        return Err(ThresholdError::EmptyEvaluationsError);
    }

    if evals.len() != points.len() {
        return Err(ThresholdError::DifferentPointsEvalsError);
    }

    let weights = lagrange_weights::<E>(points)?;

    let mut sum = PrimaryGroupP::<E>::zero();

    for j in 0..evals.len() {
        // Recovery formula
        sum.add_assign_mixed(&evals[j].mul(weights[j].into_repr()).into_affine());
    }

    Ok(sum.into_affine())
}


/* Unit tests: */
