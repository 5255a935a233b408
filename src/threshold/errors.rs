use ark_serialize::SerializationError;
use thiserror::Error;

// Enumeration defining appropriate errors for various situations.
// These are the fatal tier: caller or transport bugs that abort the current
// call. Per-share verification mismatches are accumulated as data instead
// (see combiner::ProtocolError).
#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("Ciphertext must have exactly three dot-separated fields. Found: {0}")]
    InvalidCiphertextFormat(usize),
    #[error("Malformed hex input: {0}")]
    HexError(#[from] hex::FromHexError),
    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] SerializationError),
    #[error("Threshold must be at least 1. Got: {0}")]
    InvalidThreshold(usize),
    #[error("Empty members list provided")]
    NoMembersError,
    #[error("Empty contributions list provided")]
    NoContributionsError,
    #[error("Insufficient contributions. Found: {0}, Expected: {1}")]
    InsufficientContributionsError(usize, usize),
    #[error("Contributions carry different numbers of public coefficients")]
    MismatchedCoefficientsError,
    #[error("Different number of points and evaluations")]
    DifferentPointsEvalsError,
    #[error("Recovery points are not pairwise distinct")]
    RepeatedPointError,
    #[error("Empty evaluations vector provided")]
    EmptyEvaluationsError,
    #[error("Empty coefficients vector provided")]
    EmptyCoefficientsError,
    #[error("Could not hash input onto the field")]
    HashToFieldError,
}
