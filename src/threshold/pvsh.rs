use crate::{
    DualGroup,
    GT,
    Identity,
    PrimaryGroup,
    Scalar,
    pairing,
    threshold::{
        config::Config,
        errors::ThresholdError,
        wire::{from_hex, to_bytes, to_hex},
    },
    utils::{clear_scalar, hash::{hash_to_field, hash_to_group}},
};

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, PrimeField, UniformRand, Zero};

use rand::Rng;

const PERSONA_POINT: &[u8] = b"PVSHPNT";    // persona for hashing onto the dual group
const PERSONA_SCALAR: &[u8] = b"PVSHSCL";   // persona for hashing pairing outputs onto the field


/* The PVSH codec encrypts a scalar share for a recipient such that only the
   holder of the recipient's secret key can recover it, while any observer
   holding the recipient's expected public share can check consistency with
   the dealer's commitments without decrypting. */


// Outcome of the public consistency check. A mismatch is protocol data
// reported to the caller, never a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Mismatch,
}


// Q := hash of the receiver's identity and public key, in the dual group.
fn receiver_point<E: PairingEngine>(
    id: &Identity<E>,
    public_key: &PrimaryGroup<E>,
) -> Result<DualGroup<E>, ThresholdError> {
    let mut message = to_bytes(id)?;
    message.extend_from_slice(&to_bytes(public_key)?);

    Ok(hash_to_group::<DualGroup<E>>(PERSONA_POINT, &message)?.into_affine())
}


// H := hash of (Q, c, U), binding the proof element V to the ciphertext.
fn proof_base<E: PairingEngine>(
    q: &DualGroup<E>,
    c: &Scalar<E>,
    u: &PrimaryGroup<E>,
) -> Result<DualGroup<E>, ThresholdError> {
    let mut message = to_bytes(q)?;
    message.extend_from_slice(&to_bytes(c)?);
    message.extend_from_slice(&to_bytes(u)?);

    Ok(hash_to_group::<DualGroup<E>>(PERSONA_POINT, &message)?.into_affine())
}


// Derives the blinding scalar from a pairing output.
fn blinding_scalar<E: PairingEngine>(shared: &GT<E>) -> Result<Scalar<E>, ThresholdError> {
    hash_to_field::<Scalar<E>>(PERSONA_SCALAR, &to_bytes(shared)?)
}


// Splits a ciphertext into its three raw fields.
fn split_payload(payload: &str) -> Result<(&str, &str, &str), ThresholdError> {
    let fields: Vec<&str> = payload.split('.').collect();

    if fields.len() != 3 {
        return Err(ThresholdError::InvalidCiphertextFormat(fields.len()));
    }

    Ok((fields[0], fields[1], fields[2]))
}


// Function for encoding a scalar share for the recipient (id, public_key).
// Outputs the ciphertext "c.U.V" in dot-separated hex.
pub fn encode<E: PairingEngine, R: Rng>(
    config: &Config<E>,
    id: &Identity<E>,
    public_key: &PrimaryGroup<E>,
    share: &Scalar<E>,
    rng: &mut R,
) -> Result<String, ThresholdError> {
    // Sample the ephemeral exponent; it must be invertible.
    let mut r = Scalar::<E>::rand(rng);
    while r.is_zero() {
        r = Scalar::<E>::rand(rng);
    }

    let q = receiver_point::<E>(id, public_key)?;

    // Blind the share with a scalar only the recipient can re-derive.
    let pk_r = public_key.mul(r.into_repr()).into_affine();
    let mut eh = blinding_scalar::<E>(&pairing::<E>(q, pk_r))?;

    let c = *share + eh;
    let u = config.srs.g.mul(r.into_repr()).into_affine();

    // Proof element tying (c, U) to the recipient's expected public share.
    let h = proof_base::<E>(&q, &c, &u)?;
    let v = h.mul((eh * r.inverse().unwrap()).into_repr()).into_affine();

    let payload = format!("{}.{}.{}", to_hex(&c)?, to_hex(&u)?, to_hex(&v)?);

    clear_scalar(&mut eh);
    clear_scalar(&mut r);

    Ok(payload)
}


// Function for publicly verifying a ciphertext against the recipient's
// expected public share, without decrypting it. Accepts iff
// e(H, g*c) == e(H, ph) * e(V, U).
pub fn verify<E: PairingEngine>(
    config: &Config<E>,
    id: &Identity<E>,
    public_key: &PrimaryGroup<E>,
    expected_public_share: &PrimaryGroup<E>,
    payload: &str,
) -> Result<Verdict, ThresholdError> {
    let (c_field, u_field, v_field) = split_payload(payload)?;
    let c: Scalar<E> = from_hex(c_field)?;
    let u: PrimaryGroup<E> = from_hex(u_field)?;
    let v: DualGroup<E> = from_hex(v_field)?;

    let q = receiver_point::<E>(id, public_key)?;
    let h = proof_base::<E>(&q, &c, &u)?;

    let g_c = config.srs.g.mul(c.into_repr()).into_affine();

    let lhs = pairing::<E>(h, g_c);
    let rhs = pairing::<E>(h, *expected_public_share) * pairing::<E>(v, u);

    if lhs != rhs {
        return Ok(Verdict::Mismatch);
    }

    Ok(Verdict::Accept)
}


// Function for decoding a ciphertext with the recipient's secret key.
// By bilinearity, e(Q*sk, U) equals the encoder's shared secret.
pub fn decode<E: PairingEngine>(
    id: &Identity<E>,
    public_key: &PrimaryGroup<E>,
    secret_key: &Scalar<E>,
    payload: &str,
) -> Result<Scalar<E>, ThresholdError> {
    // V plays no role in decryption and stays unparsed.
    let (c_field, u_field, _v_field) = split_payload(payload)?;
    let c: Scalar<E> = from_hex(c_field)?;
    let u: PrimaryGroup<E> = from_hex(u_field)?;

    let q = receiver_point::<E>(id, public_key)?;

    let q_sk = q.mul(secret_key.into_repr()).into_affine();
    let eh = blinding_scalar::<E>(&pairing::<E>(q_sk, u))?;

    Ok(c - eh)
}


/* Unit tests: */
