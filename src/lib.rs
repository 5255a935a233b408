pub mod threshold;
pub mod utils;

use ark_ec::PairingEngine;


///////////////////////////////////////////////////////////////////

/// The scalar field of the pairing groups
pub type Scalar<E> = <E as PairingEngine>::Fr;

/// A party identifier, doubling as the x-coordinate for polynomial evaluation
pub type Identity<E> = Scalar<E>;

///////////////////////////////////////////////////////////////////

// The two pairing groups are bound to abstract roles once, here. The primary
// group holds public keys and polynomial commitments; the dual group holds
// the hashed points and proof elements of the PVSH codec. Both sides of a
// protocol run must use the same binding.

/// The group holding public keys and commitments
pub type PrimaryGroup<E> = <E as PairingEngine>::G2Affine;
pub type PrimaryGroupP<E> = <E as PairingEngine>::G2Projective;

/// The paired group used inside PVSH proofs
pub type DualGroup<E> = <E as PairingEngine>::G1Affine;
pub type DualGroupP<E> = <E as PairingEngine>::G1Projective;

/// The target group GT of the pairing
pub type GT<E> = <E as PairingEngine>::Fqk;


/// The bilinear map under the configured role assignment: e(dual, primary).
pub fn pairing<E: PairingEngine>(p: DualGroup<E>, q: PrimaryGroup<E>) -> GT<E> {
    E::pairing(p, q)
}
