use crate::{Identity, PrimaryGroup};

use ark_ec::PairingEngine;


/* Struct EncryptedShare carries one PVSH ciphertext addressed to a single
   member, together with the addressing material any observer needs in order
   to verify it against the dealer's public coefficients. */

#[derive(Clone, Debug)]
pub struct EncryptedShare<E: PairingEngine> {
    pub receiver_id: Identity<E>,
    pub receiver_public_key: PrimaryGroup<E>,
    pub payload: String,                      // PVSH ciphertext "c.U.V"
}


/* Struct Contribution is one dealer's output for a sharing round: the public
   commitments to its secret polynomial and one encrypted share per member.
   It is created once and immutable afterwards. */

#[derive(Clone, Debug)]
pub struct Contribution<E: PairingEngine> {
    pub public_coefficients: Vec<PrimaryGroup<E>>,
    pub shares: Vec<EncryptedShare<E>>,
}


/* Struct ReceivedContribution is a Contribution as seen by a combining
   party, tagged with the dealer it came from. */

#[derive(Clone, Debug)]
pub struct ReceivedContribution<E: PairingEngine> {
    pub sender_id: Identity<E>,
    pub contribution: Contribution<E>,
}
