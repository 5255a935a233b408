use crate::threshold::{
    combiner::{ProtocolError, PublicShare, ThresholdKey},
    errors::ThresholdError,
    share::{Contribution, EncryptedShare, ReceivedContribution},
};

use ark_ec::PairingEngine;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use serde::{Deserialize, Serialize};


/* External representations of protocol values. Every scalar/group field has
   three accepted representations: hex string, raw bytes, or the in-memory
   typed value. They are normalized here, at a single boundary; all internal
   logic operates only on canonical values. */


// Tagged input accepted at the API boundary.
pub enum Input<'a, T> {
    Hex(&'a str),
    Bytes(&'a [u8]),
    Typed(T),
}

// Function for normalizing a tagged input into its canonical value.
pub fn parse<T: CanonicalDeserialize>(input: Input<T>) -> Result<T, ThresholdError> {
    match input {
        Input::Hex(encoded) => from_hex(encoded),
        Input::Bytes(bytes) => from_bytes(bytes),
        Input::Typed(value) => Ok(value),
    }
}


// Canonical byte serialization of a value.
pub fn to_bytes<T: CanonicalSerialize>(value: &T) -> Result<Vec<u8>, ThresholdError> {
    let mut bytes = vec![];
    value.serialize(&mut bytes)?;

    Ok(bytes)
}

pub fn to_hex<T: CanonicalSerialize>(value: &T) -> Result<String, ThresholdError> {
    Ok(hex::encode(to_bytes(value)?))
}

pub fn from_bytes<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, ThresholdError> {
    Ok(T::deserialize(bytes)?)
}

pub fn from_hex<T: CanonicalDeserialize>(encoded: &str) -> Result<T, ThresholdError> {
    from_bytes(&hex::decode(encoded)?)
}


/// A lossless external representation for canonical values.
pub trait WireRepr: Sized {
    fn encode<T: CanonicalSerialize>(value: &T) -> Result<Self, ThresholdError>;
    fn decode<T: CanonicalDeserialize>(&self) -> Result<T, ThresholdError>;
}

impl WireRepr for String {
    fn encode<T: CanonicalSerialize>(value: &T) -> Result<Self, ThresholdError> {
        to_hex(value)
    }

    fn decode<T: CanonicalDeserialize>(&self) -> Result<T, ThresholdError> {
        from_hex(self)
    }
}

impl WireRepr for Vec<u8> {
    fn encode<T: CanonicalSerialize>(value: &T) -> Result<Self, ThresholdError> {
        to_bytes(value)
    }

    fn decode<T: CanonicalDeserialize>(&self) -> Result<T, ThresholdError> {
        from_bytes(self)
    }
}


/* Wire forms of the protocol structures, generic over the per-field
   representation. The PVSH payload is always the dot-separated hex string
   and stays opaque to transport. */

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedShareWire<T> {
    pub receiver_id: T,
    pub receiver_public_key: T,
    pub payload: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContributionWire<T> {
    pub public_coefficients: Vec<T>,
    pub shares: Vec<EncryptedShareWire<T>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceivedContributionWire<T> {
    pub sender_id: T,
    pub contribution: ContributionWire<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolErrorWire<T> {
    pub sender_id: Option<T>,
    pub receiver_id: T,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicShareWire<T> {
    pub id: T,
    pub public_share: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdKeyWire<T> {
    pub id: T,
    pub secret_share: T,
    pub public_share: T,
    pub per_member_public_shares: Vec<PublicShareWire<T>>,
    pub group_public_key: T,
    pub errors: Vec<ProtocolErrorWire<T>>,
}

pub type EncryptedShareHex = EncryptedShareWire<String>;
pub type ContributionHex = ContributionWire<String>;
pub type ReceivedContributionHex = ReceivedContributionWire<String>;
pub type ThresholdKeyHex = ThresholdKeyWire<String>;

pub type EncryptedShareBytes = EncryptedShareWire<Vec<u8>>;
pub type ContributionBytes = ContributionWire<Vec<u8>>;
pub type ReceivedContributionBytes = ReceivedContributionWire<Vec<u8>>;
pub type ThresholdKeyBytes = ThresholdKeyWire<Vec<u8>>;


impl<E: PairingEngine> Contribution<E> {

    pub fn to_wire<W: WireRepr>(&self) -> Result<ContributionWire<W>, ThresholdError> {
        Ok(ContributionWire {
            public_coefficients: self
                .public_coefficients
                .iter()
                .map(W::encode)
                .collect::<Result<_, _>>()?,
            shares: self
                .shares
                .iter()
                .map(|share| {
                    Ok(EncryptedShareWire {
                        receiver_id: W::encode(&share.receiver_id)?,
                        receiver_public_key: W::encode(&share.receiver_public_key)?,
                        payload: share.payload.clone(),
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
        })
    }

    pub fn from_wire<W: WireRepr>(wire: &ContributionWire<W>) -> Result<Self, ThresholdError> {
        Ok(Self {
            public_coefficients: wire
                .public_coefficients
                .iter()
                .map(|coefficient| coefficient.decode())
                .collect::<Result<_, _>>()?,
            shares: wire
                .shares
                .iter()
                .map(|share| {
                    Ok(EncryptedShare {
                        receiver_id: share.receiver_id.decode()?,
                        receiver_public_key: share.receiver_public_key.decode()?,
                        payload: share.payload.clone(),
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
        })
    }

    pub fn to_hex(&self) -> Result<ContributionHex, ThresholdError> {
        self.to_wire()
    }

    pub fn to_bytes(&self) -> Result<ContributionBytes, ThresholdError> {
        self.to_wire()
    }
}


impl<E: PairingEngine> ReceivedContribution<E> {

    pub fn to_wire<W: WireRepr>(&self) -> Result<ReceivedContributionWire<W>, ThresholdError> {
        Ok(ReceivedContributionWire {
            sender_id: W::encode(&self.sender_id)?,
            contribution: self.contribution.to_wire()?,
        })
    }

    pub fn from_wire<W: WireRepr>(
        wire: &ReceivedContributionWire<W>,
    ) -> Result<Self, ThresholdError> {
        Ok(Self {
            sender_id: wire.sender_id.decode()?,
            contribution: Contribution::from_wire(&wire.contribution)?,
        })
    }
}


impl<E: PairingEngine> ThresholdKey<E> {

    pub fn to_wire<W: WireRepr>(&self) -> Result<ThresholdKeyWire<W>, ThresholdError> {
        Ok(ThresholdKeyWire {
            id: W::encode(&self.id)?,
            secret_share: W::encode(&self.secret_share)?,
            public_share: W::encode(&self.public_share)?,
            per_member_public_shares: self
                .per_member_public_shares
                .iter()
                .map(|entry| {
                    Ok(PublicShareWire {
                        id: W::encode(&entry.id)?,
                        public_share: W::encode(&entry.public_share)?,
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
            group_public_key: W::encode(&self.group_public_key)?,
            errors: self
                .errors
                .iter()
                .map(|error| {
                    Ok(ProtocolErrorWire {
                        sender_id: match &error.sender_id {
                            Some(sender_id) => Some(W::encode(sender_id)?),
                            None => None,
                        },
                        receiver_id: W::encode(&error.receiver_id)?,
                        reason: error.reason.clone(),
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
        })
    }

    pub fn from_wire<W: WireRepr>(wire: &ThresholdKeyWire<W>) -> Result<Self, ThresholdError> {
        Ok(Self {
            id: wire.id.decode()?,
            secret_share: wire.secret_share.decode()?,
            public_share: wire.public_share.decode()?,
            per_member_public_shares: wire
                .per_member_public_shares
                .iter()
                .map(|entry| {
                    Ok(PublicShare {
                        id: entry.id.decode()?,
                        public_share: entry.public_share.decode()?,
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
            group_public_key: wire.group_public_key.decode()?,
            errors: wire
                .errors
                .iter()
                .map(|error| {
                    Ok(ProtocolError {
                        sender_id: match &error.sender_id {
                            Some(sender_id) => Some(sender_id.decode()?),
                            None => None,
                        },
                        receiver_id: error.receiver_id.decode()?,
                        reason: error.reason.clone(),
                    })
                })
                .collect::<Result<_, ThresholdError>>()?,
        })
    }

    pub fn to_hex(&self) -> Result<ThresholdKeyHex, ThresholdError> {
        self.to_wire()
    }

    pub fn to_bytes(&self) -> Result<ThresholdKeyBytes, ThresholdError> {
        self.to_wire()
    }
}


/* Unit tests: */
