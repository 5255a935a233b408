use crate::{
    Identity,
    PrimaryGroup,
    Scalar,
    threshold::{
        config::Config,
        errors::ThresholdError,
        poly::{lagrange_recover_group, lagrange_recover_scalar, shamir_evaluate_group},
        pvsh::{self, Verdict},
        share::ReceivedContribution,
    },
    utils::clear_scalars,
};

use ark_ec::PairingEngine;
use ark_ff::Zero;


// Reasons carried by accumulated protocol errors.
pub const MISMATCH_PH_AND_CIPHER_TEXT: &str = "MISMATCH_PH_AND_CIPHER_TEXT";
pub const INVALID_SH_PH_FOR_ME: &str = "INVALID_SH_PH_FOR_ME";


/* Struct ProtocolError records a per-share protocol failure. These are
   accumulated and surfaced as data, never raised, so one combining pass can
   report every bad share of a round in a single response. A `sender_id` of
   None marks the post-aggregation secret/public consistency failure. */

#[derive(Clone, Debug)]
pub struct ProtocolError<E: PairingEngine> {
    pub sender_id: Option<Identity<E>>,
    pub receiver_id: Identity<E>,
    pub reason: String,
}


/* Struct PublicShare pairs a member id with its aggregated public share. */

#[derive(Clone, Debug)]
pub struct PublicShare<E: PairingEngine> {
    pub id: Identity<E>,
    pub public_share: PrimaryGroup<E>,
}


/* Struct ThresholdKey is the outcome of one combining pass. A non-empty
   `errors` list means the round is unusable and must be retried with fresh
   contributions; the key material then holds default values. */

#[derive(Clone, Debug)]
pub struct ThresholdKey<E: PairingEngine> {
    pub id: Identity<E>,
    pub secret_share: Scalar<E>,
    pub public_share: PrimaryGroup<E>,
    pub per_member_public_shares: Vec<PublicShare<E>>,
    pub group_public_key: PrimaryGroup<E>,
    pub errors: Vec<ProtocolError<E>>,
}


// Accumulation state for one receiver across all dealers.
struct ShareBucket<E: PairingEngine> {
    id: Identity<E>,
    sender_ids: Vec<Identity<E>>,
    public_shares: Vec<PrimaryGroup<E>>,
    secret_shares: Vec<Scalar<E>>,
}

impl<E: PairingEngine> ShareBucket<E> {
    fn new(id: Identity<E>) -> Self {
        Self {
            id,
            sender_ids: Vec::new(),
            public_shares: Vec::new(),
            secret_shares: Vec::new(),
        }
    }
}


// Function for combining the contributions of a round into this party's
// threshold key material.
//
// Every share of every contribution is verified against its dealer's public
// coefficients. A verification mismatch is recorded and that entry skipped;
// the shares addressed to `my_id` are additionally decoded. When the whole
// round verified, per-member public shares (and this party's secret share)
// are merged across dealers by Lagrange recovery at zero over the dealer
// identities, and the group public key is recovered from the per-member
// aggregates at the member identities.
pub fn combine<E: PairingEngine>(
    config: &Config<E>,
    received: &[ReceivedContribution<E>],
    my_id: &Identity<E>,
    my_secret_key: &Scalar<E>,
) -> Result<ThresholdKey<E>, ThresholdError> {
    if received.is_empty() {
        return Err(ThresholdError::NoContributionsError);
    }

    let my_public_key = config.public_key(my_secret_key);

    let mut errors: Vec<ProtocolError<E>> = Vec::new();
    let mut buckets: Vec<ShareBucket<E>> = Vec::new();

    for contribution in received {
        for share in &contribution.contribution.shares {
            // The public share this dealer's commitments promise the receiver.
            let expected_ph = shamir_evaluate_group::<E>(
                &contribution.contribution.public_coefficients,
                &share.receiver_id,
            )?;

            let verdict = pvsh::verify(
                config,
                &share.receiver_id,
                &share.receiver_public_key,
                &expected_ph,
                &share.payload,
            )?;

            if verdict == Verdict::Mismatch {
                errors.push(ProtocolError {
                    sender_id: Some(contribution.sender_id),
                    receiver_id: share.receiver_id,
                    reason: MISMATCH_PH_AND_CIPHER_TEXT.to_string(),
                });
                continue;
            }

            let position = buckets
                .iter()
                .position(|bucket| bucket.id == share.receiver_id);
            let bucket = match position {
                Some(index) => &mut buckets[index],
                None => {
                    buckets.push(ShareBucket::new(share.receiver_id));
                    buckets.last_mut().unwrap()
                }
            };

            bucket.sender_ids.push(contribution.sender_id);
            bucket.public_shares.push(expected_ph);

            if share.receiver_id == *my_id {
                let decoded = pvsh::decode::<E>(
                    &share.receiver_id,
                    &my_public_key,
                    my_secret_key,
                    &share.payload,
                )?;
                bucket.secret_shares.push(decoded);
            }
        }
    }

    if !errors.is_empty() {
        // A failed verification poisons the whole round: report the
        // receivers seen so far with default material and never compute
        // the secret.
        return Ok(ThresholdKey {
            id: Identity::<E>::zero(),
            secret_share: Scalar::<E>::zero(),
            public_share: PrimaryGroup::<E>::zero(),
            per_member_public_shares: buckets
                .iter()
                .map(|bucket| PublicShare {
                    id: bucket.id,
                    public_share: PrimaryGroup::<E>::zero(),
                })
                .collect(),
            group_public_key: PrimaryGroup::<E>::zero(),
            errors,
        });
    }

    let mut my_secret_share = Scalar::<E>::zero();
    let mut per_member_public_shares = Vec::with_capacity(buckets.len());

    for bucket in buckets.iter_mut() {
        let public_share = lagrange_recover_group::<E>(&bucket.public_shares, &bucket.sender_ids)?;

        // Only the bucket for `my_id` can carry decoded secret shares.
        if !bucket.secret_shares.is_empty() {
            let secret_share =
                lagrange_recover_scalar::<E>(&bucket.secret_shares, &bucket.sender_ids)?;
            clear_scalars(&mut bucket.secret_shares);

            if config.public_key(&secret_share) != public_share {
                errors.push(ProtocolError {
                    sender_id: None,
                    receiver_id: bucket.id,
                    reason: INVALID_SH_PH_FOR_ME.to_string(),
                });
            }

            my_secret_share = secret_share;
        }

        per_member_public_shares.push(PublicShare {
            id: bucket.id,
            public_share,
        });
    }

    let group_public_key = lagrange_recover_group::<E>(
        &per_member_public_shares
            .iter()
            .map(|entry| entry.public_share)
            .collect::<Vec<_>>(),
        &per_member_public_shares
            .iter()
            .map(|entry| entry.id)
            .collect::<Vec<_>>(),
    )?;

    let mine = per_member_public_shares
        .iter()
        .find(|entry| entry.id == *my_id);

    Ok(ThresholdKey {
        id: if mine.is_some() {
            *my_id
        } else {
            Identity::<E>::zero()
        },
        secret_share: my_secret_share,
        public_share: mine
            .map(|entry| entry.public_share)
            .unwrap_or_else(PrimaryGroup::<E>::zero),
        per_member_public_shares,
        group_public_key,
        errors,
    })
}


// Function for recovering the combined public polynomial coefficients from
// the first `threshold` contributions, coefficient-wise across dealers.
pub fn recover_public_coefficients<E: PairingEngine>(
    received: &[ReceivedContribution<E>],
    threshold: usize,
) -> Result<Vec<PrimaryGroup<E>>, ThresholdError> {
    if threshold < 1 {
        return Err(ThresholdError::InvalidThreshold(threshold));
    }

    if received.len() < threshold {
        return Err(ThresholdError::InsufficientContributionsError(
            received.len(),
            threshold,
        ));
    }

    let contributions = &received[..threshold];

    let width = contributions[0].contribution.public_coefficients.len();
    for contribution in contributions {
        if contribution.contribution.public_coefficients.len() != width {
            return Err(ThresholdError::MismatchedCoefficientsError);
        }
    }

    let sender_ids = contributions
        .iter()
        .map(|contribution| contribution.sender_id)
        .collect::<Vec<_>>();

    let mut recovered = Vec::with_capacity(width);

    for index in 0..width {
        let column = contributions
            .iter()
            .map(|contribution| contribution.contribution.public_coefficients[index])
            .collect::<Vec<_>>();

        recovered.push(lagrange_recover_group::<E>(&column, &sender_ids)?);
    }

    Ok(recovered)
}


/* Unit tests: */


#[cfg(test)]
mod test {
    use crate::{
        Identity,
        PrimaryGroup,
        Scalar,
        threshold::{
            combiner::{
                INVALID_SH_PH_FOR_ME,
                MISMATCH_PH_AND_CIPHER_TEXT,
                combine,
                recover_public_coefficients,
            },
            config::Config,
            dealer::build_contribution,
            errors::ThresholdError,
            member::{KeyPair, Member, random_identity},
            poly::{lagrange_recover_scalar, shamir_evaluate_group},
            share::ReceivedContribution,
            srs::SRS,
        },
    };

    use ark_bls12_381::Bls12_381 as E;
    use ark_ff::Zero;
    use ark_std::UniformRand;

    use rand::{Rng, SeedableRng, thread_rng};
    use rand_chacha::ChaCha20Rng;


    struct Round {
        config: Config<E>,
        keypairs: Vec<KeyPair<E>>,
        members: Vec<Member<E>>,
        dealer_ids: Vec<Identity<E>>,
        received: Vec<ReceivedContribution<E>>,
    }

    // One full dealing round: `dealers` contributions over `n` members.
    fn run_round<R: Rng>(rng: &mut R, threshold: usize, n: usize, dealers: usize) -> Round {
        let config = Config::new(SRS::<E>::setup(rng).unwrap());

        let keypairs = (0..n)
            .map(|_| KeyPair::generate(&config, rng))
            .collect::<Vec<_>>();
        let members = keypairs
            .iter()
            .map(|keypair| keypair.member(random_identity::<E, _>(rng)))
            .collect::<Vec<_>>();

        let dealer_ids = (0..dealers)
            .map(|_| random_identity::<E, _>(rng))
            .collect::<Vec<_>>();
        let received = dealer_ids
            .iter()
            .map(|&sender_id| ReceivedContribution {
                sender_id,
                contribution: build_contribution(&config, threshold, &members, None, rng)
                    .unwrap(),
            })
            .collect::<Vec<_>>();

        Round {
            config,
            keypairs,
            members,
            dealer_ids,
            received,
        }
    }


    #[test]
    fn test_end_to_end_single_dealer() {
        let rng = &mut thread_rng();
        let round = run_round(rng, 2, 3, 1);
        let contribution = &round.received[0].contribution;

        let mut secret_shares = vec![];
        let mut points = vec![];

        // members A and B each combine the lone contribution
        for i in 0..2 {
            let result = combine(
                &round.config,
                &round.received,
                &round.members[i].id,
                &round.keypairs[i].secret_key,
            )
            .unwrap();

            assert!(result.errors.is_empty());
            assert_eq!(result.id, round.members[i].id);

            // the aggregated public share equals the commitment evaluation
            let expected_ph = shamir_evaluate_group::<E>(
                &contribution.public_coefficients,
                &round.members[i].id,
            )
            .unwrap();
            assert_eq!(result.public_share, expected_ph);
            assert_eq!(round.config.public_key(&result.secret_share), expected_ph);

            // with three members on a degree-1 polynomial, the group key is
            // the dealer's constant-term commitment
            assert_eq!(result.group_public_key, contribution.public_coefficients[0]);
            assert_eq!(result.per_member_public_shares.len(), 3);

            secret_shares.push(result.secret_share);
            points.push(round.members[i].id);
        }

        // the two secret shares interpolate to the dealer's constant term
        let recovered = lagrange_recover_scalar::<E>(&secret_shares, &points).unwrap();
        assert_eq!(
            round.config.public_key(&recovered),
            contribution.public_coefficients[0]
        );
    }


    #[test]
    fn test_combine_recovers_pinned_constant() {
        let rng = &mut thread_rng();
        let config = Config::new(SRS::<E>::setup(rng).unwrap());

        let keypairs = (0..3)
            .map(|_| KeyPair::generate(&config, rng))
            .collect::<Vec<_>>();
        let members = keypairs
            .iter()
            .map(|keypair| keypair.member(random_identity::<E, _>(rng)))
            .collect::<Vec<_>>();

        let secret = Scalar::<E>::rand(rng);
        let received = vec![ReceivedContribution {
            sender_id: random_identity::<E, _>(rng),
            contribution: build_contribution(&config, 2, &members, Some(secret), rng).unwrap(),
        }];

        let mut secret_shares = vec![];
        let mut points = vec![];
        for i in 0..2 {
            let result = combine(
                &config,
                &received,
                &members[i].id,
                &keypairs[i].secret_key,
            )
            .unwrap();

            assert!(result.errors.is_empty());
            secret_shares.push(result.secret_share);
            points.push(members[i].id);
        }

        // the combined shares reconstruct the dealer's constant term itself
        assert_eq!(
            lagrange_recover_scalar::<E>(&secret_shares, &points).unwrap(),
            secret
        );
    }


    #[test]
    fn test_multi_dealer_combine() {
        let rng = &mut ChaCha20Rng::seed_from_u64(7);
        let round = run_round(rng, 2, 3, 2);

        let results = (0..3)
            .map(|i| {
                combine(
                    &round.config,
                    &round.received,
                    &round.members[i].id,
                    &round.keypairs[i].secret_key,
                )
                .unwrap()
            })
            .collect::<Vec<_>>();

        for (i, result) in results.iter().enumerate() {
            assert!(result.errors.is_empty());
            assert_eq!(result.id, round.members[i].id);
            assert_eq!(
                round.config.public_key(&result.secret_share),
                result.public_share
            );
        }

        // all parties agree on the group public key
        assert_eq!(results[0].group_public_key, results[1].group_public_key);
        assert_eq!(results[1].group_public_key, results[2].group_public_key);

        // two members' secret shares interpolate to the group secret
        let secret_shares = vec![results[0].secret_share, results[1].secret_share];
        let points = vec![round.members[0].id, round.members[1].id];
        let group_secret = lagrange_recover_scalar::<E>(&secret_shares, &points).unwrap();
        assert_eq!(
            round.config.public_key(&group_secret),
            results[0].group_public_key
        );

        // coefficient-wise recovery agrees with the combiner's group key
        let coefficients = recover_public_coefficients::<E>(&round.received, 2).unwrap();
        assert_eq!(coefficients.len(), 2);
        assert_eq!(coefficients[0], results[0].group_public_key);
    }


    #[test]
    fn test_failure_propagation() {
        let rng = &mut thread_rng();
        let mut round = run_round(rng, 2, 3, 2);

        // corrupt the second dealer's share addressed to member C
        let payload = &round.received[1].contribution.shares[2].payload;
        let mut fields: Vec<String> = payload.split('.').map(String::from).collect();
        let mut chars: Vec<char> = fields[0].chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        fields[0] = chars.into_iter().collect();
        round.received[1].contribution.shares[2].payload = fields.join(".");

        let result = combine(
            &round.config,
            &round.received,
            &round.members[0].id,
            &round.keypairs[0].secret_key,
        )
        .unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].sender_id, Some(round.dealer_ids[1]));
        assert_eq!(result.errors[0].receiver_id, round.members[2].id);
        assert_eq!(result.errors[0].reason, MISMATCH_PH_AND_CIPHER_TEXT);

        // no key material is produced for a poisoned round
        assert_eq!(result.id, Identity::<E>::zero());
        assert_eq!(result.secret_share, Scalar::<E>::zero());
        assert_eq!(result.public_share, PrimaryGroup::<E>::zero());
        assert_eq!(result.group_public_key, PrimaryGroup::<E>::zero());
        for entry in result.per_member_public_shares.iter() {
            assert_eq!(entry.public_share, PrimaryGroup::<E>::zero());
        }
    }


    #[test]
    fn test_secret_public_consistency_check() {
        let rng = &mut thread_rng();
        let round = run_round(rng, 2, 3, 2);

        // combining under member A's id with a foreign secret key passes
        // public verification but decodes garbage shares
        let foreign = KeyPair::generate(&round.config, rng);
        let result = combine(
            &round.config,
            &round.received,
            &round.members[0].id,
            &foreign.secret_key,
        )
        .unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].sender_id, None);
        assert_eq!(result.errors[0].receiver_id, round.members[0].id);
        assert_eq!(result.errors[0].reason, INVALID_SH_PH_FOR_ME);
    }


    #[test]
    fn test_empty_contributions() {
        let rng = &mut thread_rng();
        let config = Config::new(SRS::<E>::setup(rng).unwrap());
        let keypair = KeyPair::generate(&config, rng);
        let id = random_identity::<E, _>(rng);

        assert!(matches!(
            combine(&config, &[], &id, &keypair.secret_key),
            Err(ThresholdError::NoContributionsError)
        ));
    }


    #[test]
    fn test_recover_public_coefficients_insufficient() {
        let rng = &mut thread_rng();
        let round = run_round(rng, 2, 3, 1);

        assert!(matches!(
            recover_public_coefficients::<E>(&round.received, 2),
            Err(ThresholdError::InsufficientContributionsError(1, 2))
        ));
    }


    #[test]
    fn test_recover_public_coefficients_mismatched_widths() {
        let rng = &mut thread_rng();
        let mut round = run_round(rng, 2, 3, 2);

        round.received[1]
            .contribution
            .public_coefficients
            .pop()
            .unwrap();

        assert!(matches!(
            recover_public_coefficients::<E>(&round.received, 2),
            Err(ThresholdError::MismatchedCoefficientsError)
        ));
    }
}
