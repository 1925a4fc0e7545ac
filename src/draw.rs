use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::Assignment;

/// A draw with two people would just swap them.
pub const MIN_PARTICIPANTS: usize = 3;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("at least 3 participants are needed, got {0}")]
    InsufficientParticipants(usize),
    #[error("participant listed more than once: {0}")]
    DuplicateParticipant(String),
    #[error("participant name is empty")]
    EmptyParticipantName,
}

/// Check that every participant can be told apart from the others.
///
/// Does not check the group size, a group may be registered before all of
/// its members are known.
pub fn validate(participants: &[String]) -> Result<(), DrawError> {
    let mut seen = HashSet::with_capacity(participants.len());

    for participant in participants {
        if participant.trim().is_empty() {
            return Err(DrawError::EmptyParticipantName);
        }
        if !seen.insert(participant.as_str()) {
            return Err(DrawError::DuplicateParticipant(participant.clone()));
        }
    }

    Ok(())
}

/// Shuffle `participants` with a generator seeded by `seed`.
///
/// The same seed and the same input order always give the same output.
pub fn shuffled(participants: &[String], seed: i64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let mut order = participants.to_vec();
    order.shuffle(&mut rng);
    order
}

/// Draw secret friends for `participants`.
///
/// Participants are put in a random circle and everyone gives a gift to the
/// next one, the last giving to the first. The result is a single cycle over
/// all of them, so nobody draws themselves and nobody is drawn twice.
pub fn draw(participants: &[String], seed: i64) -> Result<Assignment, DrawError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(DrawError::InsufficientParticipants(participants.len()));
    }
    validate(participants)?;

    let order = shuffled(participants, seed);
    log::debug!("draw order for seed {}: {:?}", seed, order);

    let assignment = order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(giver, receiver)| (giver.clone(), receiver.clone()))
        .collect();

    Ok(assignment)
}
