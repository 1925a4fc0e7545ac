pub mod error;
pub mod seed;
pub mod storage;
#[cfg(test)]
mod tests;

pub use self::error::Error;

use crate::draw;
use crate::types::{GroupRecord, GroupState, Grant};

use self::seed::SeedSource;
use self::storage::Storage;

pub type ServiceResult<T, S> = Result<T, Error<<S as Storage>::InternalError>>;

/// Draw-and-reveal operations on groups kept in `S`.
///
/// Every operation loads the group, works on the loaded copy and, for draws,
/// writes it back. Nothing is kept between calls.
pub struct Service<S, R>
where
    S: Storage,
    R: SeedSource,
{
    storage: S,
    seeds: R,
}

impl<S, R> Service<S, R>
where
    S: Storage,
    R: SeedSource,
{
    pub fn new(storage: S, seeds: R) -> Self {
        Self { storage, seeds }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create the group, or replace it with a fresh unseeded one when it
    /// already exists. Any previous draw is discarded.
    pub async fn register(
        &self,
        group_id: &str,
        participants: Vec<String>,
    ) -> ServiceResult<GroupRecord, S> {
        if group_id.is_empty() {
            return Err(Error::MissingParameter("grupo"));
        }
        draw::validate(&participants)?;

        let group = GroupRecord::new(group_id, participants);
        self.storage
            .save_group(&group)
            .await
            .map_err(Error::Storage)?;

        log::info!(
            "registered group {} with {} participants",
            group.id,
            group.participants.len()
        );

        Ok(group)
    }

    pub async fn group(&self, group_id: &str) -> ServiceResult<GroupRecord, S> {
        self.storage
            .get_group(group_id)
            .await
            .map_err(Error::Storage)?
            .ok_or_else(|| Error::GroupNotFound(group_id.to_string()))
    }

    /// Draw the group (again) and return the new reveal grants.
    ///
    /// Re-drawing replaces the seed, so grants from an earlier draw stop
    /// working.
    pub async fn draw(&self, group_id: &str) -> ServiceResult<Vec<Grant>, S> {
        let mut group = self.group(group_id).await?;

        let previous = match group.state() {
            GroupState::Drawn { seed, .. } => Some(seed),
            GroupState::Unseeded => None,
        };
        let seed = self.seeds.next_seed(previous);
        let assignment = draw::draw(&group.participants, seed)?;

        group.apply_draw(seed, assignment);
        self.storage
            .save_group(&group)
            .await
            .map_err(Error::Storage)?;

        log::info!(
            "drew group {} ({} participants, redraw: {})",
            group.id,
            group.participants.len(),
            previous.is_some()
        );

        group
            .grants()
            .ok_or_else(|| Error::NotDrawnYet(group.id.clone()))
    }

    /// Reveal grants of the group's current draw.
    pub async fn links(&self, group_id: &str) -> ServiceResult<Vec<Grant>, S> {
        let group = self.group(group_id).await?;

        group
            .grants()
            .ok_or_else(|| Error::NotDrawnYet(group.id.clone()))
    }

    /// Return who `participant` drew, provided `token` is the one derived for
    /// them from the current draw.
    pub async fn reveal(
        &self,
        group_id: &str,
        participant: &str,
        token: &str,
    ) -> ServiceResult<String, S> {
        let group = self.group(group_id).await?;

        let GroupState::Drawn { seed, assignment } = group.state() else {
            return Err(Error::NotDrawnYet(group.id.clone()));
        };

        let expected = crate::secret::derive_secret(&group.id, participant, seed);
        if !expected.matches(token) {
            log::warn!("invalid key [participant={}, group={}]", participant, group.id);
            log::debug!(
                "invalid key [participant={}, group={}]: expected {}, got {}",
                participant,
                group.id,
                expected,
                token
            );
            return Err(Error::InvalidToken);
        }

        assignment
            .get(participant)
            .cloned()
            .ok_or_else(|| Error::UnknownParticipant(participant.to_string()))
    }
}
