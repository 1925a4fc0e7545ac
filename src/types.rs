use std::collections::BTreeMap;

use crate::secret::{self, Token};

/// Who drew whom: giver name to receiver name.
pub type Assignment = BTreeMap<String, String>;

/// A secret friend group as it is kept in the record store.
///
/// Field names on the wire are stable and shared with records written by
/// earlier deployments, hence the renames.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    #[cfg_attr(feature = "serde", serde(rename = "amigosecreto"))]
    pub id: String,

    /// Participants in registration order.
    #[cfg_attr(feature = "serde", serde(rename = "amigos", default))]
    pub participants: Vec<String>,

    /// Empty until the group is drawn.
    #[cfg_attr(feature = "serde", serde(rename = "sorteio", default))]
    pub assignment: Assignment,

    /// Seed of the last draw. Meaningless while `assignment` is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: i64,
}

/// Lifecycle of a group record, derived from its stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState<'a> {
    /// Registered but never drawn.
    Unseeded,
    /// Drawn with `seed`; every participant has exactly one friend.
    Drawn {
        seed: i64,
        assignment: &'a Assignment,
    },
}

/// A participant together with the token that lets them see their draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub participant: String,
    pub token: Token,
}

impl GroupRecord {
    pub fn new(id: impl Into<String>, participants: Vec<String>) -> Self {
        Self {
            id: id.into(),
            participants,
            assignment: Assignment::new(),
            seed: 0,
        }
    }

    pub fn state(&self) -> GroupState<'_> {
        if self.assignment.is_empty() {
            GroupState::Unseeded
        } else {
            GroupState::Drawn {
                seed: self.seed,
                assignment: &self.assignment,
            }
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self.state(), GroupState::Drawn { .. })
    }

    /// Replace the previous draw (if any) with a new one. Tokens derived
    /// from the old seed stop matching from here on.
    pub fn apply_draw(&mut self, seed: i64, assignment: Assignment) {
        self.seed = seed;
        self.assignment = assignment;
    }

    /// Reveal tokens for every participant, in registration order.
    ///
    /// Returns `None` while the group is unseeded.
    pub fn grants(&self) -> Option<Vec<Grant>> {
        let GroupState::Drawn { seed, assignment } = self.state() else {
            return None;
        };

        let grants = self
            .participants
            .iter()
            .filter(|participant| assignment.contains_key(*participant))
            .map(|participant| Grant {
                participant: participant.clone(),
                token: secret::derive_secret(&self.id, participant, seed),
            })
            .collect();

        Some(grants)
    }
}
