//! Per-participant capability tokens.
//!
//! A token is `hex(sha256("<group>:<seed>:<participant>"))`. Whoever holds it
//! may see that participant's draw, nothing else is checked. Since the seed
//! changes on every draw, a re-draw silently revokes every link handed out
//! before it.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a token in hex characters.
pub const TOKEN_LEN: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare with a token supplied by a client.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.len() == candidate.len()
            && bool::from(self.0.as_bytes().ct_eq(candidate.as_bytes()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens end up in logs through `{:?}` on records and grants otherwise.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}..)", &self.0[..8.min(self.0.len())])
    }
}

/// Derive the reveal token of `participant` for the draw of `group_id` made
/// with `seed`.
pub fn derive_secret(group_id: &str, participant: &str, seed: i64) -> Token {
    let mut hasher = Sha256::new();
    hasher.update(group_id.as_bytes());
    hasher.update(b":");
    hasher.update(seed.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(participant.as_bytes());

    Token(hex::encode(hasher.finalize()))
}
