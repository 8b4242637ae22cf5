//! State digest for replay verification.
//!
//! Two runs that start from the same state must produce the same digest after
//! every tick. Playback tooling compares digests instead of whole states.

use sha2::{Digest, Sha256};

use super::CombatState;

impl CombatState {
    /// Computes a SHA-256 commitment to the full state.
    ///
    /// # Design
    ///
    /// - Uses bincode for deterministic serialization
    /// - Field order and roster order are part of the commitment
    /// - The event log is included, so narration divergence is detected too
    ///
    /// # Errors
    ///
    /// Returns the bincode error if the state cannot be encoded.
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        let bytes = bincode::serialize(self)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{Character, CombatState};

    #[test]
    fn equal_states_share_a_digest() {
        let build = || {
            CombatState::new(
                vec![Character::player(1, "Knight", 100)],
                vec![Character::enemy(2, "Goblin", 40)],
            )
            .unwrap()
        };

        let a = build().digest().unwrap();
        let b = build().digest().unwrap();
        assert_eq!(a, b);

        let mut changed = build();
        changed.players[0].current_hp = 99;
        assert_ne!(changed.digest().unwrap(), a);
    }
}
