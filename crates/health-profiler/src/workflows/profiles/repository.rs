use super::super::personalization::PersonalizationWeights;
use super::domain::FullProfile;

/// Number of saved profiles a store keeps; older ones are dropped first.
pub const PROFILE_RETENTION_LIMIT: usize = 50;

/// Persistence boundary for profiles and per-session weights.
///
/// Reads and writes of a session's weights are separate calls, so two
/// concurrent feedback submissions for one session may overwrite each other.
pub trait ProfileStore: Send + Sync {
    /// Returns the session's weights, storing an empty set on first access.
    fn get_weights(&self, session_id: &str) -> Result<PersonalizationWeights, StoreError>;
    fn set_weights(
        &self,
        session_id: &str,
        weights: PersonalizationWeights,
    ) -> Result<(), StoreError>;
    fn save_profile(&self, profile: FullProfile) -> Result<(), StoreError>;
    /// Most recent first, at most [`PROFILE_RETENTION_LIMIT`] entries.
    fn list_profiles(&self) -> Result<Vec<FullProfile>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}
