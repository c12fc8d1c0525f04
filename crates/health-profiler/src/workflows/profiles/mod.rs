//! Profile intake service: runs the assessment pipeline for a submission,
//! asks for free-text notes, persists results, and records feedback.

pub mod domain;
pub mod notes;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    FeedbackRejection, FeedbackSubmission, FullProfile, ProfileId, ProfileSubmission,
    SessionFeedback, ANONYMOUS_SESSION,
};
pub use notes::{DisabledNotes, NotesError, NotesGenerator, NotesPrompt, NOTES_CONTEXT_FACTORS};
pub use repository::{ProfileStore, StoreError, PROFILE_RETENTION_LIMIT};
pub use router::profile_router;
pub use service::{ProfilingService, ProfilingServiceError};
