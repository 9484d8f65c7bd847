//! Draft persistence for form sections
//!
//! Keeps in-progress form values in a single persisted record so that a
//! closed form can be restored later, and decides when closing a form would
//! lose unsaved work.

mod error;
mod manager;
mod notify;
mod sanitize;
mod snapshot;
mod store;

pub use error::DraftError;
pub use manager::{DraftManager, DraftPhase, ExitDecision, FormHost};
pub use notify::{Notifier, Toasts};
pub use sanitize::VERIFICATION_STATUS;
pub use snapshot::{has_other_values, has_profiles, FormSnapshot};
pub use store::{DraftRepository, DraftStore, FileRepository, DEFAULT_STORAGE_KEY};

#[cfg(test)]
pub use store::MemoryRepository;
