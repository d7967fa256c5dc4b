//! # critiq-store
//!
//! Client-side data store for the Critiq application.
//!
//! Two stores compose the core: [`IdentityStore`] owns the current-session
//! user, [`ContentStore`] owns the review and comment collections.  Both are
//! leaves with no dependency on each other or on any UI component; the UI
//! calls their operations and re-queries after every mutation (pull-based,
//! no pushed updates).  Each store persists its collections as
//! whole-snapshot JSON through a [`SnapshotStore`] handle, so a reload
//! resumes where the last completed write left off.

pub mod content;
pub mod identity;
pub mod snapshot;

mod error;
mod seed;

pub use content::ContentStore;
pub use error::{Result, StoreError};
pub use identity::IdentityStore;
pub use snapshot::SnapshotStore;
