//! Product list synchronization.

mod engine;
mod state;

pub use engine::{ProductSyncEngine, API_KEY_HEADER};
pub use state::{RefreshOutcome, SyncState};
