pub mod debounce;
pub mod status;
pub mod store;
mod synced_params;
mod synchronizer;

pub use debounce::Debouncer;
pub use status::{SyncPhase, SyncStatus};
pub use store::{ParameterStore, ParamsSnapshot};
pub use synced_params::SyncedParams;
