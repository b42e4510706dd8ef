pub mod step_engine;
pub mod update_channel;

pub use step_engine::{EditRequest, ParamsQueryOptions, StepEngine, StepId};
pub use update_channel::{ExternalUpdate, UpdateCause, UpdateChannel, UpdateSubscription};
