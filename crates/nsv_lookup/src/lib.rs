pub mod controller;
pub mod loader;
pub mod orchestrator;
pub mod render;
pub mod sequence;
pub mod state;

pub use controller::{ArticleLookupController, CloseEffect, SubmitStatus};
pub use orchestrator::{LookupOrchestrator, LookupOutcome};
pub use state::{ActiveModal, ModalKind, ViewState};
