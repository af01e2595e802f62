//! Mediscan core: pure session and upload state machines.
mod effect;
mod guard;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use guard::{guest_route, protected_route, GuardDecision, Route};
pub use msg::Msg;
pub use state::{
    AnalysisOutcome, AppState, ClassificationResult, Prediction, SelectedFile, Session,
    SignUpForm, SubmissionId, SubmissionState, TaskKind, UserProfile, VALIDATION_NO_FILE,
};
pub use update::update;
pub use view_model::AppViewModel;
