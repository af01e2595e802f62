use crate::{SelectedFile, SignUpForm, SubmissionId, TaskKind};

/// Side effects requested by `update` and executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the "who am I" endpoint and resolve the session.
    RefreshSession,
    SignIn { email: String, password: String },
    SignUp { form: SignUpForm },
    SignOut,
    /// Best-effort preview read for the newly selected file.
    ReadPreview { epoch: u64, file: SelectedFile },
    /// Upload the captured file for the captured task kind.
    SubmitAnalysis {
        submission_id: SubmissionId,
        file: SelectedFile,
        task: TaskKind,
    },
}
