use crate::{AnalysisOutcome, SelectedFile, SignUpForm, SubmissionId, TaskKind, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Process start; triggers the one-shot session probe.
    AppStarted,
    /// The "who am I" probe (bootstrap or post-sign-in) resolved.
    SessionResolved { user: Option<UserProfile> },
    /// User submitted the sign-in form.
    SignInSubmitted { email: String, password: String },
    /// Sign-in network call finished; `Err` carries the inline message.
    SignInFinished { outcome: Result<(), String> },
    /// User submitted the registration form.
    SignUpSubmitted { form: SignUpForm },
    /// Registration finished; either way the message is shown inline.
    SignUpFinished { outcome: Result<String, String> },
    /// User clicked sign out.
    SignOutRequested,
    /// Sign-out completed; the local token is already cleared.
    SignedOut,
    /// User chose a file through the picker.
    FilePicked(SelectedFile),
    /// User dropped a file onto the drop zone.
    FileDropped(SelectedFile),
    /// Preview read finished for the selection identified by `epoch`.
    PreviewLoaded { epoch: u64, data_url: String },
    /// Preview read failed; the selection stays submittable.
    PreviewFailed { epoch: u64 },
    /// User changed the analysis task selector.
    TaskChanged(TaskKind),
    /// User clicked upload-and-process.
    SubmitClicked,
    /// Upload finished for `submission_id`; stale ids are discarded.
    SubmitFinished {
        submission_id: SubmissionId,
        outcome: Result<AnalysisOutcome, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
