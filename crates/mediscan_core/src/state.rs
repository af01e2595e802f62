use std::path::PathBuf;

use crate::view_model::AppViewModel;

pub type SubmissionId = u64;

/// Inline message shown when submit is clicked with no file chosen.
pub const VALIDATION_NO_FILE: &str = "Please select an image file.";

/// Profile returned by the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub specialization: String,
}

/// Authentication status.
///
/// `Unknown` only exists before the first probe resolves; consumers must
/// treat it as "still loading", never as signed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(UserProfile),
}

impl Session {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Session::Unknown)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Registration payload for the sign-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Analysis mode selected for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskKind {
    Segmentation,
    #[default]
    Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Malignant,
    Benign,
    Unknown,
}

/// Structured classification verdict, kept verbatim for history.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub prediction: Prediction,
    /// Probability of malignancy in percent, 0..=100.
    pub probability: f64,
    pub segmentation_mask_url: Option<String>,
    pub annotated_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Rendered segmentation mask exactly as returned by the service.
    Segmentation { image: Vec<u8> },
    Classification(ClassificationResult),
}

/// A locally chosen image file, pending upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

/// Per-submission workflow state. Exactly one value is alive at a time and
/// every user action replaces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    FileSelected,
    /// Preview read in flight; the selected file is already submittable.
    Previewing,
    Submitting,
    Succeeded(AnalysisOutcome),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: Session,
    probe_in_flight: bool,
    sign_in_in_flight: bool,
    auth_notice: Option<String>,
    task: TaskKind,
    selected_file: Option<SelectedFile>,
    preview: Option<String>,
    preview_epoch: u64,
    submission: SubmissionState,
    active_submission: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session.clone(),
            auth_notice: self.auth_notice.clone(),
            task: self.task,
            selected_file: self.selected_file.as_ref().map(|file| file.name.clone()),
            preview: self.preview.clone(),
            submission: self.submission.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Gate for the one-shot bootstrap probe: fires only while the session
    /// is unresolved and no probe is already pending.
    pub(crate) fn begin_probe(&mut self) -> bool {
        if self.probe_in_flight || self.session.is_resolved() {
            return false;
        }
        self.probe_in_flight = true;
        true
    }

    /// Applied unconditionally: when a sign-in races the bootstrap probe,
    /// the last resolution to arrive wins.
    pub(crate) fn resolve_session(&mut self, user: Option<UserProfile>) {
        self.probe_in_flight = false;
        self.session = match user {
            Some(user) => Session::Authenticated(user),
            None => Session::Anonymous,
        };
        self.mark_dirty();
    }

    pub(crate) fn begin_sign_in(&mut self) -> bool {
        if self.sign_in_in_flight {
            return false;
        }
        self.sign_in_in_flight = true;
        self.auth_notice = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn finish_sign_in(&mut self, outcome: Result<(), String>) {
        self.sign_in_in_flight = false;
        // Failure leaves the session untouched; the accompanying session
        // resolution carries the user on success.
        self.auth_notice = outcome.err();
        self.mark_dirty();
    }

    pub(crate) fn finish_sign_up(&mut self, outcome: Result<String, String>) {
        self.auth_notice = Some(match outcome {
            Ok(message) => message,
            Err(message) => message,
        });
        self.mark_dirty();
    }

    pub(crate) fn apply_signed_out(&mut self) {
        self.session = Session::Anonymous;
        self.auth_notice = None;
        self.mark_dirty();
    }

    /// File ingestion, picker and drop alike: clears any prior outcome and
    /// error, keeps nothing of the old preview, and abandons an in-flight
    /// submission so its completion is discarded on arrival.
    pub(crate) fn select_file(&mut self, file: SelectedFile) -> u64 {
        self.selected_file = Some(file);
        self.preview = None;
        self.preview_epoch += 1;
        self.active_submission = None;
        self.submission = SubmissionState::Previewing;
        self.mark_dirty();
        self.preview_epoch
    }

    pub(crate) fn attach_preview(&mut self, epoch: u64, data_url: String) {
        if epoch != self.preview_epoch {
            return;
        }
        self.preview = Some(data_url);
        if self.submission == SubmissionState::Previewing {
            self.submission = SubmissionState::FileSelected;
        }
        self.mark_dirty();
    }

    /// Preview is best-effort: a failed read leaves the selection usable.
    pub(crate) fn preview_unavailable(&mut self, epoch: u64) {
        if epoch != self.preview_epoch {
            return;
        }
        if self.submission == SubmissionState::Previewing {
            self.submission = SubmissionState::FileSelected;
        }
        self.mark_dirty();
    }

    /// Task changes reset outcome and error but never the selected file.
    /// An in-flight submission keeps the task kind captured at submit time.
    pub(crate) fn change_task(&mut self, task: TaskKind) {
        self.task = task;
        if matches!(
            self.submission,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        ) {
            self.submission = if self.selected_file.is_some() {
                SubmissionState::FileSelected
            } else {
                SubmissionState::Idle
            };
        }
        self.mark_dirty();
    }

    pub(crate) fn begin_submission(&mut self) -> Option<(SubmissionId, SelectedFile, TaskKind)> {
        match self.submission {
            // Single-flight: a second submit never reaches the network.
            SubmissionState::Submitting => return None,
            // Leaving a success requires a new file or task change.
            SubmissionState::Succeeded(_) => return None,
            _ => {}
        }
        let Some(file) = self.selected_file.clone() else {
            self.submission = SubmissionState::Failed(VALIDATION_NO_FILE.to_string());
            self.mark_dirty();
            return None;
        };
        self.next_submission_id += 1;
        let id = self.next_submission_id;
        self.active_submission = Some(id);
        self.submission = SubmissionState::Submitting;
        self.mark_dirty();
        Some((id, file, self.task))
    }

    pub(crate) fn apply_submission_outcome(
        &mut self,
        id: SubmissionId,
        outcome: Result<AnalysisOutcome, String>,
    ) {
        if self.active_submission != Some(id) {
            // Completion for an abandoned submission; drop it.
            return;
        }
        self.active_submission = None;
        self.submission = match outcome {
            Ok(result) => SubmissionState::Succeeded(result),
            Err(message) => SubmissionState::Failed(message),
        };
        self.mark_dirty();
    }
}
