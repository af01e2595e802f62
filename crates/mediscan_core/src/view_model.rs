use crate::{Session, SubmissionState, TaskKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: Session,
    pub auth_notice: Option<String>,
    pub task: TaskKind,
    pub selected_file: Option<String>,
    pub preview: Option<String>,
    pub submission: SubmissionState,
    pub dirty: bool,
}
