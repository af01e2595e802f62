use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => {
            if state.begin_probe() {
                vec![Effect::RefreshSession]
            } else {
                Vec::new()
            }
        }
        Msg::SessionResolved { user } => {
            state.resolve_session(user);
            Vec::new()
        }
        Msg::SignInSubmitted { email, password } => {
            if state.begin_sign_in() {
                vec![Effect::SignIn { email, password }]
            } else {
                Vec::new()
            }
        }
        Msg::SignInFinished { outcome } => {
            state.finish_sign_in(outcome);
            Vec::new()
        }
        Msg::SignUpSubmitted { form } => vec![Effect::SignUp { form }],
        Msg::SignUpFinished { outcome } => {
            state.finish_sign_up(outcome);
            Vec::new()
        }
        Msg::SignOutRequested => vec![Effect::SignOut],
        Msg::SignedOut => {
            state.apply_signed_out();
            Vec::new()
        }
        // Picker and drag-and-drop are equivalent ingestion paths.
        Msg::FilePicked(file) | Msg::FileDropped(file) => {
            let epoch = state.select_file(file.clone());
            vec![Effect::ReadPreview { epoch, file }]
        }
        Msg::PreviewLoaded { epoch, data_url } => {
            state.attach_preview(epoch, data_url);
            Vec::new()
        }
        Msg::PreviewFailed { epoch } => {
            state.preview_unavailable(epoch);
            Vec::new()
        }
        Msg::TaskChanged(task) => {
            state.change_task(task);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((submission_id, file, task)) => vec![Effect::SubmitAnalysis {
                submission_id,
                file,
                task,
            }],
            None => Vec::new(),
        },
        Msg::SubmitFinished {
            submission_id,
            outcome,
        } => {
            state.apply_submission_outcome(submission_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
