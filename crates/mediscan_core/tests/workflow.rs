use std::sync::Once;

use mediscan_core::{
    update, AnalysisOutcome, AppState, ClassificationResult, Effect, Msg, Prediction,
    SelectedFile, SubmissionState, TaskKind, VALIDATION_NO_FILE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn scan(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        path: format!("/scans/{name}").into(),
    }
}

fn malignant_result() -> ClassificationResult {
    ClassificationResult {
        prediction: Prediction::Malignant,
        probability: 82.0,
        segmentation_mask_url: Some("/m/1.png".to_string()),
        annotated_image_url: Some("/a/1.png".to_string()),
    }
}

/// Select a file and finish its preview read.
fn with_file(state: AppState, name: &str) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::FilePicked(scan(name)));
    let epoch = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ReadPreview { epoch, .. } => Some(*epoch),
            _ => None,
        })
        .expect("preview effect");
    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            epoch,
            data_url: "data:image/png;base64,AAAA".to_string(),
        },
    );
    (state, epoch)
}

#[test]
fn submit_without_file_fails_locally() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);
    // Validation never reaches the network.
    assert!(effects.is_empty());
    assert_eq!(
        state.view().submission,
        SubmissionState::Failed(VALIDATION_NO_FILE.to_string())
    );
}

#[test]
fn file_selection_runs_preview_then_settles() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::FilePicked(scan("scan.png")));
    assert_eq!(state.view().submission, SubmissionState::Previewing);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ReadPreview { epoch: 1, .. }]
    ));

    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            epoch: 1,
            data_url: "data:image/png;base64,AAAA".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::FileSelected);
    assert_eq!(view.preview.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(view.selected_file.as_deref(), Some("scan.png"));
}

#[test]
fn drop_and_picker_ingestion_are_equivalent() {
    init_logging();
    let (picked, picked_effects) = update(AppState::new(), Msg::FilePicked(scan("scan.png")));
    let (dropped, dropped_effects) = update(AppState::new(), Msg::FileDropped(scan("scan.png")));
    assert_eq!(picked.view(), dropped.view());
    assert_eq!(picked_effects, dropped_effects);
}

#[test]
fn preview_failure_keeps_selection_submittable() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(scan("scan.png")));
    let (state, _) = update(state, Msg::PreviewFailed { epoch: 1 });

    let view = state.view();
    assert_eq!(view.submission, SubmissionState::FileSelected);
    assert_eq!(view.preview, None);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(state.view().submission, SubmissionState::Submitting);
    assert_eq!(effects.len(), 1);
}

#[test]
fn stale_preview_for_replaced_file_is_discarded() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(scan("first.png")));
    let (state, _) = update(state, Msg::FilePicked(scan("second.png")));

    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            epoch: 1,
            data_url: "data:image/png;base64,FIRST".to_string(),
        },
    );
    assert_eq!(state.view().preview, None);
    assert_eq!(state.view().selected_file.as_deref(), Some("second.png"));
}

#[test]
fn submit_captures_file_and_task() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::TaskChanged(TaskKind::Segmentation));

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            submission_id: 1,
            file: scan("scan.png"),
            task: TaskKind::Segmentation,
        }]
    );

    // Changing the selector mid-flight does not affect the captured kind;
    // the completion still applies to this submission.
    let (state, _) = update(state, Msg::TaskChanged(TaskKind::Classification));
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Ok(AnalysisOutcome::Segmentation {
                image: vec![0x89, 0x50],
            }),
        },
    );
    assert!(matches!(
        state.view().submission,
        SubmissionState::Succeeded(AnalysisOutcome::Segmentation { .. })
    ));
}

#[test]
fn second_submit_while_submitting_is_rejected_locally() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);
    assert_eq!(state.view().submission, SubmissionState::Submitting);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().submission, SubmissionState::Submitting);
}

#[test]
fn failed_submission_carries_message_and_allows_resubmit() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Err("Server error: Internal Server Error".to_string()),
        },
    );
    assert_eq!(
        state.view().submission,
        SubmissionState::Failed("Server error: Internal Server Error".to_string())
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(state.view().submission, SubmissionState::Submitting);
    assert!(matches!(
        effects.as_slice(),
        [Effect::SubmitAnalysis {
            submission_id: 2,
            ..
        }]
    ));
}

#[test]
fn completion_for_abandoned_submission_is_discarded() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);

    // Choosing a new file abandons the in-flight submission.
    let (state, _) = update(state, Msg::FilePicked(scan("other.png")));
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Ok(AnalysisOutcome::Classification(malignant_result())),
        },
    );
    assert_eq!(state.view().submission, SubmissionState::Previewing);
    assert_eq!(state.view().selected_file.as_deref(), Some("other.png"));
}

#[test]
fn task_change_resets_outcome_but_not_file() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Ok(AnalysisOutcome::Classification(malignant_result())),
        },
    );
    assert!(matches!(
        state.view().submission,
        SubmissionState::Succeeded(_)
    ));

    let (state, _) = update(state, Msg::TaskChanged(TaskKind::Segmentation));
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::FileSelected);
    assert_eq!(view.selected_file.as_deref(), Some("scan.png"));
    assert_eq!(view.task, TaskKind::Segmentation);
}

#[test]
fn new_file_after_success_clears_result() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Ok(AnalysisOutcome::Classification(malignant_result())),
        },
    );

    let (state, _) = update(state, Msg::FilePicked(scan("next.png")));
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Previewing);
    assert_eq!(view.selected_file.as_deref(), Some("next.png"));
}

#[test]
fn submit_from_success_without_new_action_is_inert() {
    init_logging();
    let (state, _) = with_file(AppState::new(), "scan.png");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmitFinished {
            submission_id: 1,
            outcome: Ok(AnalysisOutcome::Classification(malignant_result())),
        },
    );

    let before = state.view();
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().submission, before.submission);
}
