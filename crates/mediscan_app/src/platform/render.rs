use mediscan_client::{resolve_artifact_url, ClassificationRecord};
use mediscan_core::{
    guest_route, protected_route, AnalysisOutcome, AppViewModel, GuardDecision, Prediction, Route,
    SubmissionState, TaskKind,
};
use url::Url;

pub fn print_help() {
    println!("commands:");
    println!("  signin EMAIL PASSWORD");
    println!("  signup FIRST LAST EMAIL PASSWORD");
    println!("  signout");
    println!("  file PATH      choose an image through the picker");
    println!("  drop PATH      drop an image onto the drop zone");
    println!("  task segmentation|classification");
    println!("  submit");
    println!("  history");
    println!("  help | quit");
}

/// Renders the view model after a dirty update. The guard pair decides
/// which screen is visible, exactly like the routed views would.
pub fn render(view: &AppViewModel, origin: &Url) {
    match protected_route(&view.session) {
        GuardDecision::Pending => {
            println!("-- resolving session...");
        }
        GuardDecision::Redirect(Route::SignIn) => {
            if guest_route(&view.session) == GuardDecision::Render {
                println!("-- signed out; sign in to continue");
                if let Some(notice) = &view.auth_notice {
                    println!("   {notice}");
                }
            }
        }
        GuardDecision::Redirect(Route::Workspace) | GuardDecision::Render => {
            render_workspace(view, origin);
        }
    }
}

fn render_workspace(view: &AppViewModel, origin: &Url) {
    if let Some(user) = view.session.user() {
        println!("-- {} <{}>", user.name, user.email);
    }
    if let Some(notice) = &view.auth_notice {
        println!("   {notice}");
    }

    let task_label = task_label(view.task);
    let file_label = view.selected_file.as_deref().unwrap_or("none");
    let preview_label = if view.preview.is_some() {
        " (preview ready)"
    } else {
        ""
    };
    println!("   task: {task_label} | file: {file_label}{preview_label}");

    match &view.submission {
        SubmissionState::Idle => {}
        SubmissionState::FileSelected => println!("   ready to submit"),
        SubmissionState::Previewing => println!("   reading preview..."),
        SubmissionState::Submitting => println!("   processing..."),
        SubmissionState::Succeeded(outcome) => render_outcome(outcome, origin),
        SubmissionState::Failed(message) => println!("   error: {message}"),
    }
}

fn render_outcome(outcome: &AnalysisOutcome, origin: &Url) {
    match outcome {
        AnalysisOutcome::Segmentation { image } => {
            println!("   segmentation mask received ({} bytes)", image.len());
        }
        AnalysisOutcome::Classification(result) => {
            println!(
                "   prediction: {} ({:.1}% probability of malignancy)",
                prediction_label(result.prediction),
                result.probability
            );
            if let Some(path) = &result.segmentation_mask_url {
                if let Some(url) = resolve_artifact_url(origin, path) {
                    println!("   segmentation mask: {url}");
                }
            }
            if let Some(path) = &result.annotated_image_url {
                if let Some(url) = resolve_artifact_url(origin, path) {
                    println!("   annotated image: {url}");
                }
            }
        }
    }
}

/// Read-only listing over the stored history, oldest first.
pub fn print_history(entries: &[ClassificationRecord], origin: &Url) {
    if entries.is_empty() {
        println!("-- history is empty");
        return;
    }
    println!("-- history ({} entries):", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let prediction = match entry.prediction {
            mediscan_client::Prediction::Malignant => "Malignant",
            mediscan_client::Prediction::Benign => "Benign",
            mediscan_client::Prediction::Unknown => "N/A",
        };
        println!(
            "   {:>3}. {} ({:.1}%)",
            index + 1,
            prediction,
            entry.probability
        );
        if let Some(path) = &entry.annotated_image_url {
            if let Some(url) = resolve_artifact_url(origin, path) {
                println!("        annotated: {url}");
            }
        }
    }
}

fn task_label(task: TaskKind) -> &'static str {
    match task {
        TaskKind::Segmentation => "segmentation",
        TaskKind::Classification => "classification",
    }
}

fn prediction_label(prediction: Prediction) -> &'static str {
    match prediction {
        Prediction::Malignant => "Malignant",
        Prediction::Benign => "Benign",
        Prediction::Unknown => "N/A",
    }
}
