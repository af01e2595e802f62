use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use mediscan_client::{AnalysisOutput, ClientEvent, ClientHandle, SignUpRequest};
use mediscan_core::{AnalysisOutcome, ClassificationResult, Effect, Msg, SignUpForm};

const SIGN_UP_OK_NOTICE: &str = "Account created. You can sign in now.";

/// Executes core effects against the background client and feeds client
/// events back into the update loop as messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { client };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RefreshSession => {
                    client_debug!("RefreshSession");
                    self.client.refresh_session();
                }
                Effect::SignIn { email, password } => {
                    client_info!("SignIn email={}", email);
                    self.client.sign_in(email, password);
                }
                Effect::SignUp { form } => {
                    client_info!("SignUp email={}", form.email);
                    self.client.sign_up(map_form(form));
                }
                Effect::SignOut => {
                    client_info!("SignOut");
                    self.client.sign_out();
                }
                Effect::ReadPreview { epoch, file } => {
                    self.client.read_preview(epoch, file.path);
                }
                Effect::SubmitAnalysis {
                    submission_id,
                    file,
                    task,
                } => {
                    client_info!(
                        "SubmitAnalysis id={} file={} task={:?}",
                        submission_id,
                        file.name,
                        task
                    );
                    self.client
                        .submit(submission_id, file.path, file.name, map_task(task));
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_task(task: mediscan_core::TaskKind) -> mediscan_client::TaskKind {
    match task {
        mediscan_core::TaskKind::Segmentation => mediscan_client::TaskKind::Segmentation,
        mediscan_core::TaskKind::Classification => mediscan_client::TaskKind::Classification,
    }
}

fn map_form(form: SignUpForm) -> SignUpRequest {
    SignUpRequest {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        password: form.password,
    }
}

fn map_profile(user: mediscan_client::UserProfile) -> mediscan_core::UserProfile {
    mediscan_core::UserProfile {
        name: user.name,
        email: user.email,
        specialization: user.specialization,
    }
}

fn map_prediction(prediction: mediscan_client::Prediction) -> mediscan_core::Prediction {
    match prediction {
        mediscan_client::Prediction::Malignant => mediscan_core::Prediction::Malignant,
        mediscan_client::Prediction::Benign => mediscan_core::Prediction::Benign,
        mediscan_client::Prediction::Unknown => mediscan_core::Prediction::Unknown,
    }
}

fn map_output(output: AnalysisOutput) -> AnalysisOutcome {
    match output {
        AnalysisOutput::Segmentation { image } => AnalysisOutcome::Segmentation { image },
        AnalysisOutput::Classification(record) => {
            AnalysisOutcome::Classification(ClassificationResult {
                prediction: map_prediction(record.prediction),
                probability: record.probability,
                segmentation_mask_url: record.segmentation_mask_url,
                annotated_image_url: record.annotated_image_url,
            })
        }
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::SessionResolved { user } => Msg::SessionResolved {
            user: user.map(map_profile),
        },
        ClientEvent::SignInFinished { outcome } => Msg::SignInFinished {
            outcome: outcome.map_err(|err| err.to_string()),
        },
        ClientEvent::SignUpFinished { outcome } => Msg::SignUpFinished {
            outcome: match outcome {
                Ok(()) => Ok(SIGN_UP_OK_NOTICE.to_string()),
                Err(err) => Err(err.to_string()),
            },
        },
        ClientEvent::SignedOut => Msg::SignedOut,
        ClientEvent::PreviewLoaded { epoch, data_url } => Msg::PreviewLoaded { epoch, data_url },
        ClientEvent::PreviewFailed { epoch, message } => {
            client_warn!("Preview read failed: {}", message);
            Msg::PreviewFailed { epoch }
        }
        ClientEvent::SubmitFinished {
            submission_id,
            result,
        } => Msg::SubmitFinished {
            submission_id,
            outcome: match result {
                Ok(output) => Ok(map_output(output)),
                Err(err) => {
                    client_warn!("Submission {} failed: {}", submission_id, err);
                    Err(err.to_string())
                }
            },
        },
    }
}
