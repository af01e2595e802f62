use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use client_logging::client_error;

use crate::auth::{AuthApi, SignUpRequest};
use crate::history::HistoryStore;
use crate::http::{ApiClient, ClientSettings};
use crate::preview::preview_data_url;
use crate::process::ProcessApi;
use crate::store::KeyValueStore;
use crate::types::{ApiError, ApiFailure, ClientEvent, SubmissionId, TaskKind};

enum ClientCommand {
    RefreshSession,
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        form: SignUpRequest,
    },
    SignOut,
    ReadPreview {
        epoch: u64,
        path: PathBuf,
    },
    Submit {
        submission_id: SubmissionId,
        path: PathBuf,
        file_name: String,
        task: TaskKind,
    },
}

/// Handle to the background client: commands in, events out.
///
/// A dedicated thread owns the tokio runtime; each command runs as its own
/// task, so completions interleave in whatever order the network decides.
/// Clones share the same command and event channels.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(
        settings: ClientSettings,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let api = Arc::new(ApiClient::new(settings, store.clone())?);
        let auth = Arc::new(AuthApi::new(api.clone()));
        let process = Arc::new(ProcessApi::new(api, HistoryStore::new(store)));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("Failed to start client runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let auth = auth.clone();
                let process = process.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(auth.as_ref(), process.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn refresh_session(&self) {
        let _ = self.cmd_tx.send(ClientCommand::RefreshSession);
    }

    pub fn sign_in(&self, email: impl Into<String>, password: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::SignIn {
            email: email.into(),
            password: password.into(),
        });
    }

    pub fn sign_up(&self, form: SignUpRequest) {
        let _ = self.cmd_tx.send(ClientCommand::SignUp { form });
    }

    pub fn sign_out(&self) {
        let _ = self.cmd_tx.send(ClientCommand::SignOut);
    }

    pub fn read_preview(&self, epoch: u64, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(ClientCommand::ReadPreview {
            epoch,
            path: path.into(),
        });
    }

    pub fn submit(
        &self,
        submission_id: SubmissionId,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        task: TaskKind,
    ) {
        let _ = self.cmd_tx.send(ClientCommand::Submit {
            submission_id,
            path: path.into(),
            file_name: file_name.into(),
            task,
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    auth: &AuthApi,
    process: &ProcessApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::RefreshSession => {
            let user = auth.fetch_user().await;
            let _ = event_tx.send(ClientEvent::SessionResolved { user });
        }
        ClientCommand::SignIn { email, password } => match auth.sign_in(&email, &password).await {
            Ok(user) => {
                let _ = event_tx.send(ClientEvent::SignInFinished { outcome: Ok(()) });
                let _ = event_tx.send(ClientEvent::SessionResolved { user });
            }
            Err(err) => {
                let _ = event_tx.send(ClientEvent::SignInFinished { outcome: Err(err) });
            }
        },
        ClientCommand::SignUp { form } => {
            let outcome = auth.sign_up(&form).await;
            let _ = event_tx.send(ClientEvent::SignUpFinished { outcome });
        }
        ClientCommand::SignOut => {
            auth.sign_out().await;
            let _ = event_tx.send(ClientEvent::SignedOut);
        }
        ClientCommand::ReadPreview { epoch, path } => match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let _ = event_tx.send(ClientEvent::PreviewLoaded {
                    epoch,
                    data_url: preview_data_url(&bytes),
                });
            }
            Err(err) => {
                let _ = event_tx.send(ClientEvent::PreviewFailed {
                    epoch,
                    message: err.to_string(),
                });
            }
        },
        ClientCommand::Submit {
            submission_id,
            path,
            file_name,
            task,
        } => {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => process.analyze(&file_name, bytes, task).await,
                Err(err) => Err(ApiError::new(
                    ApiFailure::Network,
                    format!("could not read {}: {}", path.display(), err),
                )),
            };
            let _ = event_tx.send(ClientEvent::SubmitFinished {
                submission_id,
                result,
            });
        }
    }
}
