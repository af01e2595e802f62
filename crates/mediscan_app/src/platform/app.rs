use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::client_info;
use mediscan_client::{ClientHandle, ClientSettings, FileStore, HistoryStore, KeyValueStore};
use mediscan_core::{update, AppState, Msg, SelectedFile, SignUpForm, TaskKind};
use url::Url;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::render;

pub fn run_app() -> Result<(), String> {
    let config = AppConfig::from_env();
    client_info!(
        "Starting with api={} state_dir={:?}",
        config.api_base_url,
        config.state_dir
    );

    let origin = Url::parse(&config.api_base_url)
        .map_err(|err| format!("invalid {}: {err}", super::config::API_URL_VAR))?;
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&config.state_dir).map_err(|err| err.to_string())?,
    );
    let history = HistoryStore::new(store.clone());
    let settings = ClientSettings {
        base_url: config.api_base_url.clone(),
        ..ClientSettings::default()
    };
    let client = ClientHandle::new(settings, store).map_err(|err| err.to_string())?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(client, msg_tx.clone());
    let quit = Arc::new(AtomicBool::new(false));
    spawn_command_reader(msg_tx.clone(), quit.clone(), history, origin.clone());

    let mut state = AppState::new();
    let _ = msg_tx.send(Msg::AppStarted);
    render::print_help();

    while !quit.load(Ordering::Relaxed) {
        let Ok(msg) = msg_rx.recv() else { break };
        if dispatch(&mut state, msg, &runner) {
            render::render(&state.view(), &origin);
        }
    }

    client_info!("Shutting down");
    Ok(())
}

/// Runs one message through the update function, hands its effects to the
/// runner, and reports whether the view needs re-rendering.
fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) -> bool {
    let (mut next, effects) = update(std::mem::take(state), msg);
    runner.enqueue(effects);
    let was_dirty = next.consume_dirty();
    *state = next;
    was_dirty
}

fn spawn_command_reader(
    msg_tx: mpsc::Sender<Msg>,
    quit: Arc<AtomicBool>,
    history: HistoryStore,
    origin: Url,
) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(line.trim()) {
                Some(Command::Quit) => break,
                Some(Command::Help) => render::print_help(),
                Some(Command::History) => render::print_history(&history.read_all(), &origin),
                Some(Command::Msg(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                None => println!("Unrecognized command; type 'help' for the list."),
            }
        }
        quit.store(true, Ordering::Relaxed);
        // Wake the dispatch loop so it notices the flag.
        let _ = msg_tx.send(Msg::NoOp);
    });
}

enum Command {
    Msg(Msg),
    Help,
    History,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    match verb {
        "help" => Some(Command::Help),
        "history" => Some(Command::History),
        "quit" | "exit" => Some(Command::Quit),
        "signin" => {
            let email = parts.next()?.to_string();
            let password = parts.next()?.to_string();
            Some(Command::Msg(Msg::SignInSubmitted { email, password }))
        }
        "signup" => {
            let form = SignUpForm {
                first_name: parts.next()?.to_string(),
                last_name: parts.next()?.to_string(),
                email: parts.next()?.to_string(),
                password: parts.next()?.to_string(),
            };
            Some(Command::Msg(Msg::SignUpSubmitted { form }))
        }
        "signout" => Some(Command::Msg(Msg::SignOutRequested)),
        "file" => selected_file(parts.next()?).map(|file| Command::Msg(Msg::FilePicked(file))),
        "drop" => selected_file(parts.next()?).map(|file| Command::Msg(Msg::FileDropped(file))),
        "task" => match parts.next()? {
            "segmentation" => Some(Command::Msg(Msg::TaskChanged(TaskKind::Segmentation))),
            "classification" => Some(Command::Msg(Msg::TaskChanged(TaskKind::Classification))),
            _ => None,
        },
        "submit" => Some(Command::Msg(Msg::SubmitClicked)),
        _ => None,
    }
}

fn selected_file(raw: &str) -> Option<SelectedFile> {
    let path = PathBuf::from(raw);
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(SelectedFile { name, path })
}
