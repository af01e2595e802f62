use std::sync::Once;

use mediscan_core::{update, AppState, Effect, Msg, Session, SignUpForm, UserProfile};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn doctor() -> UserProfile {
    UserProfile {
        name: "Dana Osei".to_string(),
        email: "dana@example.com".to_string(),
        specialization: "Radiology".to_string(),
    }
}

fn sign_in(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SignInSubmitted {
            email: "dana@example.com".to_string(),
            password: "hunter2".to_string(),
        },
    )
}

#[test]
fn bootstrap_probe_fires_exactly_once() {
    init_logging();
    let state = AppState::new();
    assert_eq!(*state.session(), Session::Unknown);

    let (state, effects) = update(state, Msg::AppStarted);
    assert_eq!(effects, vec![Effect::RefreshSession]);

    // A second start while the probe is pending is inert.
    let (_state, effects) = update(state, Msg::AppStarted);
    assert!(effects.is_empty());
}

#[test]
fn resolved_session_is_not_reprobed() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(state, Msg::SessionResolved { user: None });
    assert_eq!(*state.session(), Session::Anonymous);

    let (_state, effects) = update(state, Msg::AppStarted);
    assert!(effects.is_empty());
}

#[test]
fn failed_probe_resolves_anonymous() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (mut state, _) = update(state, Msg::SessionResolved { user: None });
    assert_eq!(*state.session(), Session::Anonymous);
    assert!(state.consume_dirty());
}

#[test]
fn successful_probe_authenticates() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );
    assert_eq!(*state.session(), Session::Authenticated(doctor()));
}

#[test]
fn repeated_resolution_is_idempotent() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );
    let first = state.session().clone();
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );
    assert_eq!(*state.session(), first);
}

#[test]
fn sign_in_emits_effect_and_clears_notice() {
    init_logging();
    let (state, effects) = sign_in(AppState::new());
    assert_eq!(
        effects,
        vec![Effect::SignIn {
            email: "dana@example.com".to_string(),
            password: "hunter2".to_string(),
        }]
    );
    assert_eq!(state.view().auth_notice, None);
}

#[test]
fn second_sign_in_while_pending_is_ignored() {
    init_logging();
    let (state, _) = sign_in(AppState::new());
    let (_state, effects) = sign_in(state);
    assert!(effects.is_empty());
}

#[test]
fn sign_in_failure_surfaces_notice_and_keeps_session() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(state, Msg::SessionResolved { user: None });
    let (state, _) = sign_in(state);

    let (state, _) = update(
        state,
        Msg::SignInFinished {
            outcome: Err("Invalid password".to_string()),
        },
    );
    assert_eq!(*state.session(), Session::Anonymous);
    assert_eq!(state.view().auth_notice.as_deref(), Some("Invalid password"));
}

#[test]
fn sign_in_success_authenticates_via_resolution() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(state, Msg::SessionResolved { user: None });
    let (state, _) = sign_in(state);

    let (state, _) = update(state, Msg::SignInFinished { outcome: Ok(()) });
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );
    assert_eq!(*state.session(), Session::Authenticated(doctor()));
    assert_eq!(state.view().auth_notice, None);

    // A sign-in may re-enable once the first attempt finished.
    let (_state, effects) = sign_in(state);
    assert_eq!(effects.len(), 1);
}

#[test]
fn racing_resolutions_last_writer_wins() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = sign_in(state);

    // Sign-in refresh lands first, bootstrap probe lands second.
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );
    let (state, _) = update(state, Msg::SessionResolved { user: None });
    assert_eq!(*state.session(), Session::Anonymous);
}

#[test]
fn sign_out_clears_session() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, _) = update(
        state,
        Msg::SessionResolved {
            user: Some(doctor()),
        },
    );

    let (state, effects) = update(state, Msg::SignOutRequested);
    assert_eq!(effects, vec![Effect::SignOut]);

    let (state, _) = update(state, Msg::SignedOut);
    assert_eq!(*state.session(), Session::Anonymous);
}

#[test]
fn sign_up_reports_without_authenticating() {
    init_logging();
    let form = SignUpForm {
        first_name: "Dana".to_string(),
        last_name: "Osei".to_string(),
        email: "dana@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    let (state, effects) = update(
        AppState::new(),
        Msg::SignUpSubmitted { form: form.clone() },
    );
    assert_eq!(effects, vec![Effect::SignUp { form }]);

    let (state, _) = update(
        state,
        Msg::SignUpFinished {
            outcome: Ok("Account created. You can sign in now.".to_string()),
        },
    );
    assert_eq!(*state.session(), Session::Unknown);
    assert_eq!(
        state.view().auth_notice.as_deref(),
        Some("Account created. You can sign in now.")
    );
}
