use mediscan_core::{
    guest_route, protected_route, GuardDecision, Route, Session, UserProfile,
};

fn doctor() -> UserProfile {
    UserProfile {
        name: "Dana Osei".to_string(),
        email: "dana@example.com".to_string(),
        specialization: "Radiology".to_string(),
    }
}

#[test]
fn both_guards_hold_while_session_is_unknown() {
    assert_eq!(protected_route(&Session::Unknown), GuardDecision::Pending);
    assert_eq!(guest_route(&Session::Unknown), GuardDecision::Pending);
}

#[test]
fn anonymous_session_redirects_protected_to_sign_in() {
    assert_eq!(
        protected_route(&Session::Anonymous),
        GuardDecision::Redirect(Route::SignIn)
    );
    assert_eq!(guest_route(&Session::Anonymous), GuardDecision::Render);
}

#[test]
fn authenticated_session_redirects_guest_to_workspace() {
    let session = Session::Authenticated(doctor());
    assert_eq!(protected_route(&session), GuardDecision::Render);
    assert_eq!(
        guest_route(&session),
        GuardDecision::Redirect(Route::Workspace)
    );
}

#[test]
fn guards_never_redirect_simultaneously() {
    for session in [
        Session::Unknown,
        Session::Anonymous,
        Session::Authenticated(doctor()),
    ] {
        let redirects = [protected_route(&session), guest_route(&session)]
            .into_iter()
            .filter(|decision| matches!(decision, GuardDecision::Redirect(_)))
            .count();
        assert!(redirects <= 1, "redirect ping-pong for {session:?}");
    }
}

#[test]
fn protected_view_waits_then_redirects_once_resolved() {
    // Boot: unresolved session shows the pending placeholder.
    let mut session = Session::Unknown;
    assert_eq!(protected_route(&session), GuardDecision::Pending);

    // Probe fails: the same view now redirects to sign-in.
    session = Session::Anonymous;
    assert_eq!(
        protected_route(&session),
        GuardDecision::Redirect(Route::SignIn)
    );
}
