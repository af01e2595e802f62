use crate::Session;

/// Navigation targets a guard can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Workspace,
}

/// Decision for a guarded view given the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not yet resolved: show a pending placeholder, no navigation.
    Pending,
    /// Navigate away, replacing the current history entry.
    Redirect(Route),
    /// Render the guarded children unmodified.
    Render,
}

/// Guard for views that require an authenticated session.
pub fn protected_route(session: &Session) -> GuardDecision {
    match session {
        Session::Unknown => GuardDecision::Pending,
        Session::Anonymous => GuardDecision::Redirect(Route::SignIn),
        Session::Authenticated(_) => GuardDecision::Render,
    }
}

/// Guard for guest-only views such as sign-in and sign-up.
///
/// Its redirect condition is the mirror of `protected_route`'s, so the two
/// can never both redirect for the same session value.
pub fn guest_route(session: &Session) -> GuardDecision {
    match session {
        Session::Unknown => GuardDecision::Pending,
        Session::Anonymous => GuardDecision::Render,
        Session::Authenticated(_) => GuardDecision::Redirect(Route::Workspace),
    }
}
