// ── Access control gate ──
//
// Decides whether the current principal may enter a protected view.
// A pure function of its inputs: callers re-evaluate on every entry
// (the principal can change within a session), and two calls with the
// same inputs always agree.

use crate::model::{Principal, Role};

/// Where to send a denied visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Anonymous visitor -- send to login.
    Login,
    /// Authenticated but not permitted -- send home.
    Home,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Admitted,
    Denied { redirect: Redirect },
}

impl AccessDecision {
    pub fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Evaluate the gate for a view.
///
/// - No principal: denied, redirect to login.
/// - `allowed` present and non-empty: the principal's canonical role
///   (structured reference preferred, plain string fallback, alias
///   table applied) must be a member; otherwise denied, redirect home.
///   An unresolvable role is treated as non-membership.
/// - No `allowed` set: any authenticated principal is admitted.
pub fn check_access(principal: Option<&Principal>, allowed: Option<&[Role]>) -> AccessDecision {
    let Some(principal) = principal else {
        return AccessDecision::Denied {
            redirect: Redirect::Login,
        };
    };

    match allowed {
        Some(roles) if !roles.is_empty() => match principal.canonical_role() {
            Some(role) if roles.contains(&role) => AccessDecision::Admitted,
            _ => AccessDecision::Denied {
                redirect: Redirect::Home,
            },
        },
        _ => AccessDecision::Admitted,
    }
}
