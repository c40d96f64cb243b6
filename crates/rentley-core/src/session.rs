// ── Session / identity store ──
//
// Process-wide holder for the authenticated principal. Single-writer
// (login/logout/restore), many-reader (every gated view and header).
// The whole principal is replaced atomically -- readers can never
// observe a half-updated value -- and changes are pushed through a
// `watch` channel rather than polled.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::watch;

use crate::model::{Principal, Role};

/// Reactive store for the current [`Principal`].
pub struct SessionStore {
    principal: ArcSwapOption<Principal>,
    /// Bumped on every replace so subscribers can re-read.
    changed: watch::Sender<u64>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            principal: ArcSwapOption::empty(),
            changed,
        }
    }

    /// The current principal, if authenticated.
    pub fn current(&self) -> Option<Arc<Principal>> {
        self.principal.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.load().is_some()
    }

    /// Replace the principal wholesale (login or session restore).
    pub fn replace(&self, principal: Principal) {
        self.principal.store(Some(Arc::new(principal)));
        self.notify();
    }

    /// Drop the principal (logout or credential invalidation).
    pub fn clear(&self) {
        self.principal.store(None);
        self.notify();
    }

    /// The current principal's canonical role, if any.
    pub fn role(&self) -> Option<Role> {
        self.current().and_then(|p| p.canonical_role())
    }

    /// Subscribe to session changes. The value is a change counter;
    /// read the principal through [`current`](Self::current) on wake.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    fn notify(&self) {
        self.changed.send_modify(|v| *v += 1);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
