//! # Session state
//!
//! Tracks whether a client is currently attached to a host endpoint, and the
//! module-name override that applies for the length of one attachment.
//!
//! ## States
//!
//! `Idle` (initial) → `Active` → `Idle`. Re-enterable, never nested.
//!
//! ## Invariants
//!
//! - `module_override` is only ever set while `Active`.
//! - `exit` always returns to `Idle` with no override, whatever state it
//!   finds.
//!
//! Scoped entry lives in [`crate::client::SessionGuard`]; this type is the
//! bare state machine it drives.

use d3rpc::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    Active { endpoint: Endpoint },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: State,
    module_override: Option<String>,
}

impl Session {
    /// A new, inert session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches to `endpoint`, optionally overriding the module name until
    /// the next [`Self::exit`].
    pub fn enter(&mut self, endpoint: Endpoint, module_override: Option<String>) {
        debug_assert!(!self.is_active(), "session entered while already active");
        self.state = State::Active { endpoint };
        self.module_override = module_override;
    }

    pub fn exit(&mut self) {
        self.state = State::Idle;
        self.module_override = None;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match &self.state {
            State::Active { endpoint } => Some(endpoint),
            State::Idle => None,
        }
    }

    pub fn module_override(&self) -> Option<&str> {
        self.module_override.as_deref()
    }

    /// The override if one is set, else `default`.
    pub fn module_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.module_override.as_deref().unwrap_or(default)
    }
}
