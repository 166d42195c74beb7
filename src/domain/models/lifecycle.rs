//! Startup lifecycle model.
//!
//! A service walks the startup states in a fixed order before its serving loop
//! starts. Any state can fail, and a failed startup is never retried.

use std::fmt;

/// Position of a service in its startup sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartupState {
    /// Nothing has run yet
    #[default]
    NotStarted,
    /// Reading the config file and environment
    ConfigLoading,
    /// Store loaded and marked initialized
    ConfigValidated,
    /// Effective service name decided
    NameResolved,
    /// Name and registration timing applied to the framework
    FrameworkConfigured,
    /// User initialization callback is running
    UserInitRunning,
    /// Startup finished, service may serve
    Ready,
    /// Startup aborted; carries the error message
    Failed(String),
}

impl StartupState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::ConfigLoading => "config_loading",
            Self::ConfigValidated => "config_validated",
            Self::NameResolved => "name_resolved",
            Self::FrameworkConfigured => "framework_configured",
            Self::UserInitRunning => "user_init_running",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }

    /// Check if this state can move to `next`.
    ///
    /// The happy path is strictly linear. Every non-terminal state may fail.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if matches!(next, Self::Failed(_)) {
            return true;
        }
        matches!(
            (self, next),
            (Self::NotStarted, Self::ConfigLoading)
                | (Self::ConfigLoading, Self::ConfigValidated)
                | (Self::ConfigValidated, Self::NameResolved)
                | (Self::NameResolved, Self::FrameworkConfigured)
                | (Self::FrameworkConfigured, Self::UserInitRunning)
                | (Self::UserInitRunning, Self::Ready)
        )
    }

    /// Ready and Failed end the sequence.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for StartupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed({reason})"),
            other => f.write_str(other.as_str()),
        }
    }
}
