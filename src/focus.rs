//! Three-strike focus-loss monitor.

use tracing::{debug, warn};

use crate::host::Notice;

/// Violations at which the interview is terminated.
pub const TERMINATION_THRESHOLD: u32 = 3;

/// Host document visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Inactive,
    Active { count: u32 },
    Terminated { count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    Warning,
    FinalWarning,
    Terminated,
}

impl FocusSignal {
    pub fn notice(self) -> Notice {
        match self {
            Self::Warning => Notice::destructive(
                "Warning",
                "Tab switching detected. Please stay focused on the interview.",
            ),
            Self::FinalWarning => Notice::destructive(
                "Final Warning",
                "One more tab switch will terminate the interview.",
            ),
            Self::Terminated => Notice::destructive(
                "Interview Terminated",
                "Interview cancelled due to multiple tab switches.",
            ),
        }
    }
}

/// Result of one focus-loss event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTransition {
    pub state: FocusState,
    pub signal: Option<FocusSignal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusMonitor {
    state: FocusState,
}

impl Default for FocusMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusMonitor {
    pub fn new() -> Self {
        Self {
            state: FocusState::Inactive,
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FocusState::Active { .. })
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, FocusState::Terminated { .. })
    }

    /// Violations counted in the current session.
    pub fn count(&self) -> u32 {
        match self.state {
            FocusState::Inactive => 0,
            FocusState::Active { count } | FocusState::Terminated { count } => count,
        }
    }

    /// Enters `Active` with a zero count.
    pub fn start(&mut self) {
        self.state = FocusState::Active { count: 0 };
        debug!("focus monitor started");
    }

    /// Leaves `Active` without recording anything. `Terminated` stays terminated.
    pub fn stop(&mut self) {
        if self.is_active() {
            self.state = FocusState::Inactive;
            debug!("focus monitor stopped");
        }
    }

    /// Counts one violation while `Active`; ignored in every other state.
    pub fn on_focus_lost(&mut self) -> FocusTransition {
        let FocusState::Active { count } = self.state else {
            return FocusTransition {
                state: self.state,
                signal: None,
            };
        };

        let count = count.saturating_add(1);
        let signal = match count {
            1 => FocusSignal::Warning,
            2 => FocusSignal::FinalWarning,
            _ => FocusSignal::Terminated,
        };
        self.state = if signal == FocusSignal::Terminated {
            FocusState::Terminated { count }
        } else {
            FocusState::Active { count }
        };
        warn!(count, ?signal, "focus lost during interview");

        FocusTransition {
            state: self.state,
            signal: Some(signal),
        }
    }

    pub fn on_visibility_change(&mut self, visibility: Visibility) -> FocusTransition {
        match visibility {
            Visibility::Hidden => self.on_focus_lost(),
            Visibility::Visible => FocusTransition {
                state: self.state,
                signal: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_monitor_ignores_focus_loss() {
        let mut monitor = FocusMonitor::new();
        let transition = monitor.on_focus_lost();
        assert_eq!(transition.signal, None);
        assert_eq!(monitor.state(), FocusState::Inactive);
    }

    #[test]
    fn start_resets_count() {
        let mut monitor = FocusMonitor::new();
        monitor.start();
        monitor.on_focus_lost();
        monitor.stop();
        monitor.start();
        assert_eq!(monitor.state(), FocusState::Active { count: 0 });
    }

    #[test]
    fn stop_does_not_revive_terminated_monitor() {
        let mut monitor = FocusMonitor::new();
        monitor.start();
        for _ in 0..TERMINATION_THRESHOLD {
            monitor.on_focus_lost();
        }
        monitor.stop();
        assert!(monitor.is_terminated());
    }

    #[test]
    fn visible_transition_never_counts() {
        let mut monitor = FocusMonitor::new();
        monitor.start();
        monitor.on_visibility_change(Visibility::Visible);
        assert_eq!(monitor.count(), 0);
    }

    #[test]
    fn signal_notices_match_copy() {
        assert_eq!(FocusSignal::Warning.notice().title, "Warning");
        assert_eq!(
            FocusSignal::Terminated.notice().body,
            "Interview cancelled due to multiple tab switches."
        );
    }
}
