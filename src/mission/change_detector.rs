//! Mission Change Detector
//!
//! Vehicle-agnostic differ for the upcoming NAV command window. Each poll
//! reads the window from the mission, compares it with the cached copy and
//! replaces the cache. Vehicle-specific code decides what a change means
//! (see [`super::change_response`]).

use super::snapshot::{CommandSnapshot, LOOKAHEAD_WINDOW};
use super::source::MissionSource;

/// Result of a poll that found a change.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowChange<const N: usize = LOOKAHEAD_WINDOW> {
    /// First slot that differs between the previous and current window
    pub first_changed: usize,
    /// Window as cached before this poll
    pub previous: CommandSnapshot<N>,
}

/// Caches the upcoming NAV command window and reports edits to it.
///
/// The window must hold at least the current, next and next-next commands.
#[derive(Debug)]
pub struct ChangeDetector<const N: usize = LOOKAHEAD_WINDOW> {
    cached: CommandSnapshot<N>,
    /// Mission revision when `cached` was read (None before the first read)
    revision: Option<u32>,
    /// Current NAV index when `cached` was read
    current_index: u16,
}

impl<const N: usize> ChangeDetector<N> {
    const WINDOW_CHECK: () = assert!(N >= LOOKAHEAD_WINDOW, "lookahead window too small");

    /// Create a detector with an empty cache.
    ///
    /// The first poll against a non-empty mission reports a change at slot 0.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WINDOW_CHECK;
        Self {
            cached: CommandSnapshot::new(),
            revision: None,
            current_index: 0,
        }
    }

    /// Window as of the last poll
    pub fn snapshot(&self) -> &CommandSnapshot<N> {
        &self.cached
    }

    /// Poll the mission for changes to the upcoming NAV commands.
    ///
    /// Returns the first changed slot and the replaced window, or None if the
    /// window is unchanged. The cache always ends up holding the window just
    /// read.
    pub fn check_for_change<M: MissionSource>(&mut self, mission: &M) -> Option<WindowChange<N>> {
        let revision = mission.revision();
        let current_index = mission.current_nav_index();

        // Untouched mission and same active command: the window is the same
        if self.revision == Some(revision) && self.current_index == current_index {
            return None;
        }

        let latest: CommandSnapshot<N> = mission.read_nav_window();
        let previous = core::mem::replace(&mut self.cached, latest);
        self.revision = Some(revision);
        self.current_index = current_index;

        let first_changed = previous.first_difference(&self.cached)?;
        crate::log_debug!(
            "Mission window changed at slot {} ({} -> {} cmds)",
            first_changed,
            previous.len(),
            self.cached.len()
        );

        Some(WindowChange {
            first_changed,
            previous,
        })
    }
}

impl<const N: usize> Default for ChangeDetector<N> {
    fn default() -> Self {
        Self::new()
    }
}
