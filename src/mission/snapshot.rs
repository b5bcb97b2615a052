//! Command Window Snapshot
//!
//! A copy of the next few NAV commands, starting with the one the vehicle is
//! currently heading to.

use heapless::Vec;

use super::command::CommandFamily;
use super::MissionCommand;

/// Default lookahead: current, next and next-next commands
pub const LOOKAHEAD_WINDOW: usize = 3;

/// Ordered, fixed-capacity window of upcoming NAV commands.
///
/// Only the first [`len`](Self::len) slots exist. A short mission near its
/// end fills fewer than `N` slots.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSnapshot<const N: usize = LOOKAHEAD_WINDOW> {
    commands: Vec<MissionCommand, N>,
}

impl<const N: usize> Default for CommandSnapshot<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandSnapshot<N> {
    /// Create an empty snapshot
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Build a snapshot from a slice, keeping at most `N` commands
    pub fn from_commands(commands: &[MissionCommand]) -> Self {
        let mut snapshot = Self::new();
        for cmd in commands {
            if !snapshot.push(*cmd) {
                break;
            }
        }
        snapshot
    }

    /// Append a command. Returns false when the window is already full.
    pub fn push(&mut self, command: MissionCommand) -> bool {
        self.commands.push(command).is_ok()
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if no slot is populated
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Window capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Command at `index`, or None past the populated slots
    pub fn get(&self, index: usize) -> Option<&MissionCommand> {
        self.commands.get(index)
    }

    /// Family of the command at `index`; absent slots are `Other`
    pub fn family(&self, index: usize) -> CommandFamily {
        self.get(index)
            .map_or(CommandFamily::Other, MissionCommand::family)
    }

    /// True if the command at `index` exists and pauses
    pub fn has_pause(&self, index: usize) -> bool {
        self.get(index).is_some_and(MissionCommand::has_pause)
    }

    /// Populated slots as a slice
    pub fn commands(&self) -> &[MissionCommand] {
        &self.commands
    }

    /// First slot at which `other` differs from this snapshot.
    ///
    /// Slots are compared up to the shorter length. If they all match but the
    /// lengths differ, the change is at the first slot past the shorter one.
    pub fn first_difference(&self, other: &Self) -> Option<usize> {
        let shared = self.len().min(other.len());
        let mismatch = self
            .commands
            .iter()
            .zip(other.commands.iter())
            .position(|(a, b)| !a.same_content(b));

        match mismatch {
            Some(index) => Some(index),
            None if self.len() != other.len() => Some(shared),
            None => None,
        }
    }
}
