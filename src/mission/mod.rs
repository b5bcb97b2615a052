//! Mission Change Detection
//!
//! Watches the few navigation commands the waypoint controller is working
//! with and decides how it must react when a ground station or script edits
//! them mid-mission.
//!
//! # Layers
//!
//! - [`change_detector`]: vehicle-agnostic differ. Caches the upcoming NAV
//!   command window and reports the first slot that changed.
//! - [`change_response`]: rule table mapping a change to a
//!   [`ChangeResponse`] (no action, splice in the next waypoint, or reset).
//!
//! # Mission Storage
//!
//! [`MissionStorage`] is a fixed-size in-memory command list (max 50 items,
//! no persistence) in MAVLink MISSION_ITEM_INT layout. It implements
//! [`MissionSource`], the read interface the detector polls.

pub mod change_detector;
pub mod change_response;
pub mod command;
pub mod snapshot;
pub mod source;

use core::fmt;

use heapless::Vec;

pub use change_detector::{ChangeDetector, WindowChange};
pub use change_response::{classify, ChangeClassifier, ChangeReason, ChangeResponse, Verdict};
pub use command::{is_nav_command, CommandFamily, MAV_CMD_NAV_LAST};
pub use snapshot::{CommandSnapshot, LOOKAHEAD_WINDOW};
pub use source::MissionSource;

/// Maximum number of commands in a mission
pub const MAX_MISSION_COMMANDS: usize = 50;

/// Mission command
///
/// One item of the mission plan in MAVLink MISSION_ITEM_INT format with
/// scaled integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionCommand {
    /// Sequence number (0-indexed)
    pub seq: u16,
    /// Frame of reference (MAV_FRAME_GLOBAL_RELATIVE_ALT, etc.)
    pub frame: u8,
    /// Command ID (MAV_CMD_NAV_WAYPOINT, MAV_CMD_NAV_SPLINE_WAYPOINT, etc.)
    pub command: u16,
    /// PARAM1 (hold time for waypoints and loiters, pause when positive)
    pub param1: f32,
    /// PARAM2 (command-specific, e.g., acceptance radius)
    pub param2: f32,
    /// PARAM3 (command-specific, e.g., pass through waypoint)
    pub param3: f32,
    /// PARAM4 (command-specific, e.g., desired yaw angle)
    pub param4: f32,
    /// X coordinate (latitude in degrees * 1e7)
    pub x: i32,
    /// Y coordinate (longitude in degrees * 1e7)
    pub y: i32,
    /// Z coordinate (altitude in meters)
    pub z: f32,
}

impl Default for MissionCommand {
    fn default() -> Self {
        Self {
            seq: 0,
            frame: 0,
            command: 0,
            param1: 0.0,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            x: 0,
            y: 0,
            z: 0.0,
        }
    }
}

impl MissionCommand {
    /// Create a NAV_WAYPOINT at the given coordinates
    ///
    /// # Arguments
    ///
    /// * `seq` - Sequence number
    /// * `lat` - Latitude in degrees * 1e7
    /// * `lon` - Longitude in degrees * 1e7
    /// * `alt` - Altitude in meters
    pub fn waypoint(seq: u16, lat: i32, lon: i32, alt: f32) -> Self {
        Self::nav(seq, command::MAV_CMD_NAV_WAYPOINT, lat, lon, alt)
    }

    /// Create a NAV_SPLINE_WAYPOINT at the given coordinates
    pub fn spline(seq: u16, lat: i32, lon: i32, alt: f32) -> Self {
        Self::nav(seq, command::MAV_CMD_NAV_SPLINE_WAYPOINT, lat, lon, alt)
    }

    /// Create a NAV command of arbitrary id at the given coordinates
    pub fn nav(seq: u16, command: u16, lat: i32, lon: i32, alt: f32) -> Self {
        Self {
            seq,
            frame: 3, // MAV_FRAME_GLOBAL_RELATIVE_ALT
            command,
            x: lat,
            y: lon,
            z: alt,
            ..Self::default()
        }
    }

    /// Set the pause (param1) and return the command
    pub fn with_pause(mut self, seconds: f32) -> Self {
        self.param1 = seconds;
        self
    }

    /// Leg family of this command
    pub fn family(&self) -> CommandFamily {
        CommandFamily::from_command_id(self.command)
    }

    /// True if the vehicle stops at this command before continuing
    pub fn has_pause(&self) -> bool {
        self.param1 > 0.0
    }

    /// Compare everything the waypoint controller consumes.
    ///
    /// `seq` is ignored so that renumbering caused by an earlier insert or
    /// delete is not seen as an edit. Floats are compared bitwise.
    pub fn same_content(&self, other: &Self) -> bool {
        self.command == other.command
            && self.frame == other.frame
            && self.param1.to_bits() == other.param1.to_bits()
            && self.param2.to_bits() == other.param2.to_bits()
            && self.param3.to_bits() == other.param3.to_bits()
            && self.param4.to_bits() == other.param4.to_bits()
            && self.x == other.x
            && self.y == other.y
            && self.z.to_bits() == other.z.to_bits()
    }
}

/// Errors from mission storage edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MissionError {
    /// Mission already holds MAX_MISSION_COMMANDS items
    Full,
    /// Index is past the end of the mission
    IndexOutOfBounds,
}

impl fmt::Display for MissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionError::Full => write!(f, "mission full (max {} items)", MAX_MISSION_COMMANDS),
            MissionError::IndexOutOfBounds => write!(f, "mission index out of bounds"),
        }
    }
}

/// Mission storage
///
/// Stores mission commands in a fixed-size array. Every edit bumps
/// `revision`, which lets the change detector skip re-reading an untouched
/// mission.
#[derive(Debug, Clone)]
pub struct MissionStorage {
    commands: Vec<MissionCommand, MAX_MISSION_COMMANDS>,
    /// Index of the NAV command the vehicle is heading to
    current_index: u16,
    revision: u32,
}

impl Default for MissionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionStorage {
    /// Create a new empty mission storage (const fn for static initialization)
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            current_index: 0,
            revision: 0,
        }
    }

    /// Get number of commands
    pub fn count(&self) -> u16 {
        self.commands.len() as u16
    }

    /// Check if mission is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Edit counter, incremented on every mutation of the command list
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Clear all commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current_index = 0;
        self.touch();
    }

    /// Append a command to the mission
    pub fn add_command(&mut self, command: MissionCommand) -> Result<(), MissionError> {
        self.commands
            .push(command)
            .map_err(|_| MissionError::Full)?;
        self.touch();
        Ok(())
    }

    /// Get a command by index
    pub fn get_command(&self, index: u16) -> Option<&MissionCommand> {
        self.commands.get(index as usize)
    }

    /// Replace the command at `index`
    pub fn set_command(&mut self, index: u16, command: MissionCommand) -> Result<(), MissionError> {
        let slot = self
            .commands
            .get_mut(index as usize)
            .ok_or(MissionError::IndexOutOfBounds)?;
        *slot = command;
        self.touch();
        Ok(())
    }

    /// Insert a command before `index`, shifting later items back
    ///
    /// Items at and after `index` are renumbered. An insert at or before the
    /// current index keeps the vehicle heading to the same command.
    pub fn insert_command(
        &mut self,
        index: u16,
        command: MissionCommand,
    ) -> Result<(), MissionError> {
        if index > self.count() {
            return Err(MissionError::IndexOutOfBounds);
        }
        self.commands
            .insert(index as usize, command)
            .map_err(|_| MissionError::Full)?;
        if index <= self.current_index && self.commands.len() > 1 {
            self.current_index += 1;
        }
        self.renumber(index);
        self.touch();
        Ok(())
    }

    /// Remove the command at `index`, shifting later items forward
    pub fn remove_command(&mut self, index: u16) -> Result<MissionCommand, MissionError> {
        if index >= self.count() {
            return Err(MissionError::IndexOutOfBounds);
        }
        let removed = self.commands.remove(index as usize);
        if index < self.current_index {
            self.current_index -= 1;
        }
        if self.current_index >= self.count() {
            self.current_index = self.count().saturating_sub(1);
        }
        self.renumber(index);
        self.touch();
        Ok(removed)
    }

    /// Get current command index
    pub fn current_index(&self) -> u16 {
        self.current_index
    }

    /// Set current command index
    pub fn set_current_index(&mut self, index: u16) -> Result<(), MissionError> {
        if index < self.count() {
            self.current_index = index;
            Ok(())
        } else {
            Err(MissionError::IndexOutOfBounds)
        }
    }

    /// Get all commands as slice
    pub fn commands(&self) -> &[MissionCommand] {
        &self.commands
    }

    fn renumber(&mut self, from: u16) {
        for (i, cmd) in self.commands.iter_mut().enumerate().skip(from as usize) {
            cmd.seq = i as u16;
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(seq: u16) -> MissionCommand {
        MissionCommand::waypoint(seq, 370000000 + seq as i32 * 1000, -1220000000, 10.0)
    }

    #[test]
    fn test_command_constructors() {
        let cmd = MissionCommand::waypoint(0, 370000000, -1220000000, 100.0);
        assert_eq!(cmd.command, 16);
        assert_eq!(cmd.frame, 3);
        assert_eq!(cmd.family(), CommandFamily::Waypoint);
        assert!(!cmd.has_pause());

        let cmd = MissionCommand::spline(1, 0, 0, 0.0).with_pause(5.0);
        assert_eq!(cmd.family(), CommandFamily::Spline);
        assert!(cmd.has_pause());
    }

    #[test]
    fn test_negative_pause_is_not_a_pause() {
        let cmd = wp(0).with_pause(-1.0);
        assert!(!cmd.has_pause());
    }

    #[test]
    fn test_same_content_ignores_seq() {
        let a = wp(3);
        let mut b = a;
        b.seq = 7;
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_same_content_detects_location_and_pause() {
        let a = wp(0);
        let mut moved = a;
        moved.x += 1;
        assert!(!a.same_content(&moved));
        assert!(!a.same_content(&a.with_pause(2.0)));
    }

    #[test]
    fn test_same_content_nan_is_stable() {
        let a = wp(0).with_pause(f32::NAN);
        assert!(a.same_content(&a));
    }

    #[test]
    fn test_add_and_get() {
        let mut storage = MissionStorage::new();
        assert!(storage.is_empty());
        storage.add_command(wp(0)).unwrap();
        storage.add_command(wp(1)).unwrap();
        assert_eq!(storage.count(), 2);
        assert_eq!(storage.get_command(1).unwrap().seq, 1);
        assert!(storage.get_command(2).is_none());
    }

    #[test]
    fn test_mission_full() {
        let mut storage = MissionStorage::new();
        for i in 0..MAX_MISSION_COMMANDS {
            storage.add_command(wp(i as u16)).unwrap();
        }
        assert_eq!(storage.add_command(wp(0)), Err(MissionError::Full));
    }

    #[test]
    fn test_revision_bumps_on_every_edit() {
        let mut storage = MissionStorage::new();
        let r0 = storage.revision();
        storage.add_command(wp(0)).unwrap();
        let r1 = storage.revision();
        assert_ne!(r0, r1);

        storage.set_command(0, wp(5)).unwrap();
        let r2 = storage.revision();
        assert_ne!(r1, r2);

        // Failed edits leave the revision alone
        assert!(storage.set_command(9, wp(9)).is_err());
        assert_eq!(storage.revision(), r2);

        // Moving the current index is not an edit
        storage.add_command(wp(1)).unwrap();
        let r3 = storage.revision();
        storage.set_current_index(1).unwrap();
        assert_eq!(storage.revision(), r3);
    }

    #[test]
    fn test_insert_renumbers_and_keeps_current() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        storage.add_command(wp(1)).unwrap();
        storage.add_command(wp(2)).unwrap();
        storage.set_current_index(1).unwrap();

        storage.insert_command(0, wp(99)).unwrap();
        assert_eq!(storage.count(), 4);
        assert_eq!(storage.current_index(), 2);
        for (i, cmd) in storage.commands().iter().enumerate() {
            assert_eq!(cmd.seq, i as u16);
        }
    }

    #[test]
    fn test_insert_after_current() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        storage.add_command(wp(1)).unwrap();

        storage.insert_command(2, wp(2)).unwrap();
        assert_eq!(storage.current_index(), 0);
        assert!(storage.insert_command(9, wp(9)).is_err());
    }

    #[test]
    fn test_remove_command() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        storage.add_command(wp(1)).unwrap();
        storage.add_command(wp(2)).unwrap();
        storage.set_current_index(2).unwrap();

        let removed = storage.remove_command(0).unwrap();
        assert_eq!(removed.x, wp(0).x);
        assert_eq!(storage.current_index(), 1);
        assert_eq!(storage.get_command(0).unwrap().seq, 0);

        // Removing the last item pulls the current index back into range
        storage.remove_command(1).unwrap();
        assert_eq!(storage.current_index(), 0);
        assert_eq!(storage.remove_command(5), Err(MissionError::IndexOutOfBounds));
    }

    #[test]
    fn test_clear() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        storage.add_command(wp(1)).unwrap();
        storage.set_current_index(1).unwrap();
        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.current_index(), 0);
    }

    #[test]
    fn test_set_current_index_out_of_bounds() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        assert!(storage.set_current_index(0).is_ok());
        assert_eq!(
            storage.set_current_index(1),
            Err(MissionError::IndexOutOfBounds)
        );
    }
}
