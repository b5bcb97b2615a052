//! Mission Read Interface
//!
//! The change detector never touches mission storage directly. It polls a
//! [`MissionSource`], which lets the firmware wrap its synchronized global
//! storage and lets tests hand in a plain [`MissionStorage`].

use super::command::is_nav_command;
use super::snapshot::CommandSnapshot;
use super::{MissionCommand, MissionStorage};

/// Read-only access to the active mission.
///
/// Implementations must change [`revision`](Self::revision) whenever the
/// command list is edited. The detector skips re-reading while both the
/// revision and the current index are unchanged.
pub trait MissionSource {
    /// Number of commands in the mission
    fn command_count(&self) -> u16;

    /// Command at `index`, or None if out of range
    fn get_command(&self, index: u16) -> Option<MissionCommand>;

    /// Index of the NAV command the vehicle is heading to
    fn current_nav_index(&self) -> u16;

    /// Edit counter
    fn revision(&self) -> u32;

    /// First NAV command at or after `start`, with its index.
    ///
    /// DO commands in between are skipped.
    fn next_nav_command(&self, start: u16) -> Option<(u16, MissionCommand)> {
        (start..self.command_count()).find_map(|index| {
            self.get_command(index)
                .filter(|cmd| is_nav_command(cmd.command))
                .map(|cmd| (index, cmd))
        })
    }

    /// Read up to `N` NAV commands starting at the current index.
    fn read_nav_window<const N: usize>(&self) -> CommandSnapshot<N> {
        let mut window = CommandSnapshot::new();
        let mut index = self.current_nav_index();
        while window.len() < N {
            let Some((found, cmd)) = self.next_nav_command(index) else {
                break;
            };
            window.push(cmd);
            index = found.saturating_add(1);
        }
        window
    }
}

impl MissionSource for MissionStorage {
    fn command_count(&self) -> u16 {
        self.count()
    }

    fn get_command(&self, index: u16) -> Option<MissionCommand> {
        MissionStorage::get_command(self, index).copied()
    }

    fn current_nav_index(&self) -> u16 {
        self.current_index()
    }

    fn revision(&self) -> u32 {
        MissionStorage::revision(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::command::MAV_CMD_NAV_WAYPOINT;

    const MAV_CMD_DO_CHANGE_SPEED: u16 = 178;

    fn wp(seq: u16) -> MissionCommand {
        MissionCommand::waypoint(seq, 370000000 + seq as i32, -1220000000, 10.0)
    }

    fn do_cmd(seq: u16) -> MissionCommand {
        MissionCommand {
            seq,
            command: MAV_CMD_DO_CHANGE_SPEED,
            param2: 2.0,
            ..MissionCommand::default()
        }
    }

    #[test]
    fn test_next_nav_command_skips_do() {
        let mut storage = MissionStorage::new();
        storage.add_command(do_cmd(0)).unwrap();
        storage.add_command(do_cmd(1)).unwrap();
        storage.add_command(wp(2)).unwrap();

        let (index, cmd) = storage.next_nav_command(0).unwrap();
        assert_eq!(index, 2);
        assert_eq!(cmd.command, MAV_CMD_NAV_WAYPOINT);
        assert!(storage.next_nav_command(3).is_none());
    }

    #[test]
    fn test_read_window_starts_at_current() {
        let mut storage = MissionStorage::new();
        for i in 0..5 {
            storage.add_command(wp(i)).unwrap();
        }
        storage.set_current_index(1).unwrap();

        let window: CommandSnapshot<3> = storage.read_nav_window();
        assert_eq!(window.len(), 3);
        let seqs: heapless::Vec<u16, 3> = window.commands().iter().map(|c| c.seq).collect();
        assert_eq!(seqs.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_read_window_near_end() {
        let mut storage = MissionStorage::new();
        storage.add_command(wp(0)).unwrap();
        storage.add_command(do_cmd(1)).unwrap();
        storage.add_command(wp(2)).unwrap();

        let window: CommandSnapshot<3> = storage.read_nav_window();
        assert_eq!(window.len(), 2);
        assert_eq!(window.get(1).unwrap().seq, 2);
    }

    #[test]
    fn test_read_window_empty_mission() {
        let storage = MissionStorage::new();
        let window: CommandSnapshot<3> = storage.read_nav_window();
        assert!(window.is_empty());
    }
}
