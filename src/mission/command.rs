//! Mission Command Classification
//!
//! Helpers for classifying MAVLink mission commands. NAV vs DO follows
//! ArduPilot's convention where command IDs <= MAV_CMD_NAV_LAST (95) are
//! NAV commands. [`CommandFamily`] further groups the NAV commands by how
//! the waypoint controller transitions between legs.

/// MAV_CMD_NAV_WAYPOINT: fly to a location, optionally pausing (param1 seconds).
pub const MAV_CMD_NAV_WAYPOINT: u16 = 16;

/// MAV_CMD_NAV_LOITER_UNLIM: fly to a location and loiter indefinitely.
pub const MAV_CMD_NAV_LOITER_UNLIM: u16 = 17;

/// MAV_CMD_NAV_LOITER_TIME: fly to a location and loiter for param1 seconds.
pub const MAV_CMD_NAV_LOITER_TIME: u16 = 19;

/// MAV_CMD_NAV_SPLINE_WAYPOINT: fly to a location along a spline curve.
pub const MAV_CMD_NAV_SPLINE_WAYPOINT: u16 = 82;

/// MAV_CMD_NAV_LAST: command IDs at or below this value are NAV commands.
pub const MAV_CMD_NAV_LAST: u16 = 95;

/// Classify a command as NAV (drives navigation) or DO (immediate action).
pub fn is_nav_command(command_id: u16) -> bool {
    command_id <= MAV_CMD_NAV_LAST
}

/// Leg transition family of a navigation command.
///
/// Waypoint legs end with the vehicle arriving (and possibly stopping or
/// loitering). Spline legs are curves shaped by the neighbouring commands and
/// carry entry speed state that cannot be patched once the leg has started.
/// Everything else, including a slot with no command, is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandFamily {
    /// NAV_WAYPOINT, NAV_LOITER_UNLIM, NAV_LOITER_TIME
    Waypoint,
    /// NAV_SPLINE_WAYPOINT
    Spline,
    /// Not a leg the waypoint controller can chain through
    Other,
}

impl CommandFamily {
    /// Classify a raw MAV_CMD id.
    pub const fn from_command_id(command_id: u16) -> Self {
        match command_id {
            MAV_CMD_NAV_WAYPOINT | MAV_CMD_NAV_LOITER_UNLIM | MAV_CMD_NAV_LOITER_TIME => {
                CommandFamily::Waypoint
            }
            MAV_CMD_NAV_SPLINE_WAYPOINT => CommandFamily::Spline,
            _ => CommandFamily::Other,
        }
    }

    /// True for waypoint and spline legs.
    pub const fn is_navigable(self) -> bool {
        !matches!(self, CommandFamily::Other)
    }
}
