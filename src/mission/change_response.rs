//! Mission Change Response
//!
//! Decides how the waypoint controller must react to an edit of the
//! upcoming NAV commands. The decision only looks at the window cached
//! before the edit, the window read after it, the first changed slot and
//! whether the controller already consumes the next command.
//!
//! # Rules
//!
//! - Current command changed: reset.
//! - Current command is not a waypoint or spline leg, or pauses: no action.
//!   The controller stops at the end of the leg and recomputes anyway.
//! - Next command appended after a lone waypoint: a waypoint can be added to
//!   the controller in place, a spline needs a reset.
//! - Waypoint then waypoint: a changed next command matters only once the
//!   controller is using it. Later changes are beyond its horizon.
//! - Waypoint then spline: reset.
//! - Spline then waypoint: reset if the next command changed.
//! - Spline then spline: reset unless the change is in the third command and
//!   the second one pauses or the third is not a leg.

use super::change_detector::ChangeDetector;
use super::command::CommandFamily;
use super::snapshot::{CommandSnapshot, LOOKAHEAD_WINDOW};
use super::source::MissionSource;
use crate::parameters::MissionChangeParams;
use crate::status::StatusSink;

/// Required controller reaction to a mission change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeResponse {
    /// Nothing to do
    None,
    /// Register the newly added next waypoint without touching the current leg
    AddNextWaypoint,
    /// Discard the path and recompute from the vehicle position
    ResetRequired,
}

/// Rule that produced a [`ChangeResponse`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeReason {
    /// The command the vehicle is heading to changed
    CurrentChanged,
    /// Current command is neither a waypoint nor a spline
    CurrentNotLeg,
    /// Current command pauses at its end
    CurrentPauses,
    /// Next command was neither a waypoint nor a spline
    NextNotLeg,
    /// Waypoint appended after a lone waypoint
    WaypointAdded,
    /// Spline appended after a lone waypoint
    SplineAdded,
    /// Non-leg command appended after a lone waypoint
    NonLegAdded,
    /// Next waypoint changed while the controller uses it
    NextWaypointInUse,
    /// Next waypoint changed before the controller uses it
    NextWaypointNotInUse,
    /// Change beyond the next waypoint
    BeyondHorizon,
    /// Spline following the current waypoint affected
    SplineAfterWaypoint,
    /// Waypoint following the current spline changed
    WaypointAfterSplineChanged,
    /// Waypoint following the current spline unchanged
    WaypointAfterSplineSame,
    /// Third command changed behind a pausing spline or a non-leg
    SplineChainStops,
    /// Spline chain affected
    SplineChainChanged,
}

impl ChangeReason {
    /// Response this rule requires
    pub const fn response(self) -> ChangeResponse {
        match self {
            ChangeReason::CurrentChanged
            | ChangeReason::SplineAdded
            | ChangeReason::NextWaypointInUse
            | ChangeReason::SplineAfterWaypoint
            | ChangeReason::WaypointAfterSplineChanged
            | ChangeReason::SplineChainChanged => ChangeResponse::ResetRequired,
            ChangeReason::WaypointAdded => ChangeResponse::AddNextWaypoint,
            ChangeReason::CurrentNotLeg
            | ChangeReason::CurrentPauses
            | ChangeReason::NextNotLeg
            | ChangeReason::NonLegAdded
            | ChangeReason::NextWaypointNotInUse
            | ChangeReason::BeyondHorizon
            | ChangeReason::WaypointAfterSplineSame
            | ChangeReason::SplineChainStops => ChangeResponse::None,
        }
    }

    /// Status text for the ground station (fits one STATUSTEXT)
    pub const fn text(self) -> &'static str {
        match self {
            ChangeReason::CurrentChanged => "Mission: current cmd changed, reset",
            ChangeReason::CurrentNotLeg => "Mission: current cmd not wp/spline",
            ChangeReason::CurrentPauses => "Mission: current cmd pauses",
            ChangeReason::NextNotLeg => "Mission: next cmd not wp/spline",
            ChangeReason::WaypointAdded => "Mission: next wp added",
            ChangeReason::SplineAdded => "Mission: next spline added, reset",
            ChangeReason::NonLegAdded => "Mission: added cmd not wp/spline",
            ChangeReason::NextWaypointInUse => "Mission: next wp changed in use, reset",
            ChangeReason::NextWaypointNotInUse => "Mission: next wp changed, not in use",
            ChangeReason::BeyondHorizon => "Mission: wp after next changed",
            ChangeReason::SplineAfterWaypoint => "Mission: spline after wp changed, reset",
            ChangeReason::WaypointAfterSplineChanged => "Mission: wp after spline changed, reset",
            ChangeReason::WaypointAfterSplineSame => "Mission: wp after spline same",
            ChangeReason::SplineChainStops => "Mission: spline chain stops first",
            ChangeReason::SplineChainChanged => "Mission: spline chain changed, reset",
        }
    }
}

/// Response plus the rule behind it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Required controller reaction
    pub response: ChangeResponse,
    /// Rule that matched
    pub reason: ChangeReason,
}

impl From<ChangeReason> for Verdict {
    fn from(reason: ChangeReason) -> Self {
        Self {
            response: reason.response(),
            reason,
        }
    }
}

/// Classify a change of the NAV command window.
///
/// # Arguments
///
/// * `previous` - Window cached before the change
/// * `current` - Window read after the change
/// * `first_changed` - First slot that differs
/// * `using_next_command` - Controller already consumes slot 1
pub fn classify<const N: usize>(
    previous: &CommandSnapshot<N>,
    current: &CommandSnapshot<N>,
    first_changed: usize,
    using_next_command: bool,
) -> Verdict {
    use CommandFamily::{Other, Spline, Waypoint};

    let cmd0 = previous.family(0);
    let cmd1 = previous.family(1);
    let cmd0_paused = previous.has_pause(0);
    let added = previous.len() == 1 && current.len() > 1;

    let reason = match (cmd0, cmd1, first_changed, added, using_next_command) {
        (_, _, 0, _, _) => ChangeReason::CurrentChanged,
        (Other, _, _, _, _) => ChangeReason::CurrentNotLeg,
        _ if cmd0_paused => ChangeReason::CurrentPauses,

        // Next command appended; what matters is the new command
        (Waypoint, _, _, true, _) => match current.family(1) {
            Waypoint => ChangeReason::WaypointAdded,
            Spline => ChangeReason::SplineAdded,
            Other => ChangeReason::NonLegAdded,
        },
        (_, Other, _, _, _) => ChangeReason::NextNotLeg,

        (Waypoint, Waypoint, 1, _, true) => ChangeReason::NextWaypointInUse,
        (Waypoint, Waypoint, 1, _, false) => ChangeReason::NextWaypointNotInUse,
        (Waypoint, Waypoint, _, _, _) => ChangeReason::BeyondHorizon,
        (Waypoint, Spline, _, _, _) => ChangeReason::SplineAfterWaypoint,

        (Spline, Waypoint, 1, _, _) => ChangeReason::WaypointAfterSplineChanged,
        (Spline, Waypoint, _, _, _) => ChangeReason::WaypointAfterSplineSame,
        (Spline, Spline, 2, _, _)
            if previous.has_pause(1) || !previous.family(2).is_navigable() =>
        {
            ChangeReason::SplineChainStops
        }
        (Spline, Spline, _, _, _) => ChangeReason::SplineChainChanged,
    };

    Verdict::from(reason)
}

/// Polls the mission for changes and classifies them for the waypoint
/// controller.
///
/// Call [`check_for_mission_change`](Self::check_for_mission_change) once
/// per control cycle while a mission is being flown.
#[derive(Debug)]
pub struct ChangeClassifier<const N: usize = LOOKAHEAD_WINDOW> {
    detector: ChangeDetector<N>,
    params: MissionChangeParams,
}

impl<const N: usize> ChangeClassifier<N> {
    /// Create a classifier with an empty window cache
    pub const fn new(params: MissionChangeParams) -> Self {
        Self {
            detector: ChangeDetector::new(),
            params,
        }
    }

    /// Active parameters
    pub fn params(&self) -> &MissionChangeParams {
        &self.params
    }

    /// Replace parameters (e.g. after a PARAM_SET)
    pub fn set_params(&mut self, params: MissionChangeParams) {
        self.params = params;
    }

    /// Window as of the last poll
    pub fn snapshot(&self) -> &CommandSnapshot<N> {
        self.detector.snapshot()
    }

    /// Check for changes to the mission and return the required response.
    ///
    /// # Arguments
    ///
    /// * `mission` - Mission to poll
    /// * `using_next_command` - Waypoint controller already uses the next NAV command
    /// * `status` - Receives one line describing the decision
    pub fn check_for_mission_change<M: MissionSource>(
        &mut self,
        mission: &M,
        using_next_command: bool,
        status: &mut dyn StatusSink,
    ) -> ChangeResponse {
        let Some(change) = self.detector.check_for_change(mission) else {
            return ChangeResponse::None;
        };

        let verdict = classify(
            &change.previous,
            self.detector.snapshot(),
            change.first_changed,
            using_next_command,
        );

        crate::log_info!(
            "Mission change at slot {}: {:?} ({:?})",
            change.first_changed,
            verdict.response,
            verdict.reason
        );

        if self.params.notify {
            status.send(self.params.severity, verdict.reason.text());
        }

        verdict.response
    }
}

impl<const N: usize> Default for ChangeClassifier<N> {
    fn default() -> Self {
        Self::new(MissionChangeParams::default())
    }
}
