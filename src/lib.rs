#![cfg_attr(not(test), no_std)]

//! mission_change_detector - Mission edit handling for the waypoint controller
//!
//! Detects edits to the next few navigation commands of the active mission
//! and tells the waypoint controller whether it can carry on, splice in a
//! newly added waypoint, or must rebuild its path.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No heap, fixed-capacity `heapless` containers
//! - **Trait abstractions**: Mission storage and status reporting are injected
//! - **One call per cycle**: Bounded work, never blocks
//!
//! # Modules
//!
//! - [`mission`]: Command window differ, response classifier, mission storage
//! - [`parameters`]: Parameter store and mission change parameters
//! - [`status`]: Status text sink and queue
//! - [`logging`]: `log_*!` macros (defmt on target, println in tests)

pub mod logging;
pub mod mission;
pub mod parameters;
pub mod status;

pub use mission::{
    ChangeClassifier, ChangeDetector, ChangeResponse, CommandFamily, CommandSnapshot,
    MissionCommand, MissionSource, MissionStorage,
};
pub use parameters::MissionChangeParams;
pub use status::{Severity, StatusQueue, StatusSink};
