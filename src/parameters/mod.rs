//! Parameter management
//!
//! A small in-memory parameter store and the parameter block for mission
//! change handling. Persistence and MAVLink PARAM_* handling live on the
//! firmware side.

pub mod error;
pub mod mission_change;
pub mod storage;

pub use error::ParameterError;
pub use mission_change::MissionChangeParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
