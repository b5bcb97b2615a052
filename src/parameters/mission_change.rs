//! Mission Change Parameter Definitions
//!
//! # Parameters
//!
//! - `MIS_CHG_NOTIFY` - Report mission change decisions as status text (0=off, 1=on)
//! - `MIS_CHG_SEV` - MAV_SEVERITY used for those reports (0..7, default 2 = CRITICAL)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::status::Severity;

/// Status text enabled by default
const DEFAULT_NOTIFY: i32 = 1;

/// Default severity (MAV_SEVERITY_CRITICAL)
const DEFAULT_SEVERITY: i32 = 2;

/// Highest MAV_SEVERITY value (DEBUG)
const MAX_SEVERITY: i32 = 7;

/// Mission change handling parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionChangeParams {
    /// Emit a status line for every classified change
    pub notify: bool,
    /// Severity of emitted status lines
    pub severity: Severity,
}

impl Default for MissionChangeParams {
    fn default() -> Self {
        Self {
            notify: DEFAULT_NOTIFY != 0,
            severity: Severity::from_level(DEFAULT_SEVERITY as u8),
        }
    }
}

impl MissionChangeParams {
    /// Register mission change parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "MIS_CHG_NOTIFY",
            ParamValue::Int(DEFAULT_NOTIFY),
            ParamFlags::empty(),
        )?;
        store.register(
            "MIS_CHG_SEV",
            ParamValue::Int(DEFAULT_SEVERITY),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load mission change parameters from parameter store
    ///
    /// Missing parameters fall back to defaults; severity is clamped to 0..=7.
    pub fn from_store(store: &ParameterStore) -> Self {
        let notify = store
            .get("MIS_CHG_NOTIFY")
            .map_or(DEFAULT_NOTIFY, ParamValue::as_int)
            != 0;

        let severity = store
            .get("MIS_CHG_SEV")
            .map_or(DEFAULT_SEVERITY, ParamValue::as_int)
            .clamp(0, MAX_SEVERITY);

        Self {
            notify,
            severity: Severity::from_level(severity as u8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = MissionChangeParams::default();
        assert!(params.notify);
        assert_eq!(params.severity, Severity::Critical);
    }

    #[test]
    fn test_from_store_defaults() {
        let mut store = ParameterStore::new();
        MissionChangeParams::register_defaults(&mut store).unwrap();
        assert_eq!(
            MissionChangeParams::from_store(&store),
            MissionChangeParams::default()
        );
    }

    #[test]
    fn test_from_empty_store_uses_defaults() {
        let store = ParameterStore::new();
        assert_eq!(
            MissionChangeParams::from_store(&store),
            MissionChangeParams::default()
        );
    }

    #[test]
    fn test_from_store_custom() {
        let mut store = ParameterStore::new();
        MissionChangeParams::register_defaults(&mut store).unwrap();
        store.set("MIS_CHG_NOTIFY", ParamValue::Int(0)).unwrap();
        store.set("MIS_CHG_SEV", ParamValue::Float(6.0)).unwrap();

        let params = MissionChangeParams::from_store(&store);
        assert!(!params.notify);
        assert_eq!(params.severity, Severity::Info);
    }

    #[test]
    fn test_severity_clamped() {
        let mut store = ParameterStore::new();
        MissionChangeParams::register_defaults(&mut store).unwrap();

        store.set("MIS_CHG_SEV", ParamValue::Int(-3)).unwrap();
        assert_eq!(
            MissionChangeParams::from_store(&store).severity,
            Severity::Emergency
        );

        store.set("MIS_CHG_SEV", ParamValue::Int(42)).unwrap();
        assert_eq!(
            MissionChangeParams::from_store(&store).severity,
            Severity::Debug
        );
    }
}
