//! Parameter Storage Types
//!
//! Provides the parameter value types and the `ParameterStore` used to
//! configure mission change handling.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length (MAVLink param_id is 16 bytes)
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 16;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from PARAM_REQUEST_LIST
        const HIDDEN = 0b00000001;
        /// Parameter is read-only (cannot be modified by the GCS)
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Read the value as an integer; floats are truncated, bools are 0/1
    pub fn as_int(&self) -> i32 {
        match *self {
            ParamValue::Bool(v) => v as i32,
            ParamValue::Int(v) => v,
            ParamValue::Float(v) => v as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ParamEntry {
    value: ParamValue,
    flags: ParamFlags,
}

/// Parameter store for configuration management
///
/// Stores parameters as key-value pairs with flags. Registration is
/// idempotent, so every parameter block can register its defaults at boot
/// without clobbering values already loaded.
#[derive(Debug)]
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamEntry, MAX_PARAMS>,
    /// Dirty flag (needs save)
    dirty: bool,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = key(name).ok()?;
        self.parameters.get(&key).map(|entry| &entry.value)
    }

    /// Set parameter value
    ///
    /// Fails for unknown and read-only parameters. Marks the store dirty.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;
        let entry = self
            .parameters
            .get_mut(&key)
            .ok_or(ParameterError::InvalidConfig)?;

        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;
        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(
                key,
                ParamEntry {
                    value: default_value,
                    flags,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Check if parameter is hidden
    pub fn is_hidden(&self, name: &str) -> bool {
        key(name)
            .ok()
            .and_then(|key| self.parameters.get(&key))
            .is_some_and(|entry| entry.flags.contains(ParamFlags::HIDDEN))
    }

    /// Get all parameter names (excluding hidden parameters)
    pub fn iter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|(_, entry)| !entry.flags.contains(ParamFlags::HIDDEN))
            .map(|(name, _)| name.as_str())
    }

    /// Get parameter count (excluding hidden parameters)
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear dirty flag (called after a successful save)
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::new();
    key.push_str(name)
        .map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}
