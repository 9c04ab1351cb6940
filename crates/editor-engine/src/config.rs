//! Construction-time engine settings.
//!
//! [`EngineConfig`] collects the defaults an engine starts with. Every field can still be
//! changed later through messages; the config only decides the initial state.
//!
//! ```rust
//! use editor_engine::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "tab_width": 4, "eol_mode": "crlf" }"#).unwrap();
//! assert_eq!(config.tab_width, 4);
//! assert_eq!(config.undo_limit, 1000);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::delta::SC_MODEVENTMASKALL;
use crate::line_ending::EolMode;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The JSON could not be parsed.
    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
    /// Tab width must be at least one column.
    #[error("tab width must be greater than zero")]
    InvalidTabWidth,
    /// The undo limit must keep at least one group.
    #[error("undo limit must be greater than zero")]
    InvalidUndoLimit,
}

/// Initial engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Columns per tab stop.
    pub tab_width: usize,
    /// Line ending for new lines.
    pub eol_mode: EolMode,
    /// Record undo history.
    pub undo_collection: bool,
    /// Undo groups kept before the oldest are dropped.
    pub undo_limit: usize,
    /// Caret blink period in milliseconds; 0 disables blinking.
    pub caret_period: u32,
    /// Pointer rest time before a dwell notification, in milliseconds; 0 disables dwell.
    pub dwell_time: u32,
    /// `SCVS_*` flags.
    pub virtual_space_options: isize,
    /// Allow more than one selection.
    pub multiple_selection: bool,
    /// Typing goes to every selection.
    pub additional_selection_typing: bool,
    /// `SC_IDLESTYLING_*` mode.
    pub idle_styling: isize,
    /// `SC_AUTOMATICFOLD_*` flags.
    pub automatic_fold: isize,
    /// `SC_MOD_*` flags reported in modified notifications.
    pub mod_event_mask: u32,
    /// `SCFIND_*` flags used by target search.
    pub search_flags: isize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            eol_mode: EolMode::default(),
            undo_collection: true,
            undo_limit: 1000,
            caret_period: 500,
            dwell_time: 0,
            virtual_space_options: 0,
            multiple_selection: false,
            additional_selection_typing: false,
            idle_styling: 0,
            automatic_fold: 0,
            mod_event_mask: SC_MODEVENTMASKALL,
            search_flags: 0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tab_width == 0 {
            return Err(EngineError::InvalidTabWidth);
        }
        if self.undo_limit == 0 {
            return Err(EngineError::InvalidUndoLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rejects_zero_tab_width() {
        let err = EngineConfig::from_json(r#"{ "tab_width": 0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTabWidth));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json("{ tab_width: ").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            eol_mode: EolMode::Cr,
            multiple_selection: true,
            ..EngineConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
