// SPDX-License-Identifier: MPL-2.0

//! Panel and playback configuration for `matrix-frames`.
//!
//! Configuration may be loaded from a RON file and is then overridden by
//! whatever the command line passes explicitly. Every field has a default so a
//! partial config file is valid.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::{
    io,
    path::{Path, PathBuf},
};

/// Hardware description of the connected LED panel chain.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Setters)]
#[serde(default, deny_unknown_fields)]
#[must_use]
pub struct PanelConfig {
    /// rows per panel
    pub rows: u32,
    /// columns per panel
    pub cols: u32,
    /// daisy-chained panels per chain
    pub chain_length: u32,
    /// parallel chains
    pub parallel: u32,
    /// brightness in percent, 1-100
    pub brightness: u8,
    /// name of the GPIO wiring, e.g. "regular" or "adafruit-hat"
    pub hardware_mapping: String,
    /// whether the driver drops root privileges after GPIO init
    pub drop_privileges: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 32,
            chain_length: 1,
            parallel: 1,
            brightness: 80,
            hardware_mapping: String::from("regular"),
            drop_privileges: true,
        }
    }
}

impl PanelConfig {
    /// Pixel dimensions of the full display surface spanned by all panels.
    #[must_use]
    pub fn display_size(&self) -> (u32, u32) {
        (self.cols * self.chain_length, self.rows * self.parallel)
    }
}

/// Top-level configuration: where the frames live and how they are paced.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Setters)]
#[serde(default, deny_unknown_fields)]
#[must_use]
pub struct Config {
    /// directory holding the frame images
    pub frames: PathBuf,
    /// fixed per-frame pacing budget in milliseconds
    pub frame_interval_ms: u64,
    /// the connected panel chain
    #[setters(skip)]
    pub panel: PanelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames: PathBuf::from("frames"),
            frame_interval_ms: 33,
            panel: PanelConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a RON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&raw)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
