// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Render configuration

use crate::keyswitch::SwitchFamily;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory by [`RenderConfig::load`]
pub const CONFIG_FILE: &str = "spkb.toml";

/// Settings for rendering parts to OpenSCAD files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Global `$fn` written at the top of every file.
    ///
    /// Only shapes without their own `$fn` follow it. Every circular hole carries an explicit
    /// segment count matching its radius correction, so this never changes those.
    pub segments: u32,
    /// Directory that rendered parts are written to
    pub output_dir: PathBuf,
    /// Switch family used when a part is not given one explicitly
    pub switch: SwitchFamily,
    /// Whether to write a "generated by" comment header
    pub header: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            segments: 48,
            output_dir: PathBuf::from("out"),
            switch: SwitchFamily::Mx,
            header: true,
        }
    }
}

impl RenderConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: RenderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `spkb.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `SPKB_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(segments) = lookup("SPKB_SEGMENTS") {
            self.segments = segments
                .trim()
                .parse()
                .with_context(|| format!("Invalid SPKB_SEGMENTS: {:?}", segments))?;
        }

        if let Some(output_dir) = lookup("SPKB_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(switch) = lookup("SPKB_SWITCH") {
            self.switch = switch
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid SPKB_SWITCH")?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments < 3 {
            bail!("segments must be at least 3, got {}", self.segments);
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Where a part with the given name is written
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.scad", name))
    }
}
