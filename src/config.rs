// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Explicit editor configuration.
//!
//! Everything a session needs from its surroundings (editor location, UI theme, locale, the
//! store credential and per-store feature flags) is carried in one [`EditorConfig`] value that
//! is handed to the session and the orchestrator. `Default` is only meant for bootstrapping.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec;

const DEFAULT_DRAWIO_URL: &str = "https://embed.diagrams.net";
const DEFAULT_REDMINE_URL: &str = "http://localhost:3000/";
const LOADER_IMAGE_PATH: &str = "/images/ajax-loader.gif";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base URL of the embedded editor; may already carry a query string.
    pub drawio_url: String,
    /// Base URL of the document store, e.g. `https://host/redmine/`.
    pub redmine_url: String,
    /// Editor theme passed as `ui=`.
    pub ui: String,
    /// Editor locale passed as `lang=`.
    pub lang: String,
    /// Reversed base64 of the store API key.
    pub hash_code: Option<String>,
    /// Add an issue note when a journal references the diagram. Stores that version
    /// attachments on their own (Easy Redmine) turn this off.
    pub journal_notes: bool,
    /// Spinner label the editor shows while exporting.
    pub updating_page_label: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drawio_url: DEFAULT_DRAWIO_URL.to_owned(),
            redmine_url: DEFAULT_REDMINE_URL.to_owned(),
            ui: "kennedy".to_owned(),
            lang: "en".to_owned(),
            hash_code: None,
            journal_notes: true,
            updating_page_label: "Updating page...".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.drawio_url.trim().is_empty() {
            return Err(ConfigError::Missing("drawio_url"));
        }
        if self.redmine_url.trim().is_empty() {
            return Err(ConfigError::Missing("redmine_url"));
        }
        Ok(())
    }

    /// The store base URL, always ending in `/`.
    pub fn redmine_base(&self) -> String {
        if self.redmine_url.ends_with('/') {
            self.redmine_url.clone()
        } else {
            format!("{}/", self.redmine_url)
        }
    }

    /// The decoded API key, if a hash is configured.
    pub fn credential(&self) -> Option<String> {
        self.hash_code
            .as_deref()
            .map(codec::decode_credential)
            .filter(|key| !key.is_empty())
    }

    /// Spinner image served next to the editor.
    pub fn loader_url(&self) -> String {
        let base = self
            .drawio_url
            .split_once('?')
            .map(|(base, _)| base)
            .unwrap_or(&self.drawio_url);
        format!("{}{LOADER_IMAGE_PATH}", base.trim_end_matches('/'))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config value `{0}` must not be empty")]
    Missing(&'static str),
}
