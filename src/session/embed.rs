// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::EditorConfig;

/// The editor URL with the embed-mode query appended.
///
/// `https=1` is only requested when the editor itself is served over HTTPS (or
/// protocol-relative); local installations commonly run on plain HTTP.
pub fn embed_url(config: &EditorConfig) -> String {
    let base = config.drawio_url.as_str();
    let lower = base.to_ascii_lowercase();
    let https = u8::from(lower.starts_with("https://") || lower.starts_with("//"));

    let options = [
        ("embed", "1"),
        ("ui", config.ui.as_str()),
        ("spin", "1"),
        ("modified", "unsavedChanges"),
        ("libraries", "1"),
        ("proto", "json"),
        ("lang", config.lang.as_str()),
    ]
    .iter()
    .map(|(key, value)| format!("{key}={value}"))
    .collect::<Vec<_>>()
    .join("&");

    let separator = match base.find('?') {
        Some(index) if index > 0 => '&',
        _ => '?',
    };
    format!("{base}{separator}{options}&https={https}")
}
