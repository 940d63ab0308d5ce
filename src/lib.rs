// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drawsync: round-trip editing of draw.io diagrams embedded in Redmine wiki pages and issues.
//!
//! A diagram shown on a page is opened in the embedded editor ([`session`]), exported in the
//! representation the page uses ([`format`]), stored back as an attachment or in the external
//! document store ([`sync`], [`store`]) and the page's reference macro is kept pointing at the
//! stored file ([`patch`]).

pub mod codec;
pub mod config;
pub mod format;
pub mod model;
pub mod notice;
pub mod patch;
pub mod protocol;
pub mod session;
pub mod store;
pub mod sync;

pub use config::{ConfigError, EditorConfig};
