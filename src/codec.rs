// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Base64 transcoding for diagram payloads and data URLs.
//!
//! Decoding is lenient: characters outside the base64 alphabet are dropped and input that still
//! cannot be decoded yields an empty byte vector instead of an error. The embedded editor and
//! the browser hand us data URLs with stray whitespace and padding, and a diagram that fails to
//! decode is treated as empty rather than aborting the session.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

fn is_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Decodes base64 text into bytes.
///
/// Up to two trailing `=` are trimmed, then every non-alphabet character is stripped. Empty or
/// undecodable input returns an empty vector.
pub fn decode_to_bytes(input: &str) -> Vec<u8> {
    let trimmed = input.strip_suffix('=').unwrap_or(input);
    let trimmed = trimmed.strip_suffix('=').unwrap_or(trimmed);

    let filtered: String = trimmed.chars().filter(|c| is_alphabet(*c)).collect();
    if filtered.is_empty() {
        return Vec::new();
    }

    LENIENT.decode(filtered.as_bytes()).unwrap_or_default()
}

pub fn encode_from_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_bytes_to_utf8_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Returns the base64 part of a `data:<mime>;base64,<payload>` URL.
///
/// Input that is not a data URL is returned unchanged.
pub fn data_url_payload(raw: &str) -> &str {
    if !raw.starts_with("data:") {
        return raw;
    }
    match raw.split_once(',') {
        Some((_, payload)) => payload,
        None => raw,
    }
}

pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", encode_from_bytes(bytes))
}

/// Turns the obfuscated API key hash handed to the page into the key itself.
///
/// The hash is the base64 encoding of the key, reversed.
pub fn decode_credential(hash: &str) -> String {
    let reversed: String = hash.chars().rev().collect();
    decode_bytes_to_utf8_text(&decode_to_bytes(&reversed)).replace('\0', "")
}
