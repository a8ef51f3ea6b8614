//! Identifier validation and free-text clipping.
//!
//! Two distinct policies apply:
//! - Identifiers (usernames, address types) are rejected outright when
//!   they fall outside their charset or length bounds. Nothing is
//!   normalized or truncated.
//! - Profile free-text fields are clipped to their maximum byte length.
//!
//! Usernames: `[a-z0-9._-]`, 1-32 bytes, never `@`.
//! Address types: `[a-z0-9.-]`, 1-16 bytes (no underscore).

use soroban_sdk::{Bytes, Env};

/// Maximum username length in bytes.
pub const MAX_USERNAME_LENGTH: u32 = 32;

/// Maximum address type length in bytes.
pub const MAX_ADDRESS_TYPE_LENGTH: u32 = 16;

/// Separator between address type and username in a handle (`nft@alice`).
pub const HANDLE_SEPARATOR: u8 = b'@';

/// Validate a username.
///
/// # Rules
/// - Length: 1-32 bytes
/// - Charset: lowercase letters, digits, `.`, `_`, `-`
/// - Must not contain `@`
pub fn validate_username(username: &Bytes) -> bool {
    let len = username.len();
    if len == 0 || len > MAX_USERNAME_LENGTH {
        return false;
    }

    // `@` is reserved as the handle separator.
    if contains_separator(username) {
        return false;
    }

    username.iter().all(is_username_char)
}

/// Validate an address type (the `nft` in `nft@alice`).
///
/// # Rules
/// - Length: 1-16 bytes
/// - Charset: lowercase letters, digits, `.`, `-`
pub fn validate_address_type(address_type: &Bytes) -> bool {
    let len = address_type.len();
    if len == 0 || len > MAX_ADDRESS_TYPE_LENGTH {
        return false;
    }

    address_type.iter().all(is_address_type_char)
}

/// Clip a free-text field to at most `max` bytes.
///
/// A missing value becomes the empty string. The cut is moved back to
/// a UTF-8 character boundary so a clipped field is never split inside
/// a multi-byte sequence.
pub fn clip(env: &Env, value: Option<Bytes>, max: u32) -> Bytes {
    let value = match value {
        Some(v) => v,
        None => return Bytes::new(env),
    };

    if value.len() <= max {
        return value;
    }

    let mut cut = max;
    while cut > 0 && is_continuation(value.get(cut).unwrap_or(0)) {
        cut -= 1;
    }
    value.slice(0..cut)
}

/// Position of the first `@` in `bytes`, if any.
pub fn separator_index(bytes: &Bytes) -> Option<u32> {
    let mut index = 0u32;
    for b in bytes.iter() {
        if b == HANDLE_SEPARATOR {
            return Some(index);
        }
        index += 1;
    }
    None
}

fn contains_separator(bytes: &Bytes) -> bool {
    separator_index(bytes).is_some()
}

#[inline]
fn is_lowercase_letter(b: u8) -> bool {
    b.is_ascii_lowercase()
}

#[inline]
fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
fn is_username_char(b: u8) -> bool {
    is_lowercase_letter(b) || is_digit(b) || b == b'.' || b == b'_' || b == b'-'
}

#[inline]
fn is_address_type_char(b: u8) -> bool {
    is_lowercase_letter(b) || is_digit(b) || b == b'.' || b == b'-'
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0b1100_0000 == 0b1000_0000
}
