//! Authority checks.
//!
//! A profile has exactly one authority. It is checked by plain equality
//! against the stored field, with no roles or delegation. Transfer takes
//! effect immediately.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::records::ProfileRecord;
use crate::storage;
use crate::ProfileError;

/// Require that `caller` is the profile's authority and has signed.
pub fn require_authority(env: &Env, profile: &ProfileRecord, caller: &Address) {
    if profile.authority != *caller {
        panic_with_error!(env, ProfileError::NotAuthorized);
    }

    caller.require_auth();
}

/// Require that `caller` is the contract admin and has signed.
pub fn require_admin(env: &Env, caller: &Address) {
    let admin = storage::admin(env)
        .unwrap_or_else(|| panic_with_error!(env, ProfileError::NotInitialized));

    if *caller != admin {
        panic_with_error!(env, ProfileError::NotAuthorized);
    }

    caller.require_auth();
}
