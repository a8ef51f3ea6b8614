//! Record layouts stored at derived addresses.

use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env};

use crate::fields::ProfileDetails;

/// Profile root record, stored at `["profile", username]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileRecord {
    /// Sole address allowed to mutate this profile and its mappings.
    pub authority: Address,

    /// Primary external identity (`wallet@username`). Independent of `authority`.
    pub main_address: Address,

    /// Nonce the profile address was derived with.
    pub bump: u32,

    /// Immutable, validated username.
    pub username: Bytes,

    pub bio: Bytes,
    pub avatar: Bytes,
    pub twitter: Bytes,
    pub discord: Bytes,
    pub website: Bytes,
}

impl ProfileRecord {
    /// Create a profile owned by `creator`, who is also its main address.
    pub fn new(
        env: &Env,
        creator: Address,
        bump: u32,
        username: Bytes,
        details: ProfileDetails,
    ) -> Self {
        let mut profile = Self {
            authority: creator.clone(),
            main_address: creator,
            bump,
            username,
            bio: Bytes::new(env),
            avatar: Bytes::new(env),
            twitter: Bytes::new(env),
            discord: Bytes::new(env),
            website: Bytes::new(env),
        };
        profile.apply_details(env, details);
        profile
    }

    /// Overwrite all five free-text fields.
    ///
    /// Absent values clear the field to empty; they do NOT leave it
    /// unchanged. Oversize values are clipped.
    pub fn apply_details(&mut self, env: &Env, details: ProfileDetails) {
        let clipped = details.clipped(env);
        self.bio = clipped.bio;
        self.avatar = clipped.avatar;
        self.twitter = clipped.twitter;
        self.discord = clipped.discord;
        self.website = clipped.website;
    }
}

/// Named address slot, stored at `["mapping", username, address_type]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressMappingRecord {
    /// Derived address of the owning profile.
    pub profile: BytesN<32>,

    pub bump: u32,

    /// Validated slot name (`nft`, `token`, `custom-foo`, ...).
    pub address_type: Bytes,

    /// Any address. Not checked against the ledger.
    pub target: Address,

    /// Client hint, see [`crate::fields::type_hints`]. Always below 256.
    pub extra_tag: u32,
}

/// Address to username pointer, stored at `["reverse", address]`.
///
/// Written whenever an address becomes a profile's main address. It is
/// not removed when the main address moves on, so it means "was main
/// at some point".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReverseLookupRecord {
    pub username: Bytes,
    pub bump: u32,
}

pub const MAX_BIO: u32 = 256;
pub const MAX_AVATAR: u32 = 128;
pub const MAX_HANDLE: u32 = 32;
pub const MAX_SITE: u32 = 64;

// Layout sizes in bytes.
const DISCRIMINATOR: u32 = 8;
const STRING_PREFIX: u32 = 4;
const ADDRESS: u32 = 32;

/// Billed size of a profile record.
pub const PROFILE_SPACE: u32 = DISCRIMINATOR
    + ADDRESS
    + ADDRESS
    + 1
    + STRING_PREFIX
    + crate::validation::MAX_USERNAME_LENGTH
    + STRING_PREFIX
    + MAX_BIO
    + STRING_PREFIX
    + MAX_AVATAR
    + STRING_PREFIX
    + MAX_HANDLE
    + STRING_PREFIX
    + MAX_HANDLE
    + STRING_PREFIX
    + MAX_SITE
    + 128;

/// Billed size of a mapping record.
pub const MAPPING_SPACE: u32 = DISCRIMINATOR
    + ADDRESS
    + 1
    + STRING_PREFIX
    + crate::validation::MAX_ADDRESS_TYPE_LENGTH
    + ADDRESS
    + 1
    + 64;

/// Billed size of a reverse lookup record.
pub const REVERSE_SPACE: u32 =
    DISCRIMINATOR + STRING_PREFIX + crate::validation::MAX_USERNAME_LENGTH + 1;
