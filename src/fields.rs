//! Profile free-text fields and mapping type hints.

use soroban_sdk::{Bytes, Env};

use crate::records::{MAX_AVATAR, MAX_BIO, MAX_HANDLE, MAX_SITE};
use crate::validation::clip;

/// The five optional profile fields as passed to an instruction.
///
/// `None` always means "empty string", both on create and on update.
/// Callers wanting to keep a value must resend it.
#[derive(Clone, Debug, Default)]
pub struct ProfileDetails {
    pub bio: Option<Bytes>,
    pub avatar: Option<Bytes>,
    pub twitter: Option<Bytes>,
    pub discord: Option<Bytes>,
    pub website: Option<Bytes>,
}

/// Field values after the null-clears and clipping policy is applied.
#[derive(Clone, Debug)]
pub struct ClippedDetails {
    pub bio: Bytes,
    pub avatar: Bytes,
    pub twitter: Bytes,
    pub discord: Bytes,
    pub website: Bytes,
}

impl ProfileDetails {
    pub fn new(
        bio: Option<Bytes>,
        avatar: Option<Bytes>,
        twitter: Option<Bytes>,
        discord: Option<Bytes>,
        website: Option<Bytes>,
    ) -> Self {
        Self {
            bio,
            avatar,
            twitter,
            discord,
            website,
        }
    }

    /// Resolve each field to its stored form.
    pub fn clipped(self, env: &Env) -> ClippedDetails {
        ClippedDetails {
            bio: clip(env, self.bio, MAX_BIO),
            avatar: clip(env, self.avatar, MAX_AVATAR),
            twitter: clip(env, self.twitter, MAX_HANDLE),
            discord: clip(env, self.discord, MAX_HANDLE),
            website: clip(env, self.website, MAX_SITE),
        }
    }
}

/// Conventional `extra_tag` values for address mappings.
///
/// These are not enforced by the contract; any value up to
/// [`MAX_TYPE_HINT`](type_hints::MAX_TYPE_HINT) is stored as given.
pub mod type_hints {
    pub const WALLET: u32 = 0;
    pub const TOKEN: u32 = 1;
    pub const NFT: u32 = 2;
    pub const METADATA: u32 = 3;
    pub const CUSTOM: u32 = 4;

    /// Tags are 8-bit.
    pub const MAX_TYPE_HINT: u32 = u8::MAX as u32;
}
