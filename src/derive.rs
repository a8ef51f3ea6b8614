//! Deterministic record address derivation.
//!
//! Every record lives at an address computed from a namespace tag plus
//! seed parts:
//!
//! ```text
//! Profile        : ["profile", username]
//! Mapping        : ["mapping", username, address_type]
//! ReverseLookup  : ["reverse", sha256(address_xdr)]
//! ```
//!
//! The address is `sha256(seeds || [nonce] || program_id || marker)` for
//! the highest nonce (255 down to 1) whose digest is off the ed25519
//! curve. Two writers deriving the same seeds always land on the same
//! record, which is what makes usernames unique.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::curve;

/// Maximum number of seeds, including the nonce byte.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: u32 = 32;

/// Domain separator appended to every derivation preimage.
pub const DERIVED_ADDRESS_MARKER: &[u8] = b"ProgramDerivedAddress";

pub const PROFILE_TAG: &[u8] = b"profile";
pub const MAPPING_TAG: &[u8] = b"mapping";
pub const REVERSE_TAG: &[u8] = b"reverse";

/// Failures of the derivation itself, independent of any record state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DerivationError {
    /// Too many seeds, or a seed longer than [`MAX_SEED_LEN`].
    MaxSeedLengthExceeded,
    /// No nonce produced an off-curve address.
    InvalidSeeds,
}

/// Compute the address for fully specified seeds (nonce included).
pub fn create_address(
    env: &Env,
    seeds: &Vec<Bytes>,
    program_id: &Bytes,
) -> Result<BytesN<32>, DerivationError> {
    if seeds.len() as usize > MAX_SEEDS {
        return Err(DerivationError::MaxSeedLengthExceeded);
    }

    let mut preimage = Bytes::new(env);
    for seed in seeds.iter() {
        if seed.len() > MAX_SEED_LEN {
            return Err(DerivationError::MaxSeedLengthExceeded);
        }
        preimage.append(&seed);
    }
    preimage.append(program_id);
    preimage.extend_from_slice(DERIVED_ADDRESS_MARKER);

    let address = env.crypto().sha256(&preimage).to_bytes();
    if curve::is_on_curve(&address.to_array()) {
        return Err(DerivationError::InvalidSeeds);
    }

    Ok(address)
}

/// Find the canonical address and nonce for `tag` plus `parts`.
pub fn derive(
    env: &Env,
    tag: &[u8],
    parts: &[Bytes],
) -> Result<(BytesN<32>, u32), DerivationError> {
    // tag + parts + nonce
    if parts.len() + 2 > MAX_SEEDS {
        return Err(DerivationError::MaxSeedLengthExceeded);
    }

    let mut seeds = Vec::from_array(env, [Bytes::from_slice(env, tag)]);
    for part in parts {
        if part.len() > MAX_SEED_LEN {
            return Err(DerivationError::MaxSeedLengthExceeded);
        }
        seeds.push_back(part.clone());
    }

    let program_id = program_id(env);
    for nonce in (1..=u8::MAX).rev() {
        let mut candidate = seeds.clone();
        candidate.push_back(Bytes::from_array(env, &[nonce]));
        match create_address(env, &candidate, &program_id) {
            Ok(address) => return Ok((address, nonce as u32)),
            Err(DerivationError::InvalidSeeds) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(DerivationError::InvalidSeeds)
}

/// Address of the profile record for `username`.
pub fn profile_address(env: &Env, username: &Bytes) -> Result<(BytesN<32>, u32), DerivationError> {
    derive(env, PROFILE_TAG, &[username.clone()])
}

/// Address of the mapping record for `(username, address_type)`.
pub fn mapping_address(
    env: &Env,
    username: &Bytes,
    address_type: &Bytes,
) -> Result<(BytesN<32>, u32), DerivationError> {
    derive(env, MAPPING_TAG, &[username.clone(), address_type.clone()])
}

/// Address of the reverse lookup record for `address`.
pub fn reverse_address(env: &Env, address: &Address) -> Result<(BytesN<32>, u32), DerivationError> {
    derive(env, REVERSE_TAG, &[address_seed(env, address)])
}

/// Fixed 32-byte seed standing in for a ledger address.
pub fn address_seed(env: &Env, address: &Address) -> Bytes {
    let encoded = address.clone().to_xdr(env);
    env.crypto().sha256(&encoded).to_bytes().into()
}

fn program_id(env: &Env) -> Bytes {
    env.current_contract_address().to_xdr(env)
}
