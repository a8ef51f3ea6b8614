//! # Soroban Profile Resolver
//!
//! Deterministic naming for Soroban: profiles keyed by username, named
//! address slots per profile, and reverse lookups from an address back
//! to a username.
//!
//! Every record sits at an address derived from human-readable seeds
//! (see [`derive`]), so lookups need no index:
//!
//! - `["profile", username]` holds the [`ProfileRecord`]
//! - `["mapping", username, address_type]` holds an [`AddressMappingRecord`]
//! - `["reverse", address]` holds a [`ReverseLookupRecord`]
//!
//! Handles read UPI-style: `alice` or `wallet@alice` is alice's main
//! address, `nft@alice` is whatever alice mapped under `nft`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! client.create_profile(&username, &Some(bio), &None, &None, &None, &None, &caller);
//! client.set_address_mapping(&username, &nft, &mint, &type_hints::NFT, &caller);
//! let target = client.resolve(&handle);
//! ```
//!
//! ## Optional fields clear on `None`
//!
//! `create_profile` and `set_profile_details` treat a missing field as
//! the empty string. Updating only the bio therefore wipes avatar,
//! twitter, discord and website unless they are sent again.

#![no_std]

mod access;
mod curve;
mod deposit;
pub mod derive;
mod events;
mod fields;
mod records;
mod storage;
mod validation;

pub use derive::DerivationError;
pub use fields::{type_hints, ProfileDetails};
pub use records::{
    AddressMappingRecord, ProfileRecord, ReverseLookupRecord, MAPPING_SPACE, MAX_AVATAR, MAX_BIO,
    MAX_HANDLE, MAX_SITE, PROFILE_SPACE, REVERSE_SPACE,
};
pub use storage::{Config, DepositRate, RecordKey};
pub use validation::{
    validate_address_type, validate_username, MAX_ADDRESS_TYPE_LENGTH, MAX_USERNAME_LENGTH,
};

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, Address, Bytes, BytesN, Env,
};

use crate::access::{require_admin, require_authority};
use crate::events::*;

/// Error codes for the resolver contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProfileError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Signer is not the profile authority (or the admin).
    NotAuthorized = 3,
    /// Username format is invalid.
    InvalidUsername = 4,
    /// Address type format is invalid.
    InvalidAddressType = 5,
    /// A record already exists at the derived address.
    AccountAlreadyInUse = 6,
    /// No record exists at the derived address.
    AccountNotInitialized = 7,
    /// Stored nonce or back-reference does not match the derived address.
    ConstraintSeeds = 8,
    /// Too many seeds, or a seed longer than 32 bytes.
    MaxSeedLengthExceeded = 9,
    /// No nonce yields an off-curve address.
    InvalidSeeds = 10,
    /// Type hint does not fit in 8 bits.
    InvalidTypeHint = 11,
    /// Deposit rate is negative or overflows for the largest record.
    InvalidDepositRate = 12,
}

impl From<ProfileError> for soroban_sdk::Error {
    fn from(e: ProfileError) -> Self {
        soroban_sdk::Error::from_contract_error(e as u32)
    }
}

impl From<DerivationError> for ProfileError {
    fn from(e: DerivationError) -> Self {
        match e {
            DerivationError::MaxSeedLengthExceeded => ProfileError::MaxSeedLengthExceeded,
            DerivationError::InvalidSeeds => ProfileError::InvalidSeeds,
        }
    }
}

#[contract]
pub struct ProfileResolverContract;

#[contractimpl]
impl ProfileResolverContract {
    // ========== Initialization ==========

    /// Initialize the contract.
    ///
    /// # Arguments
    /// * `admin` - May change the deposit rate and upgrade the contract
    /// * `token` - Token storage deposits are paid in
    /// * `rate` - Deposit pricing for newly allocated records
    /// * `prune_reverse` - Delete the old reverse record when a main address moves
    pub fn init(env: Env, admin: Address, token: Address, rate: DepositRate, prune_reverse: bool) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, ProfileError::AlreadyInitialized);
        }

        admin.require_auth();

        if !rate.is_valid() {
            panic_with_error!(&env, ProfileError::InvalidDepositRate);
        }

        storage::set_admin(&env, &admin);
        storage::set_config(
            &env,
            &Config {
                token,
                rate,
                prune_reverse,
            },
        );
    }

    /// Get the admin address.
    pub fn admin(env: Env) -> Address {
        storage::admin(&env)
            .unwrap_or_else(|| panic_with_error!(&env, ProfileError::NotInitialized))
    }

    /// Get the contract configuration.
    pub fn config(env: Env) -> Config {
        Self::require_config(&env)
    }

    // ========== Profiles ==========

    /// Create the profile for `username`, owned by `caller`.
    ///
    /// `caller` becomes both authority and main address, pays the
    /// deposits, and gets a reverse record pointing at `username`.
    /// Missing optional fields are stored empty, oversize ones clipped.
    ///
    /// # Panics
    /// - `InvalidUsername` if the username is not `[a-z0-9._-]{1,32}`
    /// - `AccountAlreadyInUse` if the username is taken, or `caller`
    ///   already has a reverse record
    #[allow(clippy::too_many_arguments)]
    pub fn create_profile(
        env: Env,
        username: Bytes,
        bio: Option<Bytes>,
        avatar: Option<Bytes>,
        twitter: Option<Bytes>,
        discord: Option<Bytes>,
        website: Option<Bytes>,
        caller: Address,
    ) {
        caller.require_auth();
        let config = Self::require_config(&env);

        if !validation::validate_username(&username) {
            panic_with_error!(&env, ProfileError::InvalidUsername);
        }

        let (profile_key, bump) = Self::derived(&env, derive::profile_address(&env, &username));
        if storage::has_profile(&env, &profile_key) {
            panic_with_error!(&env, ProfileError::AccountAlreadyInUse);
        }

        let (reverse_key, reverse_bump) =
            Self::derived(&env, derive::reverse_address(&env, &caller));
        if storage::reverse(&env, &reverse_key).is_some() {
            panic_with_error!(&env, ProfileError::AccountAlreadyInUse);
        }

        let details = ProfileDetails::new(bio, avatar, twitter, discord, website);
        let profile = ProfileRecord::new(&env, caller.clone(), bump, username.clone(), details);

        deposit::charge(&env, &config, &caller, &profile_key, PROFILE_SPACE);
        storage::set_profile(&env, &profile_key, &profile);

        deposit::charge(&env, &config, &caller, &reverse_key, REVERSE_SPACE);
        storage::set_reverse(
            &env,
            &reverse_key,
            &ReverseLookupRecord {
                username: username.clone(),
                bump: reverse_bump,
            },
        );

        log!(&env, "profile created", username);
        emit_profile_created(
            &env,
            &profile_key,
            &profile.authority,
            &profile.main_address,
            &profile.username,
        );
    }

    /// Rewrite the profile's free-text fields.
    ///
    /// All five fields are replaced: `None` clears a field to empty, it
    /// does not keep the old value.
    #[allow(clippy::too_many_arguments)]
    pub fn set_profile_details(
        env: Env,
        username: Bytes,
        bio: Option<Bytes>,
        avatar: Option<Bytes>,
        twitter: Option<Bytes>,
        discord: Option<Bytes>,
        website: Option<Bytes>,
        caller: Address,
    ) {
        Self::require_config(&env);
        let (profile_key, mut profile) = Self::load_profile(&env, &username);
        require_authority(&env, &profile, &caller);

        profile.apply_details(
            &env,
            ProfileDetails::new(bio, avatar, twitter, discord, website),
        );
        storage::set_profile(&env, &profile_key, &profile);

        emit_profile_updated(&env, &profile_key, &profile.authority);
    }

    /// Point the profile's main address at `new_main`.
    ///
    /// The reverse record at `new_main` is created or overwritten, even
    /// if it currently names another username. The previous main
    /// address keeps its reverse record unless pruning is configured.
    pub fn set_main_address(env: Env, username: Bytes, new_main: Address, caller: Address) {
        let config = Self::require_config(&env);
        let (profile_key, mut profile) = Self::load_profile(&env, &username);
        require_authority(&env, &profile, &caller);

        let old_main = profile.main_address.clone();
        if config.prune_reverse && old_main != new_main {
            Self::prune_reverse(&env, &config, &old_main, &profile.username, &caller);
        }

        profile.main_address = new_main.clone();
        storage::set_profile(&env, &profile_key, &profile);
        Self::upsert_reverse(&env, &config, &caller, &new_main, &profile.username);

        emit_main_address_changed(&env, &profile_key, &new_main);
    }

    /// Hand the profile to `new_authority`.
    ///
    /// Takes effect immediately; the old authority loses all access.
    /// `new_authority` is not checked in any way.
    pub fn set_authority(env: Env, username: Bytes, new_authority: Address, caller: Address) {
        Self::require_config(&env);
        let (profile_key, mut profile) = Self::load_profile(&env, &username);
        require_authority(&env, &profile, &caller);

        let old_authority = core::mem::replace(&mut profile.authority, new_authority.clone());
        storage::set_profile(&env, &profile_key, &profile);

        emit_authority_changed(&env, &profile_key, &old_authority, &new_authority);
    }

    // ========== Address Mappings ==========

    /// Create or overwrite the mapping `address_type@username`.
    ///
    /// A new mapping charges a deposit; an existing one has its target
    /// and tag replaced in place.
    ///
    /// # Panics
    /// - `NotAuthorized` if `caller` is not the profile authority
    /// - `InvalidAddressType` if the type is not `[a-z0-9.-]{1,16}`
    /// - `InvalidTypeHint` if `type_hint` exceeds 255
    pub fn set_address_mapping(
        env: Env,
        username: Bytes,
        address_type: Bytes,
        target: Address,
        type_hint: u32,
        caller: Address,
    ) {
        let config = Self::require_config(&env);
        let (profile_key, profile) = Self::load_profile(&env, &username);
        require_authority(&env, &profile, &caller);

        if !validation::validate_address_type(&address_type) {
            panic_with_error!(&env, ProfileError::InvalidAddressType);
        }
        if type_hint > type_hints::MAX_TYPE_HINT {
            panic_with_error!(&env, ProfileError::InvalidTypeHint);
        }

        let (mapping_key, bump) = Self::derived(
            &env,
            derive::mapping_address(&env, &profile.username, &address_type),
        );

        let record = match storage::mapping(&env, &mapping_key) {
            Some(existing) => {
                if existing.profile != profile_key {
                    panic_with_error!(&env, ProfileError::ConstraintSeeds);
                }
                AddressMappingRecord {
                    target,
                    extra_tag: type_hint,
                    ..existing
                }
            }
            None => {
                deposit::charge(&env, &config, &caller, &mapping_key, MAPPING_SPACE);
                log!(&env, "mapping allocated", address_type.clone());
                AddressMappingRecord {
                    profile: profile_key.clone(),
                    bump,
                    address_type,
                    target,
                    extra_tag: type_hint,
                }
            }
        };
        storage::set_mapping(&env, &mapping_key, &record);

        emit_mapping_set(
            &env,
            &profile_key,
            &record.address_type,
            &record.target,
            record.extra_tag,
        );
    }

    /// Publish the mapping `address_type@username` as an event and
    /// return it. Read-only; anyone may call.
    ///
    /// # Panics
    /// - `AccountNotInitialized` if the profile or mapping does not exist
    pub fn get_address_mapping(
        env: Env,
        username: Bytes,
        address_type: Bytes,
    ) -> AddressMappingRecord {
        let (profile_key, profile) = Self::load_profile(&env, &username);
        let (_, record) = Self::load_mapping(&env, &profile_key, &profile.username, &address_type);

        emit_mapping_fetched(
            &env,
            &profile_key,
            &record.address_type,
            &record.target,
            record.extra_tag,
        );
        record
    }

    /// Delete the mapping `address_type@username`, refunding its
    /// deposit to the current authority.
    ///
    /// Not idempotent: clearing a missing mapping fails with
    /// `AccountNotInitialized`.
    pub fn clear_address_mapping(env: Env, username: Bytes, address_type: Bytes, caller: Address) {
        let config = Self::require_config(&env);
        let (profile_key, profile) = Self::load_profile(&env, &username);
        require_authority(&env, &profile, &caller);

        let (mapping_key, record) =
            Self::load_mapping(&env, &profile_key, &profile.username, &address_type);

        storage::remove_mapping(&env, &mapping_key);
        deposit::refund(&env, &config, &mapping_key, &profile.authority);

        emit_mapping_cleared(&env, &profile_key, &record.address_type);
    }

    // ========== Queries ==========

    /// Get a profile by username.
    pub fn get_profile(env: Env, username: Bytes) -> Option<ProfileRecord> {
        let (profile_key, _) = derive::profile_address(&env, &username).ok()?;
        storage::profile(&env, &profile_key)
    }

    /// Get the mapping `address_type@username`, if any.
    pub fn get_mapping(
        env: Env,
        username: Bytes,
        address_type: Bytes,
    ) -> Option<AddressMappingRecord> {
        let (mapping_key, _) = derive::mapping_address(&env, &username, &address_type).ok()?;
        storage::mapping(&env, &mapping_key)
    }

    /// Get the reverse record for `address`.
    ///
    /// A result means `address` was a main address of that username at
    /// some point, not necessarily that it is now.
    pub fn get_reverse(env: Env, address: Address) -> Option<ReverseLookupRecord> {
        let (reverse_key, _) = derive::reverse_address(&env, &address).ok()?;
        storage::reverse(&env, &reverse_key)
    }

    /// Check if a username is valid and not yet taken.
    pub fn is_username_available(env: Env, username: Bytes) -> bool {
        if !validation::validate_username(&username) {
            return false;
        }

        match derive::profile_address(&env, &username) {
            Ok((profile_key, _)) => !storage::has_profile(&env, &profile_key),
            Err(_) => false,
        }
    }

    /// Resolve a handle to an address.
    ///
    /// - `alice` and `wallet@alice` give alice's main address
    /// - `nft@alice` gives the target mapped under `nft`
    ///
    /// An explicit `wallet` mapping wins over the main address.
    /// Malformed or unknown handles resolve to `None`.
    pub fn resolve(env: Env, handle: Bytes) -> Option<Address> {
        let (address_type, username) = match validation::separator_index(&handle) {
            Some(at) => (Some(handle.slice(0..at)), handle.slice(at + 1..)),
            None => (None, handle),
        };

        if !validation::validate_username(&username) {
            return None;
        }
        let (profile_key, _) = derive::profile_address(&env, &username).ok()?;
        let profile = storage::profile(&env, &profile_key)?;

        let address_type = match address_type {
            Some(t) => t,
            None => return Some(profile.main_address),
        };
        if !validation::validate_address_type(&address_type) {
            return None;
        }

        let (mapping_key, _) = derive::mapping_address(&env, &username, &address_type).ok()?;
        if let Some(mapping) = storage::mapping(&env, &mapping_key) {
            return Some(mapping.target);
        }

        if address_type == Bytes::from_slice(&env, WALLET_TYPE) {
            Some(profile.main_address)
        } else {
            None
        }
    }

    /// Derived address of the profile record for `username`.
    pub fn profile_address(env: Env, username: Bytes) -> BytesN<32> {
        Self::derived(&env, derive::profile_address(&env, &username)).0
    }

    /// Derived address of the mapping record for `address_type@username`.
    pub fn mapping_address(env: Env, username: Bytes, address_type: Bytes) -> BytesN<32> {
        Self::derived(&env, derive::mapping_address(&env, &username, &address_type)).0
    }

    /// Derived address of the reverse record for `address`.
    pub fn reverse_address(env: Env, address: Address) -> BytesN<32> {
        Self::derived(&env, derive::reverse_address(&env, &address)).0
    }

    /// Deposit currently held for the record at `record`.
    pub fn record_deposit(env: Env, record: BytesN<32>) -> i128 {
        storage::deposit(&env, &record)
    }

    // ========== Admin Functions ==========

    /// Change the deposit rate for future allocations (admin only).
    ///
    /// Existing records keep the deposit they were charged.
    pub fn set_deposit_rate(env: Env, rate: DepositRate, caller: Address) {
        require_admin(&env, &caller);

        if !rate.is_valid() {
            panic_with_error!(&env, ProfileError::InvalidDepositRate);
        }

        log!(&env, "deposit rate changed", rate.base, rate.per_byte);
        let mut config = Self::require_config(&env);
        config.rate = rate;
        storage::set_config(&env, &config);
    }

    /// Upgrade the contract WASM (admin only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) {
        let admin = storage::admin(&env)
            .unwrap_or_else(|| panic_with_error!(&env, ProfileError::NotInitialized));

        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    // ========== Internal Helpers ==========

    fn require_config(env: &Env) -> Config {
        storage::config(env)
            .unwrap_or_else(|| panic_with_error!(env, ProfileError::NotInitialized))
    }

    fn derived(
        env: &Env,
        result: Result<(BytesN<32>, u32), DerivationError>,
    ) -> (BytesN<32>, u32) {
        result.unwrap_or_else(|e| panic_with_error!(env, ProfileError::from(e)))
    }

    fn load_profile(env: &Env, username: &Bytes) -> (BytesN<32>, ProfileRecord) {
        let (profile_key, bump) = Self::derived(env, derive::profile_address(env, username));

        let profile = storage::profile(env, &profile_key)
            .unwrap_or_else(|| panic_with_error!(env, ProfileError::AccountNotInitialized));

        if profile.bump != bump || profile.username != *username {
            panic_with_error!(env, ProfileError::ConstraintSeeds);
        }

        (profile_key, profile)
    }

    fn load_mapping(
        env: &Env,
        profile_key: &BytesN<32>,
        username: &Bytes,
        address_type: &Bytes,
    ) -> (BytesN<32>, AddressMappingRecord) {
        let (mapping_key, bump) =
            Self::derived(env, derive::mapping_address(env, username, address_type));

        let record = storage::mapping(env, &mapping_key)
            .unwrap_or_else(|| panic_with_error!(env, ProfileError::AccountNotInitialized));

        if record.bump != bump
            || record.profile != *profile_key
            || record.address_type != *address_type
        {
            panic_with_error!(env, ProfileError::ConstraintSeeds);
        }

        (mapping_key, record)
    }

    /// Create or overwrite the reverse record at `address`. Only a
    /// fresh record is charged a deposit, paid by `payer`.
    fn upsert_reverse(
        env: &Env,
        config: &Config,
        payer: &Address,
        address: &Address,
        username: &Bytes,
    ) {
        let (reverse_key, bump) = Self::derived(env, derive::reverse_address(env, address));

        if storage::reverse(env, &reverse_key).is_none() {
            deposit::charge(env, config, payer, &reverse_key, REVERSE_SPACE);
        }

        storage::set_reverse(
            env,
            &reverse_key,
            &ReverseLookupRecord {
                username: username.clone(),
                bump,
            },
        );
    }

    /// Delete the reverse record at `old_main` if it still names
    /// `username`. The deposit goes to `recipient`.
    fn prune_reverse(
        env: &Env,
        config: &Config,
        old_main: &Address,
        username: &Bytes,
        recipient: &Address,
    ) {
        let (reverse_key, _) = Self::derived(env, derive::reverse_address(env, old_main));

        let stale = match storage::reverse(env, &reverse_key) {
            Some(record) => record.username == *username,
            None => false,
        };
        if !stale {
            return;
        }

        storage::remove_reverse(env, &reverse_key);
        deposit::refund(env, config, &reverse_key, recipient);

        log!(env, "reverse pruned", old_main.clone());
        emit_reverse_pruned(env, old_main, username);
    }
}

/// Address type that falls back to the profile's main address.
const WALLET_TYPE: &[u8] = b"wallet";
