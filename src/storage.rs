//! Storage keys, contract configuration and typed record access.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::records::{AddressMappingRecord, ProfileRecord, ReverseLookupRecord, PROFILE_SPACE};

/// Storage keys for the resolver contract.
///
/// Record variants carry the derived address of the record, so the
/// variant doubles as the record's discriminator.
#[contracttype]
#[derive(Clone, Debug)]
pub enum RecordKey {
    /// Contract administrator address (instance).
    Admin,

    /// Deposit token and rates (instance).
    Config,

    /// ProfileRecord at `["profile", username]`.
    Profile(BytesN<32>),

    /// AddressMappingRecord at `["mapping", username, address_type]`.
    Mapping(BytesN<32>),

    /// ReverseLookupRecord at `["reverse", address]`.
    Reverse(BytesN<32>),

    /// Deposit held for the record at this address, in token units.
    Deposit(BytesN<32>),
}

/// Storage deposit pricing: `base + per_byte * space`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRate {
    pub base: i128,
    pub per_byte: i128,
}

impl DepositRate {
    pub fn free() -> Self {
        Self {
            base: 0,
            per_byte: 0,
        }
    }

    /// Non-negative, and the largest record's deposit fits in an `i128`.
    pub fn is_valid(&self) -> bool {
        self.base >= 0 && self.per_byte >= 0 && self.amount(PROFILE_SPACE).is_some()
    }

    /// Deposit owed for a record of `space` bytes; `None` on overflow.
    pub fn amount(&self, space: u32) -> Option<i128> {
        self.per_byte
            .checked_mul(space as i128)?
            .checked_add(self.base)
    }
}

/// Contract configuration, set once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token the storage deposits are paid in.
    pub token: Address,

    pub rate: DepositRate,

    /// Delete the previous reverse record when the main address moves.
    pub prune_reverse: bool,
}

/// Time-to-live for record entries.
pub const RECORD_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const RECORD_TTL_EXTEND: u32 = 2592000; // ~150 days

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&RecordKey::Admin)
}

pub fn admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&RecordKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&RecordKey::Admin, admin);
}

pub fn config(env: &Env) -> Option<Config> {
    env.storage().instance().get(&RecordKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&RecordKey::Config, config);
}

pub fn profile(env: &Env, address: &BytesN<32>) -> Option<ProfileRecord> {
    env.storage()
        .persistent()
        .get(&RecordKey::Profile(address.clone()))
}

pub fn has_profile(env: &Env, address: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&RecordKey::Profile(address.clone()))
}

pub fn set_profile(env: &Env, address: &BytesN<32>, record: &ProfileRecord) {
    write(env, RecordKey::Profile(address.clone()), record);
}

pub fn mapping(env: &Env, address: &BytesN<32>) -> Option<AddressMappingRecord> {
    env.storage()
        .persistent()
        .get(&RecordKey::Mapping(address.clone()))
}

pub fn set_mapping(env: &Env, address: &BytesN<32>, record: &AddressMappingRecord) {
    write(env, RecordKey::Mapping(address.clone()), record);
}

pub fn remove_mapping(env: &Env, address: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&RecordKey::Mapping(address.clone()));
}

pub fn reverse(env: &Env, address: &BytesN<32>) -> Option<ReverseLookupRecord> {
    env.storage()
        .persistent()
        .get(&RecordKey::Reverse(address.clone()))
}

pub fn set_reverse(env: &Env, address: &BytesN<32>, record: &ReverseLookupRecord) {
    write(env, RecordKey::Reverse(address.clone()), record);
}

pub fn remove_reverse(env: &Env, address: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&RecordKey::Reverse(address.clone()));
}

/// Deposit currently held for a record; zero when none was taken.
pub fn deposit(env: &Env, address: &BytesN<32>) -> i128 {
    env.storage()
        .persistent()
        .get(&RecordKey::Deposit(address.clone()))
        .unwrap_or(0)
}

pub fn set_deposit(env: &Env, address: &BytesN<32>, amount: i128) {
    write(env, RecordKey::Deposit(address.clone()), &amount);
}

/// Remove and return the deposit held for a record.
pub fn take_deposit(env: &Env, address: &BytesN<32>) -> i128 {
    let key = RecordKey::Deposit(address.clone());
    let amount: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().remove(&key);
    amount
}

fn write<V>(env: &Env, key: RecordKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(&key, value);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}
