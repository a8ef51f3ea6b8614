//! Storage deposits: taken when a record is allocated, returned when it
//! is deleted.
//!
//! The amount is recorded per record at allocation time, so a later
//! rate change never alters what a delete refunds.

use soroban_sdk::{log, panic_with_error, token, Address, BytesN, Env};

use crate::storage::{self, Config};
use crate::ProfileError;

/// Move the deposit for a freshly allocated record from `payer` into
/// the contract. Returns the amount taken.
pub fn charge(
    env: &Env,
    config: &Config,
    payer: &Address,
    record: &BytesN<32>,
    space: u32,
) -> i128 {
    let amount = config
        .rate
        .amount(space)
        .unwrap_or_else(|| panic_with_error!(env, ProfileError::InvalidDepositRate));
    if amount > 0 {
        token::TokenClient::new(env, &config.token).transfer(
            payer,
            &env.current_contract_address(),
            &amount,
        );
        storage::set_deposit(env, record, amount);
        log!(env, "deposit taken", record.clone(), amount);
    }
    amount
}

/// Return the deposit held for a deleted record to `recipient`.
pub fn refund(env: &Env, config: &Config, record: &BytesN<32>, recipient: &Address) -> i128 {
    let amount = storage::take_deposit(env, record);
    if amount > 0 {
        token::TokenClient::new(env, &config.token).transfer(
            &env.current_contract_address(),
            recipient,
            &amount,
        );
        log!(env, "deposit refunded", record.clone(), amount);
    }
    amount
}
