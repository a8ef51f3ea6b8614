//! Event emission helpers for the resolver contract.
//!
//! Every event carries the derived profile address so indexers can key
//! on it without re-deriving.

use soroban_sdk::{Address, Bytes, BytesN, Env, Symbol};

/// Emit an event when a profile is created.
pub fn emit_profile_created(
    env: &Env,
    profile: &BytesN<32>,
    authority: &Address,
    main_address: &Address,
    username: &Bytes,
) {
    let topics = (Symbol::new(env, "profile_created"),);
    env.events().publish(
        topics,
        (
            profile.clone(),
            authority.clone(),
            main_address.clone(),
            username.clone(),
        ),
    );
}

/// Emit an event when profile details are rewritten.
pub fn emit_profile_updated(env: &Env, profile: &BytesN<32>, authority: &Address) {
    let topics = (Symbol::new(env, "profile_updated"),);
    env.events()
        .publish(topics, (profile.clone(), authority.clone()));
}

/// Emit an event when a profile's main address changes.
pub fn emit_main_address_changed(env: &Env, profile: &BytesN<32>, new_main: &Address) {
    let topics = (Symbol::new(env, "main_address_changed"),);
    env.events()
        .publish(topics, (profile.clone(), new_main.clone()));
}

/// Emit an event when profile authority is transferred.
pub fn emit_authority_changed(
    env: &Env,
    profile: &BytesN<32>,
    old_authority: &Address,
    new_authority: &Address,
) {
    let topics = (Symbol::new(env, "authority_changed"),);
    env.events().publish(
        topics,
        (profile.clone(), old_authority.clone(), new_authority.clone()),
    );
}

/// Emit an event when a mapping is created or overwritten.
pub fn emit_mapping_set(
    env: &Env,
    profile: &BytesN<32>,
    address_type: &Bytes,
    target: &Address,
    tag: u32,
) {
    let topics = (Symbol::new(env, "mapping_set"),);
    env.events().publish(
        topics,
        (profile.clone(), address_type.clone(), target.clone(), tag),
    );
}

/// Emit the current contents of a mapping for subscription-based lookups.
pub fn emit_mapping_fetched(
    env: &Env,
    profile: &BytesN<32>,
    address_type: &Bytes,
    target: &Address,
    tag: u32,
) {
    let topics = (Symbol::new(env, "mapping_fetched"),);
    env.events().publish(
        topics,
        (profile.clone(), address_type.clone(), target.clone(), tag),
    );
}

/// Emit an event when a mapping is deleted.
pub fn emit_mapping_cleared(env: &Env, profile: &BytesN<32>, address_type: &Bytes) {
    let topics = (Symbol::new(env, "mapping_cleared"),);
    env.events()
        .publish(topics, (profile.clone(), address_type.clone()));
}

/// Emit an event when a stale reverse record is pruned.
pub fn emit_reverse_pruned(env: &Env, old_main: &Address, username: &Bytes) {
    let topics = (Symbol::new(env, "reverse_pruned"),);
    env.events()
        .publish(topics, (old_main.clone(), username.clone()));
}
