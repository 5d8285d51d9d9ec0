use super::store::KeyValueStore;
use crate::core::constants::GLITCHBYTES_STORE_KEY;

/// Stored glitchbytes balance, or `default` when the value is missing,
/// unreadable or not a number.
pub fn load_persistent_currency<S: KeyValueStore + ?Sized>(store: &S, default: u64) -> u64 {
    match store.get(GLITCHBYTES_STORE_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparsable glitchbytes balance {:?}", raw);
            default
        }),
        Ok(None) => default,
        Err(e) => {
            log::warn!("failed to load glitchbytes balance: {}", e);
            default
        }
    }
}

/// Best effort: a failed write is logged and otherwise ignored.
pub fn save_persistent_currency<S: KeyValueStore + ?Sized>(store: &mut S, amount: u64) {
    if let Err(e) = store.set(GLITCHBYTES_STORE_KEY, &amount.to_string()) {
        log::warn!("failed to save glitchbytes balance {}: {}", amount, e);
    }
}
