//! Glitchbytes persistence across sessions and session snapshots on disk.

use glitchbomb::core::constants::GLITCHBYTES_STORE_KEY;
use glitchbomb::game::GamePhase;
use glitchbomb::orbs::OrbType;
use glitchbomb::persistence::{export_json, import_json, JsonFileStore, KeyValueStore, SaveManager};
use glitchbomb::{GameConfig, Session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "glitchbomb-it-{}-{}-{}",
        name,
        std::process::id(),
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn session_at(path: &Path, seed: u64) -> Session<ChaCha8Rng, JsonFileStore> {
    Session::new(
        GameConfig::default(),
        ChaCha8Rng::seed_from_u64(seed),
        JsonFileStore::at(path),
    )
}

// =========================================================================
// Currency store
// =========================================================================

#[test]
fn test_balance_survives_a_new_session() {
    let dir = temp_dir("balance");
    let path = dir.join("store.json");

    let mut session = session_at(&path, 1);
    assert_eq!(session.state().player_stats.glitchbytes, 1000);
    session.start_new_game().unwrap();
    session.skip_level().unwrap();
    let earned = session.cash_out_post_level().unwrap();
    assert_eq!(earned, 12);

    let reopened = session_at(&path, 2);
    assert_eq!(reopened.state().player_stats.glitchbytes, 1000 - 10 + 12);
    assert_eq!(reopened.state().phase, GamePhase::Menu);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_command_does_not_write_balance() {
    let dir = temp_dir("failed");
    let path = dir.join("store.json");

    let mut session = session_at(&path, 3);
    assert!(session.pull_orb().is_err());
    assert!(session.purchase_orb(OrbType::Point, 1).is_err());
    assert_eq!(session.store().get(GLITCHBYTES_STORE_KEY).unwrap(), None);
    assert!(!path.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_balance_falls_back_to_default() {
    let dir = temp_dir("corrupt");
    let path = dir.join("store.json");
    let mut store = JsonFileStore::at(&path);
    store.set(GLITCHBYTES_STORE_KEY, "lots").unwrap();

    let session = session_at(&path, 4);
    assert_eq!(session.state().player_stats.glitchbytes, 1000);

    let _ = fs::remove_dir_all(&dir);
}

// =========================================================================
// Session snapshots
// =========================================================================

#[test]
fn test_saved_session_resumes_mid_level() {
    let dir = temp_dir("snapshot");
    let mut session = session_at(&dir.join("store.json"), 5);
    session.start_new_game().unwrap();
    session.pull_orb().unwrap();
    let state = session.into_state();

    let manager = SaveManager::new_for_test().unwrap();
    manager.save(&state).unwrap();
    assert!(manager.save_exists());
    let loaded = manager.load().unwrap();
    assert_eq!(loaded, state);

    let mut resumed = Session::from_state(
        loaded,
        ChaCha8Rng::seed_from_u64(6),
        JsonFileStore::at(dir.join("store.json")),
    );
    assert_eq!(resumed.state().phase, GamePhase::Level);
    let remaining = resumed.state().orb_bag.total_available_orbs();
    resumed.pull_orb().unwrap();
    assert_eq!(resumed.state().orb_bag.total_available_orbs(), remaining - 1);

    manager.delete().unwrap();
    assert!(!manager.save_exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_tampered_snapshot_is_rejected() {
    let mut session = session_at(&temp_dir("tamper").join("store.json"), 7);
    session.start_new_game().unwrap();
    let state = session.into_state();

    let manager = SaveManager::new_for_test().unwrap();
    manager.save(&state).unwrap();
    let mut bytes = fs::read(manager.path()).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(manager.path(), bytes).unwrap();

    assert!(manager.load().is_err());
}

#[test]
fn test_json_export_roundtrip() {
    let dir = temp_dir("export");
    let mut session = session_at(&dir.join("store.json"), 8);
    session.start_new_game().unwrap();
    session.skip_level().unwrap();
    session.continue_to_marketplace().unwrap();
    let state = session.into_state();

    let path = dir.join("session.json");
    export_json(&state, &path).unwrap();
    let imported = import_json(&path).unwrap();
    assert_eq!(imported, state);
    assert_eq!(imported.phase, GamePhase::Marketplace);
    assert!(!imported.marketplace.current_shop_items.is_empty());

    let _ = fs::remove_dir_all(&dir);
}
