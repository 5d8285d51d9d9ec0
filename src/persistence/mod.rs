//! Currency persistence and session snapshots.

pub mod currency;
pub mod save_manager;
pub mod store;

pub use currency::{load_persistent_currency, save_persistent_currency};
pub use save_manager::{decode_snapshot, encode_snapshot, export_json, import_json, SaveManager};
pub use store::{glitchbomb_dir, JsonFileStore, KeyValueStore, MemoryStore};
