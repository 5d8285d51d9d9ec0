use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::game::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Saves and loads whole sessions as checksummed binary snapshots.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// The snapshot lives in the platform config directory from the
    /// `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "glitchbomb").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self::at(config_dir.join("session.dat")))
    }

    pub fn at(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    /// Creates a SaveManager with a unique temporary directory
    pub fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "glitchbomb-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&temp_dir)?;

        Ok(Self::at(temp_dir.join("session.dat")))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Writes `state` as a snapshot, replacing any previous one.
    pub fn save(&self, state: &GameState) -> io::Result<()> {
        fs::write(&self.save_path, encode_snapshot(state)?)
    }

    /// Reads the snapshot back. Fails on a missing file, a foreign or older
    /// format, a checksum mismatch or an undecodable payload.
    pub fn load(&self) -> io::Result<GameState> {
        decode_snapshot(&fs::read(&self.save_path)?)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

const MAGIC_LEN: usize = 8;
const HEADER_LEN: usize = MAGIC_LEN + 4;
const CHECKSUM_LEN: usize = 32;

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// SHA-256 over the header and payload.
fn snapshot_checksum(header: &[u8], payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(header);
    hasher.update(payload);
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&hasher.finalize());
    checksum
}

/// Snapshot layout: version magic (u64 LE), payload length (u32 LE),
/// bincode payload, then the checksum of everything before it.
pub fn encode_snapshot(state: &GameState) -> io::Result<Vec<u8>> {
    let payload = bincode::serialize(state).map_err(|e| invalid(e.to_string()))?;
    let payload_len = u32::try_from(payload.len()).map_err(|e| invalid(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    let checksum = snapshot_checksum(&bytes, &payload);
    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

pub fn decode_snapshot(bytes: &[u8]) -> io::Result<GameState> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(invalid("snapshot is truncated"));
    }
    let (header, rest) = bytes.split_at(HEADER_LEN);
    let (magic, len) = header.split_at(MAGIC_LEN);

    let mut magic_bytes = [0u8; MAGIC_LEN];
    magic_bytes.copy_from_slice(magic);
    let version = u64::from_le_bytes(magic_bytes);
    if version != SAVE_VERSION_MAGIC {
        return Err(invalid(format!(
            "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
            SAVE_VERSION_MAGIC, version
        )));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(len);
    let payload_len = u32::from_le_bytes(len_bytes) as usize;
    if rest.len() != payload_len + CHECKSUM_LEN {
        return Err(invalid("snapshot length does not match its header"));
    }
    let (payload, stored) = rest.split_at(payload_len);

    if snapshot_checksum(header, payload).as_slice() != stored {
        return Err(invalid("Checksum verification failed"));
    }
    bincode::deserialize(payload).map_err(|e| invalid(e.to_string()))
}

/// Writes a readable JSON copy of a session.
pub fn export_json(state: &GameState, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

pub fn import_json(path: &Path) -> io::Result<GameState> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
