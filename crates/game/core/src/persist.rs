//! Save and restore of the whole world.
//!
//! Snapshots are bincode-encoded [`GameState`] values behind a small header.
//! The byte layout is tied to this build and is not a stable interface.

use crate::error::InvariantViolation;
use crate::state::GameState;

const MAGIC: [u8; 4] = *b"CRWL";
const VERSION: u16 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("not a save file")]
    BadMagic,

    #[error("save format version {found} is not supported (expected {VERSION})")]
    UnsupportedVersion { found: u16 },

    #[error("failed to encode or decode the snapshot: {0}")]
    Codec(#[from] bincode::Error),

    #[error("restored world is inconsistent: {0}")]
    Invariant(#[from] InvariantViolation),
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u16,
}

/// Serialized snapshot of a [`GameState`].
pub struct SaveGame;

impl SaveGame {
    pub fn encode(state: &GameState) -> Result<Vec<u8>, PersistError> {
        let header = Header {
            magic: MAGIC,
            version: VERSION,
        };
        let mut bytes = bincode::serialize(&header)?;
        bytes.extend(bincode::serialize(state)?);
        Ok(bytes)
    }

    /// Restores a world and checks its structural invariants before handing
    /// it back.
    pub fn decode(bytes: &[u8]) -> Result<GameState, PersistError> {
        let header: Header = bincode::deserialize(bytes)?;
        if header.magic != MAGIC {
            return Err(PersistError::BadMagic);
        }
        if header.version != VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: header.version,
            });
        }
        let offset = bincode::serialized_size(&header)? as usize;
        let body = bytes.get(offset..).ok_or(PersistError::BadMagic)?;
        let state: GameState = bincode::deserialize(body)?;
        state.validate()?;
        Ok(state)
    }
}
