//! Persistence module - string-keyed store and result recording
//!
//! The game shares a flat key-value store with the rest of the application.
//! This crate defines that collaborator as the [`KeyValueStore`] trait, ships
//! two implementations, and owns the write rules for Raindrop results:
//!
//! - [`MemoryStore`]: a `HashMap`, for tests and embedding
//! - [`JsonFileStore`]: a single JSON object on disk, rewritten on every change
//! - [`record`]: score/time writes and the ratchet merge into `assessmentResult`
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `Rain_drops_score` | score as a decimal string |
//! | `Rain_Drops_Time` | survival time, `"minutes.seconds"` |
//! | `assessmentResult` | JSON object; this crate only ever touches `p_M` |

pub mod error;
pub mod file;
pub mod memory;
pub mod record;

pub use raindrop_types as types;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{
    read_math_score, record_final, record_score, ratchet_math_score, RatchetOutcome,
};

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
