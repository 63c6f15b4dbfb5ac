//! Browser `localStorage` as the conversation's durable store.
//!
//! Outside the hydrated client there is no browser storage: reads find
//! nothing and writes report [`StorageError::Unavailable`].

use excursions_conversation::{DurableStore, StorageError};
use excursions_core::Result;

/// `window.localStorage`, looked up on every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl DurableStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::WriteFailed {
                    key: key.to_string(),
                    reason: format!("{e:?}"),
                })?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable.into())
        }
    }
}
