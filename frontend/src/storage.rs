use gloo_console::error;
use gloo_utils::window;
use web_sys::Storage;
use workout_tracker_lib::{KeyValueStore, StoreError};

/// `window.localStorage`. Reads from a disabled storage come back empty.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = window().local_storage().ok().flatten();
        if storage.is_none() {
            error!("Local storage is unavailable, workouts will not survive a reload");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("local storage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|err| StoreError::Write {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(|err| StoreError::Remove {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }
}
