//! Key-value persistence capability for browser preferences.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::error::PageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Used in tests and when `localStorage` is unavailable
/// (private browsing, sandboxed frames).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use web_sys::{window, Storage};

    use super::KeyValueStore;
    use crate::error::PageError;

    pub struct LocalStore {
        storage: Storage,
    }

    impl LocalStore {
        pub fn open() -> Option<Self> {
            let storage = window()?.local_storage().ok().flatten()?;
            Some(Self { storage })
        }
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
            self.storage
                .set_item(key, value)
                .map_err(|err| PageError::Storage {
                    key: key.to_string(),
                    reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_through_rc() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::default());

        assert_eq!(store.get("pageTheme"), None);
        store.set("pageTheme", "light").expect("memory store accepts writes");
        assert_eq!(store.get("pageTheme").as_deref(), Some("light"));
    }
}
