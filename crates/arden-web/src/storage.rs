//! Browser `localStorage` backend

use arden_core::{ArdenError, KeyValueStore, Result};
use gloo_storage::{LocalStorage, Storage};

/// [`KeyValueStore`] over `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

fn js_err(action: &str, key: &str) -> ArdenError {
    ArdenError::Storage(format!("{action} {key} failed"))
}

impl KeyValueStore for LocalStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(|_| js_err("read", key))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| js_err("write", key))
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|_| js_err("remove", key))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use arden_core::{store::keys, KeyValueStoreExt};
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_and_remove() {
        let store = LocalStore;
        store.write(keys::USER_NAME, "Ada").unwrap();
        assert_eq!(store.get_raw(keys::USER_NAME).unwrap().as_deref(), Some("\"Ada\""));
        assert_eq!(store.read::<Option<String>>(keys::USER_NAME, None).as_deref(), Some("Ada"));

        store.remove(keys::USER_NAME).unwrap();
        assert_eq!(store.get_raw(keys::USER_NAME).unwrap(), None);
    }
}
