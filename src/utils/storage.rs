// ============================================================================
// STORAGE - Almacenamiento clave/valor duradero (localStorage en el browser)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

/// Almacenamiento de strings por clave.
/// En el browser es localStorage; en tests, un HashMap en memoria.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Serialization(format!("Error serializando {}: {}", key, e)))?;
    store.set_item(key, &json)
}

/// Carga y parsea un valor JSON. Un valor corrupto se trata como ausente.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor corrupto en '{}', ignorado: {}", key, e);
            None
        }
    }
}

/// Store en memoria (tests y fallback si localStorage no existe)
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use crate::errors::AppError;
    use gloo_storage::{LocalStorage, Storage};

    /// localStorage del navegador
    pub struct LocalStore;

    impl KeyValueStore for LocalStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
            LocalStorage::raw()
                .get_item(key)
                .map_err(|_| AppError::Storage("Error leyendo localStorage".to_string()))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|_| AppError::Storage("Error guardando en localStorage".to_string()))
        }

        fn remove_item(&self, key: &str) -> Result<(), AppError> {
            LocalStorage::raw()
                .remove_item(key)
                .map_err(|_| AppError::Storage("Error eliminando de localStorage".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_helpers_round_trip_and_ignore_corrupt_values() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        assert_eq!(load_json::<Vec<i32>>(&store, "numbers"), Some(vec![1, 2, 3]));

        store.set_item("broken", "{not json").unwrap();
        assert_eq!(load_json::<Vec<i32>>(&store, "broken"), None);
        assert_eq!(load_json::<Vec<i32>>(&store, "missing"), None);
    }
}
