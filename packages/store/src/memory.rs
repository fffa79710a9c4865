use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::tables::Storage;

/// In-memory Storage for testing and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().unwrap().get(slot).cloned())
    }

    async fn write(&self, slot: &str, contents: &str) -> Result<(), StoreError> {
        self.slots
            .lock()
            .unwrap()
            .insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.slots.lock().unwrap().remove(slot);
        Ok(())
    }
}
