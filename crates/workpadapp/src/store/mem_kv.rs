use super::backend::KvBackend;
use crate::error::{Result, WorkpadError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since execution is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `KvBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemKv {
    records: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value, corrupt or otherwise.
    pub fn set_raw(&self, key: &str, value: &str) {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Test helper to inspect the raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }
}

impl KvBackend for MemKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(WorkpadError::Store("Simulated write error".to_string()));
        }
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
