use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{PersistentStore, StoreError};

/// Process-local store with write counting and injectable write failures.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// Number of successful `set` calls so far.
    pub(crate) fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Make every following `set` fail, as a full or unavailable store would.
    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable(format!("write to '{key}' refused")));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
