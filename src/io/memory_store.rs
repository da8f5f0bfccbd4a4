use std::cell::{Cell, RefCell};

use chrono::Utc;

use crate::io::store::{StoreError, TextStore};
use crate::model::text::{TextInput, TextRecord};

/// In-process text store. Ids are assigned sequentially starting after the
/// highest seeded id; timestamps come from the local clock.
#[derive(Debug, Default)]
pub struct MemoryTextStore {
    records: RefCell<Vec<TextRecord>>,
    next_id: Cell<i64>,
    /// When set, every call fails with this HTTP status
    fail_with: Cell<Option<u16>>,
    /// When set, only `list_all` fails with this HTTP status
    fail_list_with: Cell<Option<u16>>,
}

impl MemoryTextStore {
    pub fn new() -> Self {
        MemoryTextStore {
            records: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            fail_with: Cell::new(None),
            fail_list_with: Cell::new(None),
        }
    }

    pub fn with_records(records: Vec<TextRecord>) -> Self {
        let next = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        MemoryTextStore {
            records: RefCell::new(records),
            next_id: Cell::new(next),
            fail_with: Cell::new(None),
            fail_list_with: Cell::new(None),
        }
    }

    /// Make every following call fail with `status` (or succeed again with `None`)
    pub fn set_failure(&self, status: Option<u16>) {
        self.fail_with.set(status);
    }

    /// Make `list_all` alone fail with `status`; writes keep working
    pub fn set_list_failure(&self, status: Option<u16>) {
        self.fail_list_with.set(status);
    }

    /// Snapshot of the stored records
    pub fn records(&self) -> Vec<TextRecord> {
        self.records.borrow().clone()
    }

    fn check_failure(&self, op: &'static str) -> Result<(), StoreError> {
        match self.fail_with.get() {
            Some(status) => Err(StoreError::Status { op, status }),
            None => Ok(()),
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl TextStore for MemoryTextStore {
    fn list_all(&self) -> Result<Vec<TextRecord>, StoreError> {
        self.check_failure("list")?;
        if let Some(status) = self.fail_list_with.get() {
            return Err(StoreError::Status { op: "list", status });
        }
        Ok(self.records())
    }

    fn create(&self, input: &TextInput) -> Result<TextRecord, StoreError> {
        self.check_failure("create")?;
        let id = self.next_id.get().max(1);
        self.next_id.set(id + 1);
        let now = now_timestamp();
        let record = TextRecord {
            id,
            body: input.text.clone(),
            category: input.text_type,
            created_at: now.clone(),
            modified_at: now,
        };
        self.records.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn update(&self, id: i64, input: &TextInput) -> Result<TextRecord, StoreError> {
        self.check_failure("update")?;
        let mut records = self.records.borrow_mut();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.body = input.text.clone();
        record.category = input.text_type;
        record.modified_at = now_timestamp();
        Ok(record.clone())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.check_failure("delete")?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
