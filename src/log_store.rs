use crate::capture_record::CaptureRecord;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Append-only, oldest-first log of completed scans. Lives for the process
/// only.
#[derive(Debug, Default)]
pub struct LogStore {
    records: Vec<Arc<CaptureRecord>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: CaptureRecord) {
        self.records.push(Arc::new(record));
    }

    /// Snapshot in insertion order.
    pub fn all(&self) -> Vec<Arc<CaptureRecord>> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<Arc<CaptureRecord>> {
        self.records.last().cloned()
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<CaptureRecord>> {
        self.records.iter().find(|record| record.id() == id).cloned()
    }
}

/// Shares one store between the runtime, its only writer, and any number of
/// readers.
#[derive(Debug, Clone, Default)]
pub struct LogStoreHandle {
    inner: Arc<RwLock<LogStore>>,
}

impl LogStoreHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&self, record: CaptureRecord) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(record);
    }

    pub fn all(&self) -> Vec<Arc<CaptureRecord>> {
        self.read(LogStore::all)
    }

    pub fn len(&self) -> usize {
        self.read(LogStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(LogStore::is_empty)
    }

    pub fn latest(&self) -> Option<Arc<CaptureRecord>> {
        self.read(LogStore::latest)
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<CaptureRecord>> {
        self.read(|store| store.get(id))
    }

    fn read<T>(&self, f: impl FnOnce(&LogStore) -> T) -> T {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }
}
