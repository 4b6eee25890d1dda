use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::StoreError;
use crate::models::PurchaseRecord;

/// 采购记录持久化协作方
pub trait PurchaseRepository: Send + Sync {
    /// 保存记录并返回带 id 的副本
    fn create(&self, record: PurchaseRecord) -> Result<PurchaseRecord, StoreError>;

    /// 按 id 升序列出
    fn list(&self) -> Vec<PurchaseRecord>;
}

/// 内存采购记录存储
#[derive(Debug)]
pub struct InMemoryPurchaseStore {
    records: DashMap<u64, PurchaseRecord>,
    next_id: AtomicU64,
    capacity: usize,
}

impl InMemoryPurchaseStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PurchaseRepository for InMemoryPurchaseStore {
    fn create(&self, mut record: PurchaseRecord) -> Result<PurchaseRecord, StoreError> {
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded(self.capacity));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.id = Some(id);
        self.records.insert(id, record.clone());
        tracing::debug!("Purchase {} stored, {} records total", id, self.records.len());
        Ok(record)
    }

    fn list(&self) -> Vec<PurchaseRecord> {
        let mut records: Vec<PurchaseRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|r| r.id);
        records
    }
}
