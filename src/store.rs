//! In-Memory Scan Record Store
//!
//! Thread-safe store for garment scan records. The write path resolves the
//! garment weight from the item type label, scores the composition through
//! the canonical calculator, and stamps timestamps; reads are owner-scoped.
//!
//! Records embed the [`ImpactResult`] fields flattened, so the serialized
//! form carries `score`, `grade`, `water_usage_liters` and
//! `carbon_footprint_kg` at the top level alongside the literal fiber list.

use crate::garment;
use crate::scorer::{self, FiberEntry, ImpactResult};
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;

/// How the fiber list was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    #[default]
    Camera,
    Manual,
}

/// One stored garment scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentRecord {
    pub id: u64,
    /// Opaque owner reference supplied by the caller; no auth semantics here
    pub owner_uid: String,
    pub brand: Option<String>,
    pub item_type: String,
    pub item_weight_grams: u32,
    /// Literal fiber list as supplied, order preserved
    pub fibers: Vec<FiberEntry>,
    #[serde(flatten)]
    pub impact: ImpactResult,
    /// Raw label text from the scanning service, if any
    pub raw_text: Option<String>,
    pub scan_type: ScanType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a scan
#[derive(Debug, Clone, Deserialize)]
pub struct NewScan {
    pub owner_uid: String,
    #[serde(default)]
    pub brand: Option<String>,
    /// Item type label; unset resolves to the generic "Garment"
    #[serde(default)]
    pub item_type: Option<String>,
    pub fibers: Vec<FiberEntry>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub scan_type: ScanType,
}

/// Payload for updating a scan
#[derive(Debug, Clone, Deserialize)]
pub struct ScanUpdate {
    pub owner_uid: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    pub fibers: Vec<FiberEntry>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Missing id, or the record belongs to a different owner. The two cases
    /// are indistinguishable to callers.
    #[error("scan {0} not found or access denied")]
    NotFound(u64),
    #[error("a scan requires at least one fiber entry")]
    EmptyFibers,
}

/// Thread-safe in-memory record store
pub struct ScanStore {
    records: RwLock<AHashMap<u64, GarmentRecord>>,
    next_id: AtomicU64,
}

impl Default for ScanStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(AHashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a scan: resolve the garment weight, score the composition,
    /// persist the record.
    pub fn create(&self, scan: NewScan) -> Result<GarmentRecord, StoreError> {
        if scan.fibers.is_empty() {
            return Err(StoreError::EmptyFibers);
        }

        let item_type = scan.item_type.unwrap_or_else(|| "Garment".to_string());
        let weight_grams = garment::estimated_weight_grams(&item_type);
        let impact = scorer::calculate_impact(&scan.fibers, weight_grams as f64);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let record = GarmentRecord {
            id,
            owner_uid: scan.owner_uid,
            brand: scan.brand,
            item_type,
            item_weight_grams: weight_grams,
            fibers: scan.fibers,
            impact,
            raw_text: scan.raw_text,
            scan_type: scan.scan_type,
            created_at: now,
            updated_at: now,
        };

        self.records.write().unwrap().insert(id, record.clone());
        tracing::debug!(
            "Created scan {} ({} fibers, {}g, grade {})",
            id,
            record.fibers.len(),
            weight_grams,
            record.impact.grade
        );
        Ok(record)
    }

    /// Fetch a single scan owned by `owner_uid`
    pub fn get(&self, id: u64, owner_uid: &str) -> Result<GarmentRecord, StoreError> {
        let records = self.records.read().unwrap();
        records
            .get(&id)
            .filter(|r| r.owner_uid == owner_uid)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// All scans for an owner, newest first
    pub fn history(&self, owner_uid: &str) -> Vec<GarmentRecord> {
        let records = self.records.read().unwrap();
        let mut scans: Vec<GarmentRecord> = records
            .values()
            .filter(|r| r.owner_uid == owner_uid)
            .cloned()
            .collect();
        scans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        scans
    }

    /// Update a scan's descriptive fields and recompute its impact.
    ///
    /// The creation-time weight estimate is kept even when the item type
    /// label changes; the recomputation runs against the stored weight.
    pub fn update(&self, id: u64, update: ScanUpdate) -> Result<GarmentRecord, StoreError> {
        if update.fibers.is_empty() {
            return Err(StoreError::EmptyFibers);
        }

        let mut records = self.records.write().unwrap();
        let record = records
            .get_mut(&id)
            .filter(|r| r.owner_uid == update.owner_uid)
            .ok_or(StoreError::NotFound(id))?;

        record.brand = update.brand;
        if let Some(item_type) = update.item_type {
            record.item_type = item_type;
        }
        record.impact = scorer::calculate_impact(&update.fibers, record.item_weight_grams as f64);
        record.fibers = update.fibers;
        record.updated_at = Utc::now();

        tracing::debug!("Updated scan {} (grade {})", id, record.impact.grade);
        Ok(record.clone())
    }

    /// Delete a scan owned by `owner_uid`
    pub fn delete(&self, id: u64, owner_uid: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();
        match records.get(&id) {
            Some(r) if r.owner_uid == owner_uid => {
                records.remove(&id);
                tracing::debug!("Deleted scan {}", id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-score every stored record against the current reference table.
    ///
    /// Run after a coefficient data-versioning event so persisted results
    /// match what the write path would produce today. Scoring is pure, so
    /// the recomputation fans out across the Rayon pool.
    pub fn recompute_all(&self) -> usize {
        let mut records = self.records.write().unwrap();
        let updates: Vec<(u64, ImpactResult)> = records
            .par_iter()
            .map(|(id, r)| {
                (
                    *id,
                    scorer::calculate_impact(&r.fibers, r.item_weight_grams as f64),
                )
            })
            .collect();

        let count = updates.len();
        for (id, impact) in updates {
            if let Some(record) = records.get_mut(&id) {
                record.impact = impact;
            }
        }
        tracing::info!("Recomputed impact for {} stored scans", count);
        count
    }
}

// ============================================================================
// TESTS
// ============================================================================
