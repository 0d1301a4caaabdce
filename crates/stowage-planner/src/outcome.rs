//! Planner output: buckets plus the records diverted away from them.

use serde::{Deserialize, Serialize};
use stowage_core::record::FileRecord;

/// An ordered group of records bound for one output bucket.
///
/// Invariant: `total_bytes` is the sum of the records' sizes and never exceeds
/// the capacity the bucket was planned with. Buckets are never emitted empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bucket {
    pub records: Vec<FileRecord>,
    pub total_bytes: u64,
}

impl Bucket {
    pub(crate) fn push(&mut self, rec: FileRecord) {
        self.total_bytes += rec.size_bytes;
        self.records.push(rec);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The planner's partition of its input. Every input record lands in exactly
/// one of the three sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub buckets: Vec<Bucket>,
    pub duplicates: Vec<FileRecord>,
    pub oversized: Vec<FileRecord>,
}

impl PlanOutcome {
    /// Total records across all three sets.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum::<usize>()
            + self.duplicates.len()
            + self.oversized.len()
    }

    /// Bytes across all buckets (duplicates and oversized excluded).
    pub fn bucketed_bytes(&self) -> u64 {
        self.buckets.iter().map(|b| b.total_bytes).sum()
    }
}
