//! Greedy, order-preserving packing.
//!
//! Single deterministic pass, first-fit against the current bucket only. This
//! is deliberately not general bin packing: preserving manifest order keeps
//! provenance and diffing stable, and the pass runs in linear time with O(1)
//! auxiliary state per bucket. A record may open a new bucket even though a
//! later, smaller record would still have fit in the previous one.

use std::collections::BTreeSet;

use stowage_core::digest::Digest;
use stowage_core::error::{Error, Result};
use stowage_core::record::FileRecord;

use crate::outcome::{Bucket, PlanOutcome};

/// Partition `records`, in the order given, into capacity-bounded buckets plus
/// the duplicates and oversized sets.
///
/// `seen` is mutated in place: every accepted record's digest is added, so a
/// later record with identical content is flagged duplicate whether it comes
/// from the same manifest, a later one, or (via a pre-seeded set) a prior run.
pub fn pack(
    records: impl IntoIterator<Item = FileRecord>,
    capacity_bytes: u64,
    dedupe: bool,
    seen: &mut BTreeSet<Digest>,
) -> Result<PlanOutcome> {
    if capacity_bytes == 0 {
        return Err(Error::Config(
            "bucket capacity must be greater than zero".to_string(),
        ));
    }

    let mut outcome = PlanOutcome::default();
    let mut current = Bucket::default();

    for rec in records {
        // Oversize check precedes the dedupe check: a record that can never be
        // placed must not enter the seen set.
        if rec.size_bytes > capacity_bytes {
            outcome.oversized.push(rec);
            continue;
        }

        if dedupe && seen.contains(&rec.digest) {
            outcome.duplicates.push(rec);
            continue;
        }
        seen.insert(rec.digest);

        // Strict `>`: a record that exactly fills the remaining capacity stays
        // in the current bucket.
        if current.total_bytes + rec.size_bytes > capacity_bytes {
            outcome.buckets.push(std::mem::take(&mut current));
        }
        current.push(rec);
    }

    if !current.is_empty() {
        outcome.buckets.push(current);
    }

    Ok(outcome)
}
