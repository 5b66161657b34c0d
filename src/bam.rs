use anyhow::{bail, Context, Result};
use rust_htslib::bam::{self, Read};
use std::collections::HashSet;
use std::path::Path;

use crate::contacts::ContactMap;
use crate::contigs::ContigSet;

/// How a BAM header target resolves against the assembly.
enum TargetSlot {
    /// Retained contig, with its index
    Contig(u32),
    /// Named in the exclusion list; records touching it are skipped
    Excluded,
    /// Not in the assembly at all; fails on first reference by a record
    Unknown(String),
}

/// Aggregate read-pair contacts from a coordinate-agnostic scan of a BAM
/// file. Each record contributes the unordered pair (own reference, mate
/// reference); unmapped ends, self-pairs, and excluded contigs are skipped.
///
/// A record referencing a contig that is neither in the assembly nor
/// excluded is an inconsistency between the alignments and the assembly and
/// is surfaced as an error, not skipped.
pub fn scan_contacts<P: AsRef<Path>>(
    path: P,
    contigs: &ContigSet,
    exclude: &HashSet<String>,
) -> Result<ContactMap> {
    let path = path.as_ref();
    let mut reader = bam::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    // Resolve header targets once; unknown targets stay lazy so a stale
    // header entry that no record references cannot fail the run.
    let slots: Vec<TargetSlot> = reader
        .header()
        .target_names()
        .iter()
        .map(|raw| {
            let name = String::from_utf8_lossy(raw).into_owned();
            if exclude.contains(&name) {
                TargetSlot::Excluded
            } else if let Some(idx) = contigs.index_of(&name) {
                TargetSlot::Contig(idx)
            } else {
                TargetSlot::Unknown(name)
            }
        })
        .collect();

    let mut contacts = ContactMap::new(contigs.len());
    let mut record = bam::Record::new();

    while let Some(result) = reader.read(&mut record) {
        result.with_context(|| format!("failed to read {}", path.display()))?;

        let tid = record.tid();
        let mtid = record.mtid();
        if tid < 0 || mtid < 0 || record.pos() < 0 || record.mpos() < 0 {
            continue;
        }
        if tid == mtid {
            continue;
        }

        let (Some(a), Some(b)) = (
            resolve(&slots, tid as usize, path)?,
            resolve(&slots, mtid as usize, path)?,
        ) else {
            continue;
        };

        contacts.record(a, b);
    }

    Ok(contacts)
}

fn resolve(slots: &[TargetSlot], tid: usize, path: &Path) -> Result<Option<u32>> {
    match &slots[tid] {
        TargetSlot::Contig(idx) => Ok(Some(*idx)),
        TargetSlot::Excluded => Ok(None),
        TargetSlot::Unknown(name) => bail!(
            "contig {} is referenced by alignments in {} but missing from the assembly",
            name,
            path.display()
        ),
    }
}
