//! Writers for the run's output artifacts. Each takes any `io::Write` sink
//! so formats stay testable without touching the filesystem.

use anyhow::Result;
use std::io::Write;

use crate::contacts::Edge;
use crate::contigs::ContigSet;
use crate::linkage::{LinkageCensus, BUCKET_WIDTH};
use crate::partition::Group;

/// Edge report: `contigA\tcontigB\tcount\toverlap`, one line per edge, in
/// the order given (canonical pair order in the pipeline).
pub fn write_signal<W: Write>(mut out: W, edges: &[Edge], contigs: &ContigSet) -> Result<()> {
    for e in edges {
        writeln!(
            out,
            "{}\t{}\t{}\t{:.6}",
            contigs.name(e.i),
            contigs.name(e.j),
            e.count,
            e.overlap
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Removal log: `Remove <n>: <contigA>, <contigB>, <count>, <overlap>`,
/// 1-indexed over the elimination order.
pub fn write_removals<W: Write>(mut out: W, removed: &[Edge], contigs: &ContigSet) -> Result<()> {
    for (n, e) in removed.iter().enumerate() {
        writeln!(
            out,
            "Remove {}: {}, {}, {}, {:.6}",
            n + 1,
            contigs.name(e.i),
            contigs.name(e.j),
            e.count,
            e.overlap
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Group report: `group<k>\t<members tab-separated>`, largest total length
/// first, groups numbered from 1.
pub fn write_groups<W: Write>(mut out: W, groups: &[Group], contigs: &ContigSet) -> Result<()> {
    for (k, group) in groups.iter().enumerate() {
        write!(out, "group{}", k + 1)?;
        for &idx in &group.members {
            write!(out, "\t{}", contigs.name(idx))?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Linkage list: `contig\tdegree`, degree descending.
pub fn write_linkages<W: Write>(mut out: W, census: &LinkageCensus) -> Result<()> {
    for (name, degree) in census.degrees() {
        writeln!(out, "{name}\t{degree}")?;
    }
    out.flush()?;
    Ok(())
}

/// Degree histogram: `bucket_start\tcount`, ascending bucket order.
pub fn write_linkage_histogram<W: Write>(mut out: W, census: &LinkageCensus) -> Result<()> {
    for (bucket, count) in census.histogram() {
        writeln!(out, "{}\t{}", bucket * BUCKET_WIDTH, count)?;
    }
    out.flush()?;
    Ok(())
}
