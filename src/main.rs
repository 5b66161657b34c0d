use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use hicpart::anchors::AnchorSets;
use hicpart::bam::scan_contacts;
use hicpart::contigs::ContigSet;
use hicpart::input::read_name_list;
use hicpart::partition::{partition, PartitionConfig, PartitionStatus};
use hicpart::report::{write_groups, write_removals, write_signal};

/// hicpart - partition a polyploid contig assembly into chromosome-scale
/// groups from Hi-C contact signal
///
/// Consumes read-pair alignments against the contig assembly plus a gene
/// anchor table, builds a contact graph penalized for allelic redundancy,
/// and prunes it until the groups are balanced.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Contig-level assembly FASTA (.gz accepted)
    #[clap(short = 'r', long = "ref")]
    ref_fasta: PathBuf,

    /// Hi-C read-pair alignments against the assembly (BAM)
    #[clap(short = 'b', long = "bam")]
    bam: PathBuf,

    /// BED table of gene placements on contigs (col 1 contig, col 4 gene)
    #[clap(short = 'd', long = "bed")]
    bed: PathBuf,

    /// Anchors table mapping genes to reference bins (col 1 gene, col 2 bin)
    #[clap(short = 'a', long = "anchors")]
    anchors: PathBuf,

    /// Number of chromosome-scale groups to produce
    #[clap(short = 'p', long = "ploidy")]
    ploidy: usize,

    /// File listing contigs to exclude from partitioning, one per line
    #[clap(short = 'e', long = "exclude")]
    exclude: Option<PathBuf>,

    /// Output directory
    #[clap(short = 'o', long = "out", default_value = "workdir")]
    out_dir: PathBuf,

    /// Abort after this many elimination rounds
    #[clap(long = "max-rounds")]
    max_rounds: Option<usize>,

    /// Quiet mode (warnings and errors only)
    #[clap(long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.ploidy == 0 {
        bail!("--ploidy must be at least 1");
    }

    let exclude: HashSet<String> = match &args.exclude {
        Some(path) => read_name_list(path)?,
        None => HashSet::new(),
    };

    info!("loading assembly from {}", args.ref_fasta.display());
    let contigs = ContigSet::from_fasta(&args.ref_fasta, &exclude)?;
    if contigs.is_empty() {
        bail!("no contigs retained from {}", args.ref_fasta.display());
    }
    info!("{} contigs retained", contigs.len());

    info!("loading anchors");
    let anchors = AnchorSets::load(&args.anchors, &args.bed, &contigs)?;

    info!("aggregating contacts from {}", args.bam.display());
    let contacts = scan_contacts(&args.bam, &contigs, &exclude)?;
    info!("{} contig pairs observed", contacts.pair_count());
    let edges = contacts.into_edges(&anchors);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    info!("writing signal list");
    write_signal(
        BufWriter::new(File::create(args.out_dir.join("signal.txt"))?),
        &edges,
        &contigs,
    )?;

    let config = PartitionConfig {
        target_groups: args.ploidy,
        max_rounds: args.max_rounds,
    };
    let result = partition(edges, contigs.lengths(), &config);
    info!(
        "{} groups after {} rounds, {} edges removed",
        result.groups.len(),
        result.rounds,
        result.removed
    );

    write_removals(
        BufWriter::new(File::create(args.out_dir.join("remove.list"))?),
        result.removed_edges(),
        &contigs,
    )?;

    info!("writing group list");
    write_groups(
        BufWriter::new(File::create(args.out_dir.join("group.txt"))?),
        &result.groups,
        &contigs,
    )?;

    match result.status {
        PartitionStatus::Balanced => {
            info!("finished");
            Ok(())
        }
        PartitionStatus::EdgesExhausted => bail!(
            "could not satisfy balance target: edge list exhausted before \
             {} balanced groups emerged",
            args.ploidy
        ),
        PartitionStatus::RoundLimit => bail!(
            "could not satisfy balance target within {} rounds",
            result.rounds
        ),
    }
}
