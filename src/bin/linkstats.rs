/// linkstats - Linkage distribution statistics for Hi-C alignments
///
/// Tallies how many distinct partner contigs each contig is linked to and
/// writes the degree list plus a bucketed histogram of the distribution.
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use hicpart::linkage::LinkageCensus;
use hicpart::report::{write_linkage_histogram, write_linkages};

#[derive(Parser)]
#[clap(
    name = "linkstats",
    about = "Linkage distribution statistics for Hi-C alignments"
)]
struct Args {
    /// Hi-C read-pair alignments (BAM)
    bam: PathBuf,

    /// Output directory
    out_dir: PathBuf,

    /// Quiet mode (warnings and errors only)
    #[clap(long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("tallying linkages from {}", args.bam.display());
    let census = LinkageCensus::from_bam(&args.bam)?;
    info!("{} contigs carry linkage", census.degrees().len());

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    write_linkages(
        BufWriter::new(File::create(args.out_dir.join("linkages.txt"))?),
        &census,
    )?;
    write_linkage_histogram(
        BufWriter::new(File::create(args.out_dir.join("linkage_dist.tsv"))?),
        &census,
    )?;

    info!("finished");
    Ok(())
}
