use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use bam2pe::{write::Compression, ConverterBuilder, DEFAULT_COMPRESSION_LEVEL};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version, about)]
struct Args {
    /// Input BAM to convert
    #[clap(short = 'i', long)]
    input: String,

    /// Output FASTQ for first-in-pair reads (gzip if ending in .gz)
    #[clap(short = '1', long, required_unless_present = "stream")]
    out1: Option<String>,

    /// Output FASTQ for second-in-pair reads (gzip if ending in .gz)
    #[clap(short = '2', long, required_unless_present = "stream")]
    out2: Option<String>,

    /// Write every record to stdout in input order, without pairing
    #[clap(long, conflicts_with_all = ["out1", "out2"])]
    stream: bool,

    /// Gzip-compress the output regardless of file extension
    #[clap(short = 'z', long)]
    gzip: bool,

    /// Output compression [none, gzip] (default: inferred from the extension)
    #[clap(short = 'c', long, conflicts_with = "gzip")]
    compression: Option<Compression>,

    /// Gzip compression level [1-9]
    #[clap(short = 'l', long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    level: u32,

    /// Log debug information
    #[clap(short = 'v', long)]
    verbose: bool,
}
impl Args {
    fn compression(&self) -> Option<Compression> {
        self.compression
            .or_else(|| self.gzip.then_some(Compression::Gzip))
    }

    fn builder(&self) -> ConverterBuilder {
        let mut builder = ConverterBuilder::new()
            .input(&self.input)
            .compression_level(self.level);
        if let Some(compression) = self.compression() {
            builder = builder.compression(compression);
        }
        match (&self.out1, &self.out2) {
            (Some(out1), Some(out2)) => builder.outputs(out1, out2),
            _ => builder.stream(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stats = args
        .builder()
        .run()
        .with_context(|| format!("failed to convert {}", args.input))?;
    eprintln!(
        "Converted {} records into {} FASTQ {}",
        stats.records,
        stats.written,
        if args.stream { "records" } else { "pairs" }
    );
    Ok(())
}
