//! BAM to FASTQ conversion driver
//!
//! [`ConverterBuilder`] wires the record reader, the pairing step and the
//! writers together. Two modes are available:
//!
//! * **paired** (the default): every record is read, bucketed by mate, and the
//!   matched pairs are written to two files, one per mate.
//! * **stream**: every record is written, in input order and without pairing,
//!   to a single caller-provided stream.
//!
//! # Example
//!
//! ```rust,no_run
//! use bam2pe::ConverterBuilder;
//!
//! let stats = ConverterBuilder::default()
//!     .input("sample.bam")
//!     .outputs("sample_1.fq.gz", "sample_2.fq.gz")
//!     .compression_level(4)
//!     .run()?;
//! println!("{} pairs written", stats.written);
//! # Ok::<(), bam2pe::Error>(())
//! ```

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::ConfigError,
    fastq::FastqFormatter,
    pair::pair_records,
    read::{self, BamReader},
    write::{compression_level, BoxedWrite, Compression, FinishWrite, OutputStream, PairWriter},
    Result, DEFAULT_COMPRESSION_LEVEL,
};

/// Destination of the converted records
enum Output {
    /// One file per mate
    Paired(PathBuf, PathBuf),
    /// A single stream receiving every record
    Stream(BoxedWrite),
}

/// Counters collected over a conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Records decoded from the input
    pub records: usize,
    /// Distinct names held in the first-in-pair table
    pub read1: usize,
    /// Distinct names held in the second-in-pair table
    pub read2: usize,
    /// Records carrying neither pair flag
    pub dropped: usize,
    /// First-in-pair names without a mate
    pub unpaired: usize,
    /// Pairs (paired mode) or records (stream mode) written
    pub written: usize,
}

/// Builder for a BAM to FASTQ conversion
pub struct ConverterBuilder {
    input: Option<PathBuf>,
    output: Option<Output>,
    compression: Option<Compression>,
    level: u32,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            compression: None,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ConverterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read records from a BAM file
    #[must_use]
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Write matched mates to two files (R1, R2)
    #[must_use]
    pub fn outputs<P: AsRef<Path>>(mut self, r1: P, r2: P) -> Self {
        self.output = Some(Output::Paired(
            r1.as_ref().to_path_buf(),
            r2.as_ref().to_path_buf(),
        ));
        self
    }

    /// Write every record, unpaired and in input order, to a single stream
    #[must_use]
    pub fn stream(mut self, writer: BoxedWrite) -> Self {
        self.output = Some(Output::Stream(writer));
        self
    }

    /// Force the output compression
    ///
    /// If not set, paired outputs pick their compression from their extension
    /// and streams are left uncompressed.
    #[must_use]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Set the gzip level (`1..=9`)
    #[must_use]
    pub fn compression_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Execute the conversion
    ///
    /// The configuration is validated before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input or no output was configured
    /// - The compression level is outside `1..=9`
    /// - The input cannot be opened or a record fails to decode
    /// - An output cannot be created or written
    pub fn run(self) -> Result<ConvertStats> {
        let Some(input) = self.input else {
            return Err(ConfigError::MissingInput.into());
        };
        let Some(output) = self.output else {
            return Err(ConfigError::MissingOutput.into());
        };
        compression_level(self.level)?;

        match output {
            Output::Paired(path1, path2) => {
                debug!(
                    input = %input.display(),
                    out1 = %path1.display(),
                    out2 = %path2.display(),
                    "converting to paired FASTQ"
                );
                let writer = PairWriter::from_paths(&path1, &path2, self.compression, self.level)?;
                let reader = read::from_path(&input)?;
                convert_paired(reader, writer)
            }
            Output::Stream(handle) => {
                debug!(input = %input.display(), "streaming FASTQ");
                let writer =
                    OutputStream::new(handle, self.compression.unwrap_or_default(), self.level)?;
                let reader = read::from_path(&input)?;
                convert_stream(reader, writer)
            }
        }
    }
}

/// Reads every record, pairs them by name, and writes the matched mates
pub fn convert_paired<R, W1, W2>(
    reader: BamReader<R>,
    mut writer: PairWriter<W1, W2>,
) -> Result<ConvertStats>
where
    R: Read,
    W1: FinishWrite,
    W2: FinishWrite,
{
    let tables = pair_records(reader)?;
    debug!(
        read1 = tables.read1().len(),
        read2 = tables.read2().len(),
        dropped = tables.n_dropped(),
        "paired records"
    );

    let pairs = writer.write_pairs(&tables)?;
    writer.finish()?;

    let stats = ConvertStats {
        records: tables.n_records(),
        read1: tables.read1().len(),
        read2: tables.read2().len(),
        dropped: tables.n_dropped(),
        unpaired: tables.n_unpaired(),
        written: pairs,
    };
    debug!(unpaired = stats.unpaired, "skipped first-in-pair reads without mate");
    info!(records = stats.records, pairs = stats.written, "conversion complete");
    Ok(stats)
}

/// Writes every record to a single stream in input order
pub fn convert_stream<R, W>(reader: BamReader<R>, mut writer: W) -> Result<ConvertStats>
where
    R: Read,
    W: FinishWrite,
{
    let mut formatter = FastqFormatter::new();
    let mut stats = ConvertStats::default();
    for record in reader {
        let record = record?;
        formatter.write_record(&mut writer, &record)?;
        stats.records += 1;
        stats.written += 1;
    }
    writer.finish_write()?;
    info!(records = stats.records, "conversion complete");
    Ok(stats)
}
