//! FASTQ output streams
//!
//! This module opens the mate output files (optionally gzip compressed through
//! `flate2`) and provides [`PairWriter`], which writes matched mates from a
//! set of [`PairTables`] to two parallel streams.
//!
//! Compressed streams are finalized explicitly by [`FinishWrite::finish_write`]
//! so that a failure to write the gzip trailer is reported instead of being
//! lost when the encoder is dropped.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use flate2::write::GzEncoder;

use crate::{
    error::{ConfigError, WriteError},
    fastq::FastqFormatter,
    pair::PairTables,
    AlignmentRecord, Result,
};

/// A type-erased output stream
pub type BoxedWrite = Box<dyn Write>;

/// Compression applied to an output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Plain-text FASTQ
    #[default]
    None,
    /// Gzip-compressed FASTQ
    Gzip,
}
impl FromStr for Compression {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" | "plain" | "u" => Ok(Self::None),
            "gzip" | "gz" | "z" => Ok(Self::Gzip),
            _ => Err(format!("Unknown compression: {s}")),
        }
    }
}

impl Compression {
    /// Picks the compression matching the extension of a path (`.gz` selects gzip)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Self::Gzip,
            _ => Self::None,
        }
    }
}

/// Converts a gzip level into the codec's level
pub fn compression_level(level: u32) -> Result<flate2::Compression> {
    if (1..=9).contains(&level) {
        Ok(flate2::Compression::new(level))
    } else {
        Err(ConfigError::InvalidCompressionLevel(level).into())
    }
}

/// Streams that need a final step once every record has been written
pub trait FinishWrite: Write {
    /// Writes out buffered data along with any codec trailer
    ///
    /// Nothing may be written to the stream afterwards.
    fn finish_write(&mut self) -> Result<()>;
}

impl FinishWrite for Vec<u8> {
    fn finish_write(&mut self) -> Result<()> {
        Ok(())
    }
}

/// An output stream, gzip compressed or not
pub enum OutputStream {
    Plain(BoxedWrite),
    Gzip(GzEncoder<BoxedWrite>),
}

impl OutputStream {
    /// Wraps a stream in the requested compression codec
    pub fn new(handle: BoxedWrite, compression: Compression, level: u32) -> Result<Self> {
        match compression {
            Compression::None => Ok(Self::Plain(handle)),
            Compression::Gzip => Ok(Self::Gzip(GzEncoder::new(
                handle,
                compression_level(level)?,
            ))),
        }
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        match self {
            Self::Plain(_) => Compression::None,
            Self::Gzip(_) => Compression::Gzip,
        }
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(inner) => inner.write(buf),
            Self::Gzip(inner) => inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(inner) => inner.flush(),
            Self::Gzip(inner) => inner.flush(),
        }
    }
}

impl FinishWrite for OutputStream {
    fn finish_write(&mut self) -> Result<()> {
        let result = match self {
            Self::Plain(inner) => inner.flush(),
            Self::Gzip(encoder) => encoder
                .try_finish()
                .and_then(|()| encoder.get_mut().flush()),
        };
        result.map_err(WriteError::Finish)?;
        Ok(())
    }
}

/// Creates an output file and wraps it in the requested compression codec
pub fn open_output<P: AsRef<Path>>(
    path: P,
    compression: Compression,
    level: u32,
) -> Result<OutputStream> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.display().to_string(),
        source,
    })?;
    OutputStream::new(Box::new(BufWriter::new(file)), compression, level)
}

/// Writes matched mates to two parallel FASTQ streams
///
/// # Example
///
/// ```
/// use bam2pe::{pair::PairTables, write::PairWriter, AlignmentRecordBuilder};
/// use noodles::sam::alignment::record::Flags;
///
/// let mut tables = PairTables::new();
/// tables.insert(
///     AlignmentRecordBuilder::default()
///         .name(b"read1")
///         .flags(Flags::FIRST_SEGMENT)
///         .sequence(b"ACGT")
///         .build(),
/// );
/// tables.insert(
///     AlignmentRecordBuilder::default()
///         .name(b"read1")
///         .flags(Flags::LAST_SEGMENT | Flags::REVERSE_COMPLEMENTED)
///         .sequence(b"AACG")
///         .build(),
/// );
///
/// let mut writer = PairWriter::new(Vec::new(), Vec::new());
/// assert_eq!(writer.write_pairs(&tables).unwrap(), 1);
/// let (mate1, mate2) = writer.finish().unwrap();
/// assert_eq!(mate1, b"@read1/1\nACGT\n+\n*\n");
/// assert_eq!(mate2, b"@read1/2\nCGTT\n+\n*\n");
/// ```
pub struct PairWriter<W1: FinishWrite, W2: FinishWrite> {
    mate1: W1,
    mate2: W2,
    formatter: FastqFormatter,
    n_pairs: usize,
}

impl<W1: FinishWrite, W2: FinishWrite> PairWriter<W1, W2> {
    pub fn new(mate1: W1, mate2: W2) -> Self {
        Self {
            mate1,
            mate2,
            formatter: FastqFormatter::new(),
            n_pairs: 0,
        }
    }

    /// Writes one pair of mates, one record per stream
    pub fn write_pair(&mut self, r1: &AlignmentRecord, r2: &AlignmentRecord) -> Result<()> {
        self.formatter.write_record(&mut self.mate1, r1)?;
        self.formatter.write_record(&mut self.mate2, r2)?;
        self.n_pairs += 1;
        Ok(())
    }

    /// Writes every name found in both tables and returns the number of pairs written
    ///
    /// First-in-pair records without a mate are skipped without notice.
    pub fn write_pairs(&mut self, tables: &PairTables) -> Result<usize> {
        let mut n_written = 0;
        for (r1, r2) in tables.pairs() {
            self.write_pair(r1, r2)?;
            n_written += 1;
        }
        Ok(n_written)
    }

    /// Total number of pairs written so far
    #[must_use]
    pub fn n_pairs(&self) -> usize {
        self.n_pairs
    }

    /// Flushes and finalizes both streams, then hands them back
    ///
    /// Compressed streams have written their gzip trailer once this returns `Ok`.
    pub fn finish(mut self) -> Result<(W1, W2)> {
        self.mate1.flush().map_err(WriteError::Finish)?;
        self.mate2.flush().map_err(WriteError::Finish)?;
        self.mate1.finish_write()?;
        self.mate2.finish_write()?;
        Ok((self.mate1, self.mate2))
    }
}

impl PairWriter<OutputStream, OutputStream> {
    /// Opens both mate files
    ///
    /// When `compression` is `None` each file picks its compression from its own extension.
    pub fn from_paths<P: AsRef<Path>>(
        path1: P,
        path2: P,
        compression: Option<Compression>,
        level: u32,
    ) -> Result<Self> {
        let compression1 = compression.unwrap_or_else(|| Compression::from_path(&path1));
        let compression2 = compression.unwrap_or_else(|| Compression::from_path(&path2));
        let mate1 = open_output(path1, compression1, level)?;
        let mate2 = open_output(path2, compression2, level)?;
        Ok(Self::new(mate1, mate2))
    }
}
