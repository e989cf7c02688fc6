//! FASTQ rendering of alignment records
//!
//! Every record becomes a four-line block:
//!
//! ```text
//! @<name>[/1][/2]
//! <sequence>
//! +
//! <quality>
//! ```
//!
//! Empty sequences and absent qualities are rendered as `*`, qualities are
//! written as Phred+33, and records aligned to the reverse strand are restored
//! to their sequenced orientation (bases reverse-complemented, qualities
//! reversed).

use std::io::Write;

use crate::{nuc, AlignmentRecord, Result};

/// Placeholder written in place of an empty sequence or an absent quality string
pub const MISSING_FIELD: u8 = b'*';

/// Sentinel byte marking an absent quality score
pub const ABSENT_QUALITY: u8 = 0xFF;

/// Offset added to raw Phred scores to obtain printable characters
pub const PHRED_OFFSET: u8 = 33;

/// Appends the printable sequence of a record to `buf`
pub fn render_sequence(sequence: &[u8], buf: &mut Vec<u8>) {
    if sequence.is_empty() {
        buf.push(MISSING_FIELD);
    } else {
        buf.extend_from_slice(sequence);
    }
}

/// Appends the Phred+33 quality string of a record to `buf`
///
/// A quality array made only of [`ABSENT_QUALITY`] bytes (or an empty one) is
/// rendered as a single `*`.
pub fn render_quality(quality: &[u8], buf: &mut Vec<u8>) {
    if quality.iter().all(|&q| q == ABSENT_QUALITY) {
        buf.push(MISSING_FIELD);
    } else {
        buf.extend(quality.iter().map(|q| q.wrapping_add(PHRED_OFFSET)));
    }
}

/// Renders records as FASTQ while reusing its internal buffers between calls
#[derive(Debug, Default)]
pub struct FastqFormatter {
    seq: Vec<u8>,
    qual: Vec<u8>,
}

impl FastqFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single record as a FASTQ block
    pub fn write_record<W: Write>(&mut self, writer: &mut W, record: &AlignmentRecord) -> Result<()> {
        self.seq.clear();
        self.qual.clear();
        render_sequence(record.sequence(), &mut self.seq);
        render_quality(record.quality(), &mut self.qual);

        if record.is_reverse() {
            nuc::reverse_complement_in_place(&mut self.seq);
            self.qual.reverse();
        }

        writer.write_all(b"@")?;
        writer.write_all(record.name())?;
        if record.is_read1() {
            writer.write_all(b"/1")?;
        }
        if record.is_read2() {
            writer.write_all(b"/2")?;
        }
        writer.write_all(b"\n")?;
        writer.write_all(&self.seq)?;
        writer.write_all(b"\n")?;
        writer.write_all(b"+\n")?;
        writer.write_all(&self.qual)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Writes a single record as a FASTQ block
///
/// Prefer [`FastqFormatter`] when writing many records.
pub fn write_fastq<W: Write>(writer: &mut W, record: &AlignmentRecord) -> Result<()> {
    FastqFormatter::new().write_record(writer, record)
}

/// Renders a single record into an owned FASTQ block
///
/// # Example
///
/// ```
/// use bam2pe::{fastq, AlignmentRecordBuilder};
/// use noodles::sam::alignment::record::Flags;
///
/// let record = AlignmentRecordBuilder::default()
///     .name(b"read1")
///     .flags(Flags::SEGMENTED | Flags::FIRST_SEGMENT)
///     .sequence(b"ACGT")
///     .quality(&[0xFF; 4])
///     .build();
///
/// assert_eq!(fastq::format_fastq(&record)?, b"@read1/1\nACGT\n+\n*\n");
/// # Ok::<(), bam2pe::Error>(())
/// ```
pub fn format_fastq(record: &AlignmentRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    FastqFormatter::new().write_record(&mut buf, record)?;
    Ok(buf)
}
