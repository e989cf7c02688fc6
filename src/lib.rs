//! # bam2pe
//!
//! Converts paired-end alignment records stored in BAM into mate-split FASTQ.
//!
//! Records are matched by read name: first-in-pair records go to one output,
//! their second-in-pair mates to the other. Reads aligned to the reverse strand
//! are reverse-complemented back to their sequenced orientation. Decoding of the
//! BAM/BGZF container itself is handled by `noodles`.

pub mod convert;
pub mod error;
pub mod fastq;
pub mod nuc;
pub mod pair;
pub mod read;
mod record;
pub mod write;

pub use convert::{ConvertStats, ConverterBuilder};
pub use error::{Error, Result};
pub use record::{AlignmentRecord, AlignmentRecordBuilder, MISSING_NAME};

/// Gzip level used for compressed outputs unless configured otherwise
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
