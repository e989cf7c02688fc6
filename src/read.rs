use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};

use noodles::{bam, sam};
use tracing::{debug, warn};

use crate::{error::ReadError, AlignmentRecord, Result};

/// The empty BGZF block every well-formed BAM file ends with
pub const BGZF_EOF: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02, 0x00,
    0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Checks whether a stream ends with the BGZF EOF marker block
///
/// The stream position is restored to the start afterwards.
pub fn has_bgzf_eof<R: Read + Seek>(inner: &mut R) -> io::Result<bool> {
    let len = inner.seek(SeekFrom::End(0))?;
    let marker_len = BGZF_EOF.len() as u64;
    let found = if len < marker_len {
        false
    } else {
        let mut tail = [0u8; BGZF_EOF.len()];
        inner.seek(SeekFrom::Start(len - marker_len))?;
        inner.read_exact(&mut tail)?;
        tail == BGZF_EOF
    };
    inner.seek(SeekFrom::Start(0))?;
    Ok(found)
}

/// Streams [`AlignmentRecord`]s out of a BAM container
///
/// Iterating yields one `Result` per record. A decode failure is yielded once
/// and ends the iteration.
pub struct BamReader<R: Read> {
    inner: bam::io::Reader<R>,
    header: sam::Header,
    record: bam::Record,
    n_records: usize,
    finished: bool,
}

impl<R: Read> BamReader<R> {
    /// Reads the container header and prepares to stream records
    pub fn new(mut inner: bam::io::Reader<R>) -> Result<Self> {
        let header = inner.read_header().map_err(ReadError::Header)?;
        debug!(
            reference_sequences = header.reference_sequences().len(),
            "read BAM header"
        );
        Ok(Self {
            inner,
            header,
            record: bam::Record::default(),
            n_records: 0,
            finished: false,
        })
    }

    /// Returns the decoded container header
    #[must_use]
    pub fn header(&self) -> &sam::Header {
        &self.header
    }

    /// Number of records decoded so far
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Decodes the next record
    ///
    /// Returns `Ok(None)` at the end of the input.
    pub fn read_record(&mut self) -> Result<Option<AlignmentRecord>> {
        match self.inner.read_record(&mut self.record) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.n_records += 1;
                Ok(Some(AlignmentRecord::from_bam(&self.record)))
            }
            Err(source) => Err(ReadError::Decode {
                index: self.n_records,
                source,
            }
            .into()),
        }
    }
}

impl<R: Read> Iterator for BamReader<R> {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Opens a BAM stream from any seekable source
///
/// A missing BGZF EOF marker is reported as a warning and reading continues.
pub fn from_reader<R: Read + Seek>(mut inner: R, label: &str) -> Result<BamReader<impl Read>> {
    if !has_bgzf_eof(&mut inner)? {
        warn!("file {label:?} has no bgzf magic block: may be truncated");
    }
    BamReader::new(bam::io::Reader::new(inner))
}

/// Opens a BAM file from a path
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BamReader<impl Read>> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: label.clone(),
        source,
    })?;
    from_reader(file, &label)
}
