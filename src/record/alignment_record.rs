use noodles::{bam, sam::alignment::record::Flags};

/// Name used for records that carry no read name
pub const MISSING_NAME: &[u8] = b"*";

/// An owned alignment record holding the fields needed to render FASTQ.
///
/// Quality scores are kept as raw Phred values exactly as stored in the
/// container, so an absent quality string shows up as a run of `0xFF` bytes
/// (or as an empty array).
///
/// # Example
///
/// ```
/// use bam2pe::AlignmentRecordBuilder;
/// use noodles::sam::alignment::record::Flags;
///
/// let record = AlignmentRecordBuilder::default()
///     .name(b"read1")
///     .flags(Flags::SEGMENTED | Flags::FIRST_SEGMENT)
///     .sequence(b"ACGT")
///     .quality(&[30, 30, 20, 10])
///     .build();
///
/// assert!(record.is_read1());
/// assert!(!record.is_reverse());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    name: Vec<u8>,
    flags: Flags,
    sequence: Vec<u8>,
    quality: Vec<u8>,
}

impl AlignmentRecord {
    #[must_use]
    pub fn new(name: Vec<u8>, flags: Flags, sequence: Vec<u8>, quality: Vec<u8>) -> Self {
        Self {
            name,
            flags,
            sequence,
            quality,
        }
    }

    /// Copies the relevant fields out of a lazily decoded BAM record
    #[must_use]
    pub fn from_bam(record: &bam::Record) -> Self {
        let name = record
            .name()
            .map_or_else(|| MISSING_NAME.to_vec(), |name| name.to_vec());
        Self {
            name,
            flags: record.flags(),
            sequence: record.sequence().iter().collect(),
            quality: record.quality_scores().as_ref().to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns the bases as ASCII
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Returns the raw Phred quality scores
    #[inline]
    #[must_use]
    pub fn quality(&self) -> &[u8] {
        &self.quality
    }

    /// Returns true if the record is the first segment of its template
    #[inline]
    #[must_use]
    pub fn is_read1(&self) -> bool {
        self.flags.is_first_segment()
    }

    /// Returns true if the record is the last segment of its template
    #[inline]
    #[must_use]
    pub fn is_read2(&self) -> bool {
        self.flags.is_last_segment()
    }

    /// Returns true if the record is aligned to the reverse strand
    #[inline]
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.flags.is_reverse_complemented()
    }
}

/// A convenience builder for [`AlignmentRecord`]
///
/// Unset fields default to an empty value, except the name which defaults to `*`.
pub struct AlignmentRecordBuilder<'a> {
    name: Option<&'a [u8]>,
    flags: Flags,
    sequence: &'a [u8],
    quality: &'a [u8],
}

impl Default for AlignmentRecordBuilder<'_> {
    fn default() -> Self {
        Self {
            name: None,
            flags: Flags::empty(),
            sequence: &[],
            quality: &[],
        }
    }
}

impl<'a> AlignmentRecordBuilder<'a> {
    /// Sets the read name
    #[must_use]
    pub fn name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the SAM flags
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the bases
    #[must_use]
    pub fn sequence(mut self, sequence: &'a [u8]) -> Self {
        self.sequence = sequence;
        self
    }

    /// Sets the raw Phred quality scores
    #[must_use]
    pub fn quality(mut self, quality: &'a [u8]) -> Self {
        self.quality = quality;
        self
    }

    /// Builds the `AlignmentRecord`
    #[must_use]
    pub fn build(self) -> AlignmentRecord {
        AlignmentRecord {
            name: self.name.unwrap_or(MISSING_NAME).to_vec(),
            flags: self.flags,
            sequence: self.sequence.to_vec(),
            quality: self.quality.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = AlignmentRecordBuilder::default().build();
        assert_eq!(record.name(), MISSING_NAME);
        assert!(record.flags().is_empty());
        assert!(record.sequence().is_empty());
        assert!(record.quality().is_empty());
    }

    #[test]
    fn test_flag_accessors() {
        let record = AlignmentRecordBuilder::default()
            .flags(Flags::LAST_SEGMENT | Flags::REVERSE_COMPLEMENTED)
            .build();
        assert!(!record.is_read1());
        assert!(record.is_read2());
        assert!(record.is_reverse());
    }

    #[test]
    fn test_both_segment_flags() {
        let record = AlignmentRecordBuilder::default()
            .flags(Flags::FIRST_SEGMENT | Flags::LAST_SEGMENT)
            .build();
        assert!(record.is_read1());
        assert!(record.is_read2());
    }

    #[test]
    fn test_new_matches_builder() {
        let built = AlignmentRecordBuilder::default()
            .name(b"r")
            .flags(Flags::FIRST_SEGMENT)
            .sequence(b"AC")
            .quality(&[1, 2])
            .build();
        let direct = AlignmentRecord::new(
            b"r".to_vec(),
            Flags::FIRST_SEGMENT,
            b"AC".to_vec(),
            vec![1, 2],
        );
        assert_eq!(built, direct);
    }
}
