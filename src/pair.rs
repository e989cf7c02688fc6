//! Pairing of alignment records by read name
//!
//! Records are bucketed into two name-keyed tables, one per mate. The
//! first-segment and last-segment flags are tested independently, so a record
//! carrying both lands in both tables and a record carrying neither is dropped.
//! When a name repeats within a table the later record replaces the earlier one.

use std::collections::HashMap;

use crate::{AlignmentRecord, Result};

/// Mapping from read name to a single mate
pub type PairTable = HashMap<Vec<u8>, AlignmentRecord>;

/// Where [`PairTables::insert`] stored a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First-in-pair table only
    Read1,
    /// Second-in-pair table only
    Read2,
    /// Both tables, the record carries both pair flags
    Both,
    /// Neither pair flag was set
    Dropped,
}

/// The two mate tables built by the pairing step
#[derive(Debug, Default)]
pub struct PairTables {
    read1: PairTable,
    read2: PairTable,
    n_records: usize,
    n_dropped: usize,
}

impl PairTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record in the mate table(s) selected by its flags
    pub fn insert(&mut self, record: AlignmentRecord) -> Placement {
        self.n_records += 1;
        match (record.is_read1(), record.is_read2()) {
            (true, true) => {
                self.read2.insert(record.name().to_vec(), record.clone());
                self.read1.insert(record.name().to_vec(), record);
                Placement::Both
            }
            (true, false) => {
                self.read1.insert(record.name().to_vec(), record);
                Placement::Read1
            }
            (false, true) => {
                self.read2.insert(record.name().to_vec(), record);
                Placement::Read2
            }
            (false, false) => {
                self.n_dropped += 1;
                Placement::Dropped
            }
        }
    }

    /// Returns the first-in-pair table
    #[must_use]
    pub fn read1(&self) -> &PairTable {
        &self.read1
    }

    /// Returns the second-in-pair table
    #[must_use]
    pub fn read2(&self) -> &PairTable {
        &self.read2
    }

    /// Number of records offered to [`PairTables::insert`]
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Number of records dropped for carrying no pair flag
    #[must_use]
    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }

    /// Iterates over matched mates as `(read1, read2)`
    ///
    /// Names present only in the first table are skipped. The iteration order
    /// across names is unspecified.
    pub fn pairs(&self) -> impl Iterator<Item = (&AlignmentRecord, &AlignmentRecord)> + '_ {
        self.read1
            .iter()
            .filter_map(|(name, r1)| self.read2.get(name).map(|r2| (r1, r2)))
    }

    /// Number of first-in-pair names without a matching mate
    #[must_use]
    pub fn n_unpaired(&self) -> usize {
        self.read1
            .keys()
            .filter(|name| !self.read2.contains_key(*name))
            .count()
    }
}

/// Drains a record stream into a fresh set of [`PairTables`]
///
/// Stops at the end of input. The first error yielded by the stream aborts the
/// pairing and is returned as-is.
pub fn pair_records<I>(records: I) -> Result<PairTables>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
{
    let mut tables = PairTables::new();
    for record in records {
        tables.insert(record?);
    }
    Ok(tables)
}
