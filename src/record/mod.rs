mod alignment_record;

pub use alignment_record::{AlignmentRecord, AlignmentRecordBuilder, MISSING_NAME};
