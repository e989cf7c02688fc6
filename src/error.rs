/// Custom Result type for bam2pe operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bam2pe library, encompassing all possible error cases
/// that can occur while converting alignment records into FASTQ.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Errors that occur while decoding the alignment input
    #[error("Error reading BAM: {0}")]
    ReadError(#[from] ReadError),

    /// Errors that occur while creating or writing the FASTQ outputs
    #[error("Error writing FASTQ: {0}")]
    WriteError(#[from] WriteError),

    /// Errors in the converter configuration, raised before any I/O happens
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigError),

    /// Standard I/O errors
    #[error("Error with IO: {0}")]
    IoError(#[from] std::io::Error),
}
impl Error {
    /// Checks if the error was raised by the record decoder
    ///
    /// Decode failures abort a run midway, so outputs may already hold part of the data.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::ReadError(ReadError::Decode { .. }))
    }
}

/// Errors that can occur while reading the alignment container
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The input file could not be opened
    #[error("Unable to open input {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// The container header could not be decoded
    #[error("Unable to decode BAM header: {0}")]
    Header(std::io::Error),

    /// A record could not be decoded
    ///
    /// # Fields
    /// * `index` - The 0-based position of the failing record in the input
    #[error("Failed to read BAM record #{index}: {source}")]
    Decode {
        index: usize,
        source: std::io::Error,
    },
}

/// Errors that can occur while writing FASTQ output
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// The output file could not be created
    #[error("Unable to create output {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    /// Buffered data or the gzip trailer could not be written out
    #[error("Unable to finalize output stream: {0}")]
    Finish(std::io::Error),
}

/// Errors in the way a converter was configured
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Converter not provided with an input path")]
    MissingInput,

    #[error("Converter not provided with any output (set both mate paths or a stream)")]
    MissingOutput,

    /// Gzip levels are restricted to `1..=9`
    #[error("Invalid compression level: {0} - expecting [1,9]")]
    InvalidCompressionLevel(u32),
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_is_decode_error() {
        let error: Error = ReadError::Decode {
            index: 3,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad record"),
        }
        .into();
        assert!(error.is_decode_error());

        let error: Error = ReadError::Header(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "bad header",
        ))
        .into();
        assert!(!error.is_decode_error());
    }

    #[test]
    fn test_read_error_decode_message() {
        let error = ReadError::Decode {
            index: 42,
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"),
        };
        let error_str = format!("{error}");
        assert!(error_str.contains("#42"));
        assert!(error_str.contains("eof"));
    }

    #[test]
    fn test_write_error_create_message() {
        let error = WriteError::Create {
            path: "out/r1.fq".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir"),
        };
        assert!(format!("{error}").contains("out/r1.fq"));
    }

    #[test]
    fn test_write_error_finish_message() {
        let error = WriteError::Finish(std::io::Error::other("disk full"));
        let error_str = format!("{error}");
        assert!(error_str.contains("finalize"));
        assert!(error_str.contains("disk full"));
    }

    #[test]
    fn test_config_error_invalid_level() {
        let error = ConfigError::InvalidCompressionLevel(12);
        let error_str = format!("{error}");
        assert!(error_str.contains("12"));
        assert!(error_str.contains("[1,9]"));
    }

    #[test]
    fn test_error_from_config_error() {
        let error: Error = ConfigError::MissingInput.into();
        assert!(matches!(error, Error::ConfigError(ConfigError::MissingInput)));
    }

    #[test]
    fn test_error_from_io_error() {
        let error: Error = std::io::Error::other("boom").into();
        assert!(matches!(error, Error::IoError(_)));
    }
}
