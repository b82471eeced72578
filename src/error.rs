use thiserror::Error;

/// Failures when building or checking a framed sentence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("sentence does not fit in its buffer")]
    Capacity,
    #[error("sentence does not start with '$'")]
    MissingStart,
    #[error("sentence has no '*' checksum delimiter")]
    MissingChecksum,
    #[error("sentence does not end with CR LF")]
    MissingTerminator,
    #[error("checksum field is not two upper-case hex digits")]
    BadHex,
    #[error("checksum mismatch: computed {expected:02X}, transmitted {found:02X}")]
    ChecksumMismatch { expected: u8, found: u8 },
}

pub type Result<T> = core::result::Result<T, Error>;
