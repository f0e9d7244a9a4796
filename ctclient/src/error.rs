// ctclient-rs/ctclient/src/error.rs

use thiserror::Error;

use crate::types::Tag;

/// Errors returned by every fallible operation of the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed an out-of-range slot, reader index or option.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An encoded frame or a reply does not fit its bounded buffer.
    #[error("buffer overflow: capacity {capacity}, required {required}")]
    BufferOverflow {
        /// Bytes available
        capacity: usize,
        /// Bytes that would have been needed
        required: usize,
    },

    /// Opening, using or closing the connection failed.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] std::io::Error),

    /// Reply bytes are not validly framed or tagged.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Expected tag absent or ill-typed.
    #[error("missing field: {tag}")]
    MissingField {
        /// Tag that was looked up
        tag: Tag,
    },

    /// Tag present but its value has the wrong size.
    #[error("field {tag} has bad size: max {max}, got {actual}")]
    FieldSize {
        /// Offending tag
        tag: Tag,
        /// Largest accepted size
        max: usize,
        /// Size found
        actual: usize,
    },

    /// Status code reported by the reader manager.
    #[error("service error: {0}")]
    Service(ServiceError),

    /// Failure not otherwise classified.
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// True when the failure was decided by the remote service rather than
    /// by this client or the transport.
    pub fn is_service(&self) -> bool {
        matches!(self, Error::Service(_))
    }
}

/// Status codes carried in the reply header of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ServiceError {
    /// -1
    #[display(fmt = "generic failure")]
    Generic,
    /// -2, e.g. no card inserted before the RESET timeout
    #[display(fmt = "timed out")]
    Timeout,
    /// -3
    #[display(fmt = "invalid slot")]
    InvalidSlot,
    /// -4
    #[display(fmt = "not supported")]
    NotSupported,
    /// -5, the reader or card stopped answering
    #[display(fmt = "communication error")]
    CommError,
    /// -6
    #[display(fmt = "no card present")]
    NoCard,
    /// -7, another client holds a conflicting lock
    #[display(fmt = "slot already locked")]
    AlreadyLocked,
    /// -8, unknown or foreign lock token
    #[display(fmt = "slot not locked")]
    NotLocked,
    /// -9
    #[display(fmt = "invalid argument")]
    InvalidArg,
    /// -10
    #[display(fmt = "out of memory")]
    NoMemory,
    /// -11
    #[display(fmt = "buffer too small")]
    BufferTooSmall,
    /// Any other negative status
    #[display(fmt = "status {}", _0)]
    Other(i16),
}

impl ServiceError {
    /// Raw status code as carried in the packet header
    pub fn code(&self) -> i16 {
        match self {
            Self::Generic => -1,
            Self::Timeout => -2,
            Self::InvalidSlot => -3,
            Self::NotSupported => -4,
            Self::CommError => -5,
            Self::NoCard => -6,
            Self::AlreadyLocked => -7,
            Self::NotLocked => -8,
            Self::InvalidArg => -9,
            Self::NoMemory => -10,
            Self::BufferTooSmall => -11,
            Self::Other(code) => *code,
        }
    }
}

impl From<i16> for ServiceError {
    fn from(code: i16) -> Self {
        match code {
            -1 => Self::Generic,
            -2 => Self::Timeout,
            -3 => Self::InvalidSlot,
            -4 => Self::NotSupported,
            -5 => Self::CommError,
            -6 => Self::NoCard,
            -7 => Self::AlreadyLocked,
            -8 => Self::NotLocked,
            -9 => Self::InvalidArg,
            -10 => Self::NoMemory,
            -11 => Self::BufferTooSmall,
            other => Self::Other(other),
        }
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error::Service(err)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
