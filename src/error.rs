use thiserror::Error;

/// Coarse category of a [`DigestError`], for callers that only care whether
/// the input was misconfigured, out of range, or missing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Configuration,
    Range,
    EmptyInput,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DigestError {
    #[error("Invalid restriction enzyme '{name}': {reason}")]
    InvalidEnzyme { name: String, reason: String },

    #[error("Restriction enzyme '{0}' is defined more than once")]
    DuplicateEnzyme(String),

    #[error("Restriction enzyme name '{0}' is reserved for the combined digest")]
    ReservedEnzymeName(String),

    #[error("Invalid gel migration setting: {0}")]
    InvalidMigrationConfig(String),

    #[error("Cleavage offset {offset} is outside 0..={sequence_len}")]
    OffsetOutOfRange { offset: usize, sequence_len: usize },

    #[error("Cleavage offsets are not strictly ascending at index {index} ({previous} then {offset})")]
    UnsortedOffsets {
        index: usize,
        previous: usize,
        offset: usize,
    },

    #[error("Lane '{lane}' contains a fragment length of 0 bp")]
    NonPositiveLength { lane: String },

    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Gel migration needs at least one lane")]
    NoLanes,

    #[error("Lane '{0}' has no fragment lengths")]
    EmptyLane(String),
}

impl DigestError {
    pub fn invalid_enzyme(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEnzyme {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEnzyme { .. }
            | Self::DuplicateEnzyme(_)
            | Self::ReservedEnzymeName(_)
            | Self::InvalidMigrationConfig(_) => ErrorKind::Configuration,
            Self::OffsetOutOfRange { .. }
            | Self::UnsortedOffsets { .. }
            | Self::NonPositiveLength { .. } => ErrorKind::Range,
            Self::EmptySequence | Self::NoLanes | Self::EmptyLane(_) => ErrorKind::EmptyInput,
        }
    }
}
