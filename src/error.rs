use std::path::PathBuf;

/// Failure while turning one source line into an instruction word.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { mnemonic: String },
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldRange {
        field: &'static str,
        value: i64,
        bits: u32,
    },
    #[error("malformed line: {reason}")]
    MalformedLine { reason: String },
}

impl EncodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            reason: reason.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("line {line_no}: {source}\n    {line}")]
    Line {
        line_no: usize,
        line: String,
        #[source]
        source: EncodeError,
    },
    #[error("line {line_no}: instruction memory is full ({capacity} words)")]
    ImageOverflow { line_no: usize, capacity: usize },
    #[error("slot {slot} is outside the image ({capacity} words)")]
    SlotOutOfRange { slot: usize, capacity: usize },
    #[error("bad memory image: {reason}")]
    ImageFormat { reason: String },
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line_no}: cannot read source: {source}")]
    SourceRead {
        line_no: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AsmError {
    /// The per-line encoding failure, if this error came from one.
    pub fn encode_error(&self) -> Option<&EncodeError> {
        match self {
            AsmError::Line { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
