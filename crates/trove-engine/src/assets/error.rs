use std::fmt;

/// Model loading failure.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    Io { path: String, message: String },
    /// Malformed record; `line` is 1-based.
    Parse { line: usize, message: String },
    /// The file parsed but contained no vertices.
    Empty,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, message } => write!(f, "failed to read model {path}: {message}"),
            AssetError::Parse { line, message } => {
                write!(f, "model parse error at line {line}: {message}")
            }
            AssetError::Empty => write!(f, "model contains no vertices"),
        }
    }
}

impl std::error::Error for AssetError {}
