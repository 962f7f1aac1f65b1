use std::fmt;

/// Coarse failure classes shared by every error type in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotFound,
    MissingFact,
    UserResolution,
    Io,
    Parse,
    UnsupportedFormat,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::MissingFact => "missing_fact",
            Self::UserResolution => "user_resolution",
            Self::Io => "io",
            Self::Parse => "parse",
            Self::UnsupportedFormat => "unsupported_format",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
