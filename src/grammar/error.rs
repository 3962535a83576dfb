use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A zero-length production where a leading symbol is needed.
    MalformedProduction { non_terminal: String, index: usize },
    /// The synthesized identifier already names a non-terminal of the input.
    IdentifierCollision {
        non_terminal: String,
        synthesized: String,
    },
}

impl Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::MalformedProduction {
                non_terminal,
                index,
            } => write!(
                f,
                "production {} of {} is empty and has no leading symbol",
                index + 1,
                non_terminal
            ),
            TransformError::IdentifierCollision {
                non_terminal,
                synthesized,
            } => write!(
                f,
                "cannot introduce {} for {}: a non-terminal with that name already exists",
                synthesized, non_terminal
            ),
        }
    }
}

impl std::error::Error for TransformError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    TooManyArrows,
    EmptyLeft,
    LeftContainsWhitespace,
    MissingLeft,
    Io(String),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::TooManyArrows => write!(f, "too many \"->\""),
            ParseErrorKind::EmptyLeft => write!(f, "empty left side"),
            ParseErrorKind::LeftContainsWhitespace => write!(f, "left side contains whitespace"),
            ParseErrorKind::MissingLeft => write!(f, "cannot find left side"),
            ParseErrorKind::Io(e) => write!(f, "read failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "Line {}: {}", self.line, self.kind)
        }
    }
}

impl std::error::Error for ParseError {}
