// src/contracts/errors.rs
//! Error types for parser contracts and dispatch
//!
//! Three disjoint failure kinds: definition defects (wiring bugs), command
//! failures reported by the collected command, and parse failures raised by a
//! hook on malformed content.

use crate::contracts::traits::ContractKind;
use crate::types::ResponseShape;

/// Wiring and definition defects
///
/// Raised when a parser is misconfigured or handed a response shape it does
/// not declare. Always fatal to the dispatch call.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Parser '{adapter}' expects {expected} but received {actual}")]
    ShapeMismatch {
        adapter: String,
        expected: String,
        actual: ResponseShape,
    },

    #[error("Parser '{adapter}' expects a batch of {expected} but element {index} is {actual}")]
    BatchShapeMismatch {
        adapter: String,
        index: usize,
        expected: String,
        actual: ResponseShape,
    },

    #[error("Parser '{adapter}' received {descriptors} path descriptors but {handles} content handles")]
    BatchLengthMismatch {
        adapter: String,
        descriptors: usize,
        handles: usize,
    },

    #[error("Parser '{parser}' takes {expected} response(s) per call, got {actual}")]
    ArityMismatch {
        parser: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown parser: {0}")]
    UnknownParser(String),

    #[error("Parser '{parser}' implements the {declared} contract, not {requested}")]
    ContractMismatch {
        parser: String,
        declared: ContractKind,
        requested: ContractKind,
    },

    #[error("Duplicate parser registration: {0}")]
    DuplicateParser(String),

    #[error("Invalid parser definition '{parser}': {reason}")]
    InvalidDefinition { parser: String, reason: String },
}

/// Failures raised by hooks on malformed content
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parser '{parser}' found malformed content: {reason}")]
    Malformed { parser: String, reason: String },

    #[error("Parser '{parser}' found malformed content at line {line}: {reason}")]
    MalformedLine {
        parser: String,
        line: usize,
        reason: String,
    },

    #[error("Parser '{parser}' failed reading content: {source}")]
    Io {
        parser: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn malformed(parser: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            parser: parser.into(),
            reason: reason.into(),
        }
    }

    pub fn at_line(parser: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            parser: parser.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn io(parser: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            parser: parser.into(),
            source,
        }
    }
}

/// Any failure surfaced by a parser entry point
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parser definition error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("Parsing output of command '{cmd}' failed, as command had {status} return code")]
    CommandFailed { cmd: String, status: i32 },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Coarse failure classification so callers can apply separate policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DefinitionDefect,
    CommandFailure,
    ParseFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DefinitionDefect => "definition_defect",
            Self::CommandFailure => "command_failure",
            Self::ParseFailure => "parse_failure",
        }
    }
}

impl ParserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Definition(_) => ErrorKind::DefinitionDefect,
            Self::CommandFailed { .. } => ErrorKind::CommandFailure,
            Self::Parse(_) => ErrorKind::ParseFailure,
        }
    }

    pub fn is_definition_defect(&self) -> bool {
        self.kind() == ErrorKind::DefinitionDefect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_disjoint() {
        let definition: ParserError = DefinitionError::UnknownParser("nope".into()).into();
        let command = ParserError::CommandFailed {
            cmd: "rpm -qa".into(),
            status: 1,
        };
        let parse: ParserError = ParseError::malformed("hosts_file", "bad").into();

        assert_eq!(definition.kind(), ErrorKind::DefinitionDefect);
        assert_eq!(command.kind(), ErrorKind::CommandFailure);
        assert_eq!(parse.kind(), ErrorKind::ParseFailure);
        assert!(definition.is_definition_defect());
        assert!(!parse.is_definition_defect());
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = DefinitionError::ShapeMismatch {
            adapter: "sysctl_cmd".into(),
            expected: "command_result".into(),
            actual: ResponseShape::File,
        };
        assert_eq!(
            err.to_string(),
            "Parser 'sysctl_cmd' expects command_result but received file_reference"
        );
    }

    #[test]
    fn test_parse_error_line_message() {
        let err = ParseError::at_line("hosts_file", 3, "missing hostname");
        assert!(err.to_string().contains("line 3"));
    }
}
