// src/contracts/traits.rs
//! Base capability contracts
//!
//! Four contract shapes exist: single-response, multi-response, single-file and
//! multi-file. Each exposes exactly one entry point. Artifact-specific logic
//! lives in the hook traits of [`crate::adapters`], which are bound to these
//! contracts by adapter structs.

use crate::contracts::errors::ParserError;
use crate::types::{
    CollectedResponse, ContentHandle, HostContext, ParsedRecord, PathSpec, PathType,
    ResponseShape,
};
use serde::Serialize;
use std::fmt;

/// Lazy, finite, non-restartable sequence of parse results
pub type RecordStream<'a> = Box<dyn Iterator<Item = Result<ParsedRecord, ParserError>> + 'a>;

/// What every entry point and hook returns
pub type ParseResult<'a> = Result<RecordStream<'a>, ParserError>;

/// Stream yielding nothing
pub fn empty_stream<'a>() -> RecordStream<'a> {
    Box::new(std::iter::empty())
}

/// Stream over already materialized records
pub fn record_stream<'a>(records: Vec<ParsedRecord>) -> RecordStream<'a> {
    Box::new(records.into_iter().map(Ok))
}

/// Box any iterator of results as a stream
pub fn stream_from<'a, I>(results: I) -> RecordStream<'a>
where
    I: IntoIterator<Item = Result<ParsedRecord, ParserError>>,
    I::IntoIter: 'a,
{
    Box::new(results.into_iter())
}

/// The four base contract shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    SingleResponse,
    MultiResponse,
    SingleFile,
    MultiFile,
}

impl ContractKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleResponse => "single_response",
            Self::MultiResponse => "multi_response",
            Self::SingleFile => "single_file",
            Self::MultiFile => "multi_file",
        }
    }

    /// Whether one call consumes a batch of responses
    pub fn is_batched(self) -> bool {
        matches!(self, Self::MultiResponse | Self::MultiFile)
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and catalog metadata shared by every parser
pub trait ParserDefinition: Send + Sync {
    /// Stable registry name
    fn name(&self) -> &str;

    /// Artifact types this parser understands
    fn supported_artifacts(&self) -> Vec<String>;

    /// Optional: one-line description for listings
    fn description(&self) -> &str {
        ""
    }
}

/// Consumes one collected response
pub trait SingleResponseParser: ParserDefinition {
    /// Response shapes this parser accepts
    fn accepted_shapes(&self) -> &'static [ResponseShape];

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        path_type: PathType,
    ) -> ParseResult<'a>;
}

/// Consumes an ordered batch of homogeneous responses
pub trait MultiResponseParser: ParserDefinition {
    /// Response shapes every batch element must have
    fn accepted_shapes(&self) -> &'static [ResponseShape];

    fn parse_responses<'a>(
        &'a self,
        host: &'a HostContext,
        responses: &'a [CollectedResponse],
    ) -> ParseResult<'a>;
}

/// Consumes one file: its pathspec and an open content handle
pub trait SingleFileParser: ParserDefinition {
    fn parse_file<'a>(
        &'a self,
        host: &'a HostContext,
        pathspec: &'a PathSpec,
        handle: ContentHandle<'a>,
    ) -> ParseResult<'a>;
}

/// Consumes positionally aligned batches of pathspecs and content handles
pub trait MultiFileParser: ParserDefinition {
    fn parse_files<'a>(
        &'a self,
        host: &'a HostContext,
        pathspecs: Vec<&'a PathSpec>,
        handles: Vec<ContentHandle<'a>>,
    ) -> ParseResult<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_helpers() {
        assert_eq!(empty_stream().count(), 0);

        let stream = record_stream(vec![ParsedRecord::new("A"), ParsedRecord::new("B")]);
        let types: Vec<String> = stream.map(|r| r.unwrap().record_type).collect();
        assert_eq!(types, vec!["A", "B"]);
    }

    #[test]
    fn test_contract_kind() {
        assert!(ContractKind::MultiFile.is_batched());
        assert!(!ContractKind::SingleResponse.is_batched());
        assert_eq!(ContractKind::SingleFile.to_string(), "single_file");
    }
}
