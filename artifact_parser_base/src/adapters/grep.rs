//! Grep-style match set adapter

use crate::contracts::validation::shape_mismatch;
use crate::contracts::{ParseResult, ParserDefinition, SingleResponseParser};
use crate::types::{CollectedResponse, HostContext, MatchResultSet, PathType, ResponseShape};

const ACCEPTED: &[ResponseShape] = &[ResponseShape::MatchSet];

/// Hook for parsers of file-finder match results
pub trait GrepParser: ParserDefinition {
    fn parse<'a>(&'a self, matches: &'a MatchResultSet, host: &'a HostContext) -> ParseResult<'a>;
}

/// Binds a [`GrepParser`] to the single-response contract
pub struct GrepAdapter<P> {
    parser: P,
}

delegate_definition!(GrepAdapter, GrepParser);

impl<P: GrepParser> SingleResponseParser for GrepAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        ACCEPTED
    }

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        _path_type: PathType,
    ) -> ParseResult<'a> {
        match response {
            CollectedResponse::MatchSet(matches) => self.parser.parse(matches, host),
            other => Err(shape_mismatch(self.name(), ACCEPTED, other.shape()).into()),
        }
    }
}
