//! WMI-style query result adapter

use crate::contracts::validation::extract_batch;
use crate::contracts::{MultiResponseParser, ParseResult, ParserDefinition};
use crate::types::{CollectedResponse, HostContext, QueryRow, ResponseShape};

const ACCEPTED: &[ResponseShape] = &[ResponseShape::QueryRow];

/// Hook for parsers of structured query rows
///
/// The host context is not passed; query rows are self-describing.
pub trait QueryParser: ParserDefinition {
    fn parse_multiple<'a>(&'a self, rows: Vec<&'a QueryRow>) -> ParseResult<'a>;
}

/// Binds a [`QueryParser`] to the multi-response contract
pub struct QueryAdapter<P> {
    parser: P,
}

delegate_definition!(QueryAdapter, QueryParser);

impl<P: QueryParser> MultiResponseParser for QueryAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        ACCEPTED
    }

    fn parse_responses<'a>(
        &'a self,
        _host: &'a HostContext,
        responses: &'a [CollectedResponse],
    ) -> ParseResult<'a> {
        let rows = extract_batch(self.name(), ACCEPTED, responses, |r| match r {
            CollectedResponse::QueryRow(row) => Some(row),
            _ => None,
        })?;

        self.parser.parse_multiple(rows)
    }
}
