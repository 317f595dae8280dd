// src/adapters/registry.rs
//! Registry value adapters
//!
//! Three flavors with different strictness:
//! - [`RegistryValueAdapter`] accepts a descriptor or a raw string.
//! - [`RegistryEntryAdapter`] accepts only the descriptor form.
//! - [`RegistryMultiAdapter`] accepts batches of the descriptor form.

use crate::contracts::validation::{extract_batch, shape_mismatch};
use crate::contracts::{MultiResponseParser, ParseResult, ParserDefinition, SingleResponseParser};
use crate::types::{
    CollectedResponse, HostContext, PathDescriptor, PathType, RegistryValue, ResponseShape,
};

const VALUE_ACCEPTED: &[ResponseShape] = &[
    ResponseShape::RegistryDescriptor,
    ResponseShape::RegistryString,
];

const DESCRIPTOR_ACCEPTED: &[ResponseShape] = &[ResponseShape::RegistryDescriptor];

/// Hook for parsers that understand either registry value form
pub trait RegistryValueParser: ParserDefinition {
    fn parse<'a>(&'a self, value: &'a RegistryValue, host: &'a HostContext) -> ParseResult<'a>;
}

/// Hook for parsers that need the full registry value descriptor
pub trait RegistryParser: ParserDefinition {
    fn parse<'a>(&'a self, stat: &'a PathDescriptor, host: &'a HostContext) -> ParseResult<'a>;
}

/// Hook for parsers combining several registry values
pub trait RegistryMultiParser: ParserDefinition {
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<&'a PathDescriptor>,
        host: &'a HostContext,
    ) -> ParseResult<'a>;
}

/// Binds a [`RegistryValueParser`] to the single-response contract
pub struct RegistryValueAdapter<P> {
    parser: P,
}

delegate_definition!(RegistryValueAdapter, RegistryValueParser);

impl<P: RegistryValueParser> SingleResponseParser for RegistryValueAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        VALUE_ACCEPTED
    }

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        _path_type: PathType,
    ) -> ParseResult<'a> {
        match response {
            CollectedResponse::Registry(value) => self.parser.parse(value, host),
            other => Err(shape_mismatch(self.name(), VALUE_ACCEPTED, other.shape()).into()),
        }
    }
}

/// Binds a [`RegistryParser`] to the single-response contract
pub struct RegistryEntryAdapter<P> {
    parser: P,
}

delegate_definition!(RegistryEntryAdapter, RegistryParser);

impl<P: RegistryParser> SingleResponseParser for RegistryEntryAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        DESCRIPTOR_ACCEPTED
    }

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        _path_type: PathType,
    ) -> ParseResult<'a> {
        match response {
            CollectedResponse::Registry(RegistryValue::Descriptor(stat)) => {
                self.parser.parse(stat, host)
            }
            other => Err(shape_mismatch(self.name(), DESCRIPTOR_ACCEPTED, other.shape()).into()),
        }
    }
}

/// Binds a [`RegistryMultiParser`] to the multi-response contract
pub struct RegistryMultiAdapter<P> {
    parser: P,
}

delegate_definition!(RegistryMultiAdapter, RegistryMultiParser);

impl<P: RegistryMultiParser> MultiResponseParser for RegistryMultiAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        DESCRIPTOR_ACCEPTED
    }

    fn parse_responses<'a>(
        &'a self,
        host: &'a HostContext,
        responses: &'a [CollectedResponse],
    ) -> ParseResult<'a> {
        let stats = extract_batch(self.name(), DESCRIPTOR_ACCEPTED, responses, |r| match r {
            CollectedResponse::Registry(RegistryValue::Descriptor(stat)) => Some(stat),
            _ => None,
        })?;

        self.parser.parse_multiple(stats, host)
    }
}
