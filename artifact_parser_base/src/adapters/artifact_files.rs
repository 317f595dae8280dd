// src/adapters/artifact_files.rs
//! Artifact-derived file reference adapters

use crate::contracts::validation::{extract_batch, shape_mismatch};
use crate::contracts::{MultiResponseParser, ParseResult, ParserDefinition, SingleResponseParser};
use crate::types::{
    ArtifactFileRef, CollectedResponse, HostContext, PathDescriptor, PathType, ResponseShape,
};

const ACCEPTED: &[ResponseShape] = &[ResponseShape::ArtifactFile];

/// Hook for parsers of a single artifact file reference
pub trait ArtifactFilesParser: ParserDefinition {
    /// `download_path_type` is the access method the caller will use to fetch
    /// any files the hook reports
    fn parse<'a>(
        &'a self,
        persistence: &'a ArtifactFileRef,
        host: &'a HostContext,
        download_path_type: PathType,
    ) -> ParseResult<'a>;
}

/// Hook for parsers of batches of artifact file descriptors
pub trait ArtifactFilesMultiParser: ParserDefinition {
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<&'a PathDescriptor>,
        host: &'a HostContext,
    ) -> ParseResult<'a>;
}

/// Binds an [`ArtifactFilesParser`] to the single-response contract
pub struct ArtifactFilesAdapter<P> {
    parser: P,
}

delegate_definition!(ArtifactFilesAdapter, ArtifactFilesParser);

impl<P: ArtifactFilesParser> SingleResponseParser for ArtifactFilesAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        ACCEPTED
    }

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        path_type: PathType,
    ) -> ParseResult<'a> {
        match response {
            CollectedResponse::ArtifactFile(reference) => {
                self.parser.parse(reference, host, path_type)
            }
            other => Err(shape_mismatch(self.name(), ACCEPTED, other.shape()).into()),
        }
    }
}

/// Binds an [`ArtifactFilesMultiParser`] to the multi-response contract
pub struct ArtifactFilesMultiAdapter<P> {
    parser: P,
}

delegate_definition!(ArtifactFilesMultiAdapter, ArtifactFilesMultiParser);

impl<P: ArtifactFilesMultiParser> MultiResponseParser for ArtifactFilesMultiAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        ACCEPTED
    }

    fn parse_responses<'a>(
        &'a self,
        host: &'a HostContext,
        responses: &'a [CollectedResponse],
    ) -> ParseResult<'a> {
        let stats = extract_batch(self.name(), ACCEPTED, responses, |r| match r {
            CollectedResponse::ArtifactFile(reference) => Some(&reference.descriptor),
            _ => None,
        })?;

        self.parser.parse_multiple(stats, host)
    }
}
