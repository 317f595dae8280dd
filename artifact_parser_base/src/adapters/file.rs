// src/adapters/file.rs
//! Legacy file bridges
//!
//! Older file parsers were written against a stat-bearing signature while the
//! file contracts only hand over a pathspec. These adapters build a minimal
//! [`PathDescriptor`] carrying just the pathspec, every other attribute at its
//! default, and pass it alongside the caller's content handle(s).

use crate::contracts::validation::expect_aligned;
use crate::contracts::{MultiFileParser, ParseResult, ParserDefinition, SingleFileParser};
use crate::types::{ContentHandle, HostContext, PathDescriptor, PathSpec};

/// Hook for parsers of a single file
pub trait FileParser: ParserDefinition {
    fn parse<'a>(
        &'a self,
        stat: PathDescriptor,
        handle: ContentHandle<'a>,
        host: &'a HostContext,
    ) -> ParseResult<'a>;
}

/// Hook for parsers consuming several files at once
pub trait FileMultiParser: ParserDefinition {
    /// `stats[i]` describes the file readable through `handles[i]`
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<PathDescriptor>,
        handles: Vec<ContentHandle<'a>>,
        host: &'a HostContext,
    ) -> ParseResult<'a>;
}

/// Bridges a [`FileParser`] to the single-file contract
pub struct FileAdapter<P> {
    parser: P,
}

delegate_definition!(FileAdapter, FileParser);

impl<P: FileParser> SingleFileParser for FileAdapter<P> {
    fn parse_file<'a>(
        &'a self,
        host: &'a HostContext,
        pathspec: &'a PathSpec,
        handle: ContentHandle<'a>,
    ) -> ParseResult<'a> {
        let stat = PathDescriptor::from_pathspec(pathspec.clone());
        self.parser.parse(stat, handle, host)
    }
}

/// Bridges a [`FileMultiParser`] to the multi-file contract
pub struct MultiFileAdapter<P> {
    parser: P,
}

delegate_definition!(MultiFileAdapter, FileMultiParser);

impl<P: FileMultiParser> MultiFileParser for MultiFileAdapter<P> {
    fn parse_files<'a>(
        &'a self,
        host: &'a HostContext,
        pathspecs: Vec<&'a PathSpec>,
        handles: Vec<ContentHandle<'a>>,
    ) -> ParseResult<'a> {
        expect_aligned(self.name(), pathspecs.len(), handles.len())?;

        let stats = pathspecs
            .into_iter()
            .cloned()
            .map(PathDescriptor::from_pathspec)
            .collect();

        self.parser.parse_multiple(stats, handles, host)
    }
}
