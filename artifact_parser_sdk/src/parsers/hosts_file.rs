//! `/etc/hosts` parser

use artifact_parser_base::adapters::FileParser;
use artifact_parser_base::contracts::{
    stream_from, ParseError, ParseResult, ParserDefinition, ParserError,
};
use artifact_parser_base::types::{ContentHandle, HostContext, ParsedRecord, PathDescriptor};
use std::io::Read;

pub const HOSTS_FILE_PARSER: &str = "hosts_file";

/// One `HostsEntry` record per address line
pub struct HostsFileParser;

impl HostsFileParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HostsFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserDefinition for HostsFileParser {
    fn name(&self) -> &str {
        HOSTS_FILE_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["LinuxHostsFile".to_string()]
    }

    fn description(&self) -> &str {
        "Static host name mappings"
    }
}

fn parse_entry(source: &str, number: usize, line: &str) -> Option<Result<ParsedRecord, ParserError>> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return None;
    }

    let mut fields = content.split_whitespace();
    let address = fields.next()?;
    let hostnames: Vec<&str> = fields.collect();

    if hostnames.is_empty() {
        return Some(Err(ParseError::at_line(
            HOSTS_FILE_PARSER,
            number,
            format!("address '{}' has no host names", address),
        )
        .into()));
    }

    Some(Ok(ParsedRecord::new("HostsEntry")
        .with_field("address", address)
        .with_field("hostnames", hostnames)
        .with_field("source", source)))
}

impl FileParser for HostsFileParser {
    fn parse<'a>(
        &'a self,
        stat: PathDescriptor,
        mut handle: ContentHandle<'a>,
        _host: &'a HostContext,
    ) -> ParseResult<'a> {
        let mut content = String::new();
        handle
            .read_to_string(&mut content)
            .map_err(|e| ParseError::io(HOSTS_FILE_PARSER, e))?;

        let results: Vec<_> = content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| parse_entry(stat.path(), index + 1, line))
            .collect();

        Ok(stream_from(results))
    }
}
