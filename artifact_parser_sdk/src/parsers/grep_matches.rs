//! File-finder match parser

use artifact_parser_base::adapters::GrepParser;
use artifact_parser_base::contracts::{ParseResult, ParserDefinition, ParserError};
use artifact_parser_base::types::{HostContext, MatchResultSet, ParsedRecord};

pub const GREP_MATCHES_PARSER: &str = "grep_matches";

/// One `BufferMatch` record per hit; a file with no hits yields nothing
pub struct GrepMatchesParser;

impl ParserDefinition for GrepMatchesParser {
    fn name(&self) -> &str {
        GREP_MATCHES_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["FileContentMatches".to_string()]
    }
}

impl GrepParser for GrepMatchesParser {
    fn parse<'a>(&'a self, matches: &'a MatchResultSet, _host: &'a HostContext) -> ParseResult<'a> {
        let path = matches.stat.path();
        let condition = matches.query.condition.as_str();

        Ok(Box::new(matches.matches.iter().map(
            move |hit| -> Result<ParsedRecord, ParserError> {
                Ok(ParsedRecord::new("BufferMatch")
                    .with_field("path", path)
                    .with_field("condition", condition)
                    .with_field("offset", hit.offset)
                    .with_field("length", hit.length)
                    .with_field("data", String::from_utf8_lossy(&hit.data).into_owned()))
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::GrepAdapter;
    use artifact_parser_base::contracts::SingleResponseParser;
    use artifact_parser_base::types::{
        BufferMatch, CollectedResponse, FinderQuery, PathDescriptor, PathSpec, PathType,
    };

    fn match_set(hits: Vec<BufferMatch>) -> CollectedResponse {
        CollectedResponse::MatchSet(MatchResultSet {
            query: FinderQuery {
                paths: vec!["/etc/ssh/sshd_config".into()],
                condition: "literal:PermitRootLogin".into(),
            },
            stat: PathDescriptor::from_pathspec(PathSpec::os("/etc/ssh/sshd_config")),
            matches: hits,
        })
    }

    #[test]
    fn test_one_record_per_match() {
        let adapter = GrepAdapter::new(GrepMatchesParser);
        let host = HostContext::new();
        let response = match_set(vec![
            BufferMatch {
                offset: 512,
                length: 19,
                data: b"PermitRootLogin yes".to_vec(),
            },
            BufferMatch {
                offset: 2048,
                length: 18,
                data: b"PermitRootLogin no".to_vec(),
            },
        ]);

        let records: Vec<ParsedRecord> = adapter
            .parse_response(&host, &response, PathType::Os)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("path"), Some("/etc/ssh/sshd_config"));
        assert_eq!(records[0].get_str("data"), Some("PermitRootLogin yes"));
        assert_eq!(records[1].get_field("offset"), Some(&serde_json::json!(2048)));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let adapter = GrepAdapter::new(GrepMatchesParser);
        let host = HostContext::new();
        let response = match_set(Vec::new());

        let stream = adapter
            .parse_response(&host, &response, PathType::Os)
            .unwrap();
        assert_eq!(stream.count(), 0);
    }
}
