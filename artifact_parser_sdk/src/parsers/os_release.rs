//! os-release parser
//!
//! Merges `/etc/os-release` style files into a single `OsRelease` record.
//! Files are consulted in the order collected and a key set by an earlier file
//! is never overridden by a later one, matching the lookup order of
//! `/etc/os-release` before `/usr/lib/os-release`. Within one file the last
//! assignment of a key wins, as when the file is sourced by a shell.

use artifact_parser_base::adapters::FileMultiParser;
use artifact_parser_base::contracts::{
    empty_stream, record_stream, DefinitionError, ParseError, ParseResult, ParserDefinition,
};
use artifact_parser_base::types::{ContentHandle, HostContext, ParsedRecord, PathDescriptor};
use regex::Regex;
use std::collections::BTreeMap;
use std::io::Read;

pub const OS_RELEASE_PARSER: &str = "os_release_files";

/// Keys promoted to top-level record fields
const PROMOTED_KEYS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("VERSION_ID", "version_id"),
    ("PRETTY_NAME", "pretty_name"),
];

pub struct OsReleaseFilesParser {
    assignment: Regex,
}

impl OsReleaseFilesParser {
    pub fn new() -> Result<Self, DefinitionError> {
        let assignment = Regex::new(r"^([A-Z][A-Z0-9_]*)=(.*)$").map_err(|e| {
            DefinitionError::InvalidDefinition {
                parser: OS_RELEASE_PARSER.to_string(),
                reason: format!("assignment pattern: {}", e),
            }
        })?;
        Ok(Self { assignment })
    }

    /// Assignments in one file; a repeated key keeps its last value
    fn assignments(&self, content: &str) -> BTreeMap<String, String> {
        let mut assigned = BTreeMap::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match self.assignment.captures(line) {
                Some(caps) => {
                    assigned.insert(caps[1].to_string(), unquote(&caps[2]));
                }
                None => log::debug!("{}: ignoring line '{}'", OS_RELEASE_PARSER, line),
            }
        }
        assigned
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));

    match stripped {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

impl ParserDefinition for OsReleaseFilesParser {
    fn name(&self) -> &str {
        OS_RELEASE_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["LinuxReleaseInfo".to_string()]
    }

    fn description(&self) -> &str {
        "Distribution identity from os-release files"
    }
}

impl FileMultiParser for OsReleaseFilesParser {
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<PathDescriptor>,
        handles: Vec<ContentHandle<'a>>,
        _host: &'a HostContext,
    ) -> ParseResult<'a> {
        if stats.is_empty() {
            return Ok(empty_stream());
        }

        let mut fields = BTreeMap::new();
        for (stat, mut handle) in stats.iter().zip(handles) {
            let mut content = String::new();
            handle
                .read_to_string(&mut content)
                .map_err(|e| ParseError::io(OS_RELEASE_PARSER, e))?;
            for (key, value) in self.assignments(&content) {
                fields.entry(key).or_insert(value);
            }
            log::debug!("{}: merged {}", OS_RELEASE_PARSER, stat.path());
        }

        if !fields.contains_key("ID") && !fields.contains_key("NAME") {
            return Err(ParseError::malformed(
                OS_RELEASE_PARSER,
                "no ID or NAME found in any os-release file",
            )
            .into());
        }

        let mut record = ParsedRecord::new("OsRelease");
        for (key, field) in PROMOTED_KEYS {
            if let Some(value) = fields.get(*key) {
                record.set_field(*field, value.as_str());
            }
        }

        let sources: Vec<&str> = stats.iter().map(PathDescriptor::path).collect();
        record.set_field("sources", sources);
        record.set_field(
            "fields",
            fields
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect::<serde_json::Map<_, _>>(),
        );

        Ok(record_stream(vec![record]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::MultiFileAdapter;
    use artifact_parser_base::contracts::{ErrorKind, MultiFileParser};
    use artifact_parser_base::types::{handle_from_bytes, PathSpec};
    use serde_json::json;

    const ETC: &str = "NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\nID=ubuntu\n# local override\nBOGUS line\n";
    const USR_LIB: &str = "NAME=\"Debian GNU/Linux\"\nID=debian\nPRETTY_NAME='Debian GNU/Linux 12'\n";

    #[test]
    fn test_earlier_files_take_precedence() {
        let adapter = MultiFileAdapter::new(OsReleaseFilesParser::new().unwrap());
        let host = HostContext::new();
        let pathspecs = vec![PathSpec::os("/etc/os-release"), PathSpec::os("/usr/lib/os-release")];
        let handles = vec![
            handle_from_bytes(ETC.as_bytes()),
            handle_from_bytes(USR_LIB.as_bytes()),
        ];

        let records: Vec<ParsedRecord> = adapter
            .parse_files(&host, pathspecs.iter().collect(), handles)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        let release = &records[0];
        assert_eq!(release.record_type, "OsRelease");
        assert_eq!(release.get_str("id"), Some("ubuntu"));
        assert_eq!(release.get_str("name"), Some("Ubuntu"));
        assert_eq!(release.get_str("version_id"), Some("22.04"));
        assert_eq!(release.get_str("pretty_name"), Some("Debian GNU/Linux 12"));
        assert_eq!(
            release.get_field("sources"),
            Some(&json!(["/etc/os-release", "/usr/lib/os-release"]))
        );
    }

    #[test]
    fn test_last_assignment_wins_within_a_file() {
        let adapter = MultiFileAdapter::new(OsReleaseFilesParser::new().unwrap());
        let host = HostContext::new();
        let pathspecs = vec![PathSpec::os("/etc/os-release"), PathSpec::os("/usr/lib/os-release")];
        let handles = vec![
            handle_from_bytes(b"ID=old\nID=new\n"),
            handle_from_bytes(b"ID=fallback\nVERSION_ID=8\n"),
        ];

        let records: Vec<ParsedRecord> = adapter
            .parse_files(&host, pathspecs.iter().collect(), handles)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records[0].get_str("id"), Some("new"));
        assert_eq!(records[0].get_str("version_id"), Some("8"));
    }

    #[test]
    fn test_no_identity_is_parse_failure() {
        let adapter = MultiFileAdapter::new(OsReleaseFilesParser::new().unwrap());
        let host = HostContext::new();
        let pathspecs = vec![PathSpec::os("/etc/os-release")];
        let handles = vec![handle_from_bytes(b"# empty\n")];

        let err = adapter
            .parse_files(&host, pathspecs.iter().collect(), handles)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_empty_batch_yields_nothing() {
        let adapter = MultiFileAdapter::new(OsReleaseFilesParser::new().unwrap());
        let host = HostContext::new();
        let stream = adapter.parse_files(&host, Vec::new(), Vec::new()).unwrap();
        assert_eq!(stream.count(), 0);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a \\\"b\\\"\""), "a \"b\"");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("plain"), "plain");
    }
}
