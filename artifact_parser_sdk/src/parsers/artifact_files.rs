//! Parsers for files referenced by other artifacts

use artifact_parser_base::adapters::{ArtifactFilesMultiParser, ArtifactFilesParser};
use artifact_parser_base::contracts::{
    record_stream, ParseError, ParseResult, ParserDefinition, ParserError,
};
use artifact_parser_base::types::{
    ArtifactFileRef, HostContext, ParsedRecord, PathDescriptor, PathType,
};

pub const FILE_REFERENCE_PARSER: &str = "artifact_file_reference";
pub const FILE_INVENTORY_PARSER: &str = "artifact_file_inventory";

/// Turns a referenced file into a download request for the caller
pub struct ArtifactFileReferenceParser;

impl ParserDefinition for ArtifactFileReferenceParser {
    fn name(&self) -> &str {
        FILE_REFERENCE_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["PersistenceFiles".to_string()]
    }

    fn description(&self) -> &str {
        "Files named by persistence artifacts, with their download method"
    }
}

impl ArtifactFilesParser for ArtifactFileReferenceParser {
    fn parse<'a>(
        &'a self,
        persistence: &'a ArtifactFileRef,
        _host: &'a HostContext,
        download_path_type: PathType,
    ) -> ParseResult<'a> {
        let path = persistence.descriptor.path();
        if path.is_empty() {
            return Err(ParseError::malformed(FILE_REFERENCE_PARSER, "reference has an empty path").into());
        }

        let mut record = ParsedRecord::new("FileDownloadRequest")
            .with_field("path", path)
            .with_field("path_type", download_path_type.as_str());

        if let Some(artifact) = &persistence.source_artifact {
            record.set_field("source_artifact", artifact.as_str());
        }

        Ok(record_stream(vec![record]))
    }
}

/// One `FileStat` record per referenced descriptor
pub struct ArtifactFileInventoryParser;

impl ParserDefinition for ArtifactFileInventoryParser {
    fn name(&self) -> &str {
        FILE_INVENTORY_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["FileInventory".to_string()]
    }
}

fn file_stat(stat: &PathDescriptor) -> Result<ParsedRecord, ParserError> {
    let mut record = ParsedRecord::new("FileStat")
        .with_field("path", stat.path())
        .with_field("size", stat.st_size)
        .with_field("mode", format!("{:o}", stat.st_mode))
        .with_field("uid", stat.st_uid)
        .with_field("gid", stat.st_gid);

    if let Some(mtime) = stat.st_mtime {
        record.set_field("modified", mtime.to_rfc3339());
    }
    if let Some(target) = &stat.symlink {
        record.set_field("symlink", target.as_str());
    }

    Ok(record)
}

impl ArtifactFilesMultiParser for ArtifactFileInventoryParser {
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<&'a PathDescriptor>,
        _host: &'a HostContext,
    ) -> ParseResult<'a> {
        Ok(Box::new(stats.into_iter().map(file_stat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::{ArtifactFilesAdapter, ArtifactFilesMultiAdapter};
    use artifact_parser_base::contracts::{MultiResponseParser, SingleResponseParser};
    use artifact_parser_base::types::{CollectedResponse, PathSpec};
    use chrono::{TimeZone, Utc};

    fn reference(stat: PathDescriptor, artifact: Option<&str>) -> CollectedResponse {
        CollectedResponse::ArtifactFile(ArtifactFileRef {
            descriptor: stat,
            source_artifact: artifact.map(str::to_string),
        })
    }

    #[test]
    fn test_reference_records_download_path_type() {
        let adapter = ArtifactFilesAdapter::new(ArtifactFileReferenceParser);
        let host = HostContext::new();
        let response = reference(
            PathDescriptor::from_pathspec(PathSpec::os("/etc/cron.daily/backup")),
            Some("LinuxCronTabs"),
        );

        let records: Vec<ParsedRecord> = adapter
            .parse_response(&host, &response, PathType::Tsk)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records[0].get_str("path"), Some("/etc/cron.daily/backup"));
        assert_eq!(records[0].get_str("path_type"), Some("tsk"));
        assert_eq!(records[0].get_str("source_artifact"), Some("LinuxCronTabs"));
    }

    #[test]
    fn test_reference_with_empty_path_fails() {
        let adapter = ArtifactFilesAdapter::new(ArtifactFileReferenceParser);
        let host = HostContext::new();
        let response = reference(PathDescriptor::default(), None);

        let err = adapter
            .parse_response(&host, &response, PathType::Os)
            .err()
            .unwrap();
        assert!(!err.is_definition_defect());
    }

    #[test]
    fn test_inventory_one_record_per_descriptor() {
        let adapter = ArtifactFilesMultiAdapter::new(ArtifactFileInventoryParser);
        let host = HostContext::new();
        let mtime = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let mut script = PathDescriptor::from_pathspec(PathSpec::os("/etc/rc.local"))
            .with_size(120)
            .with_mtime(mtime);
        script.st_mode = 0o100755;

        let responses = vec![
            reference(script, None),
            reference(PathDescriptor::from_pathspec(PathSpec::os("/etc/profile")), None),
        ];

        let records: Vec<ParsedRecord> = adapter
            .parse_responses(&host, &responses)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("mode"), Some("100755"));
        assert_eq!(records[0].get_field("size"), Some(&serde_json::json!(120)));
        assert_eq!(records[0].get_str("modified"), Some("2024-03-01T12:00:00+00:00"));
        assert!(!records[1].has_field("modified"));
    }
}
