//! WMI `Win32_Product` parser

use artifact_parser_base::adapters::QueryParser;
use artifact_parser_base::contracts::{ParseError, ParseResult, ParserDefinition, ParserError};
use artifact_parser_base::types::{ParsedRecord, QueryRow};
use chrono::NaiveDate;
use serde_json::Value;

pub const WMI_SOFTWARE_PARSER: &str = "wmi_installed_software";

/// Copied through when present, renamed
const OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("Version", "version"),
    ("Vendor", "vendor"),
    ("Description", "description"),
    ("IdentifyingNumber", "product_code"),
];

pub struct WmiInstalledSoftwareParser;

impl WmiInstalledSoftwareParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WmiInstalledSoftwareParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserDefinition for WmiInstalledSoftwareParser {
    fn name(&self) -> &str {
        WMI_SOFTWARE_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["WMIInstalledSoftware".to_string()]
    }

    fn description(&self) -> &str {
        "Installed packages from Win32_Product rows"
    }
}

fn column_text(row: &QueryRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `InstallDate` is `yyyymmdd`; anything else is kept verbatim
fn install_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn software_package(row: &QueryRow) -> Result<ParsedRecord, ParserError> {
    let name = column_text(row, "Name")
        .ok_or_else(|| ParseError::malformed(WMI_SOFTWARE_PARSER, "row has no Name column"))?;

    let mut record = ParsedRecord::new("SoftwarePackage").with_field("name", name);

    for (column, field) in OPTIONAL_COLUMNS {
        if let Some(value) = column_text(row, column) {
            record.set_field(*field, value);
        }
    }

    if let Some(raw) = column_text(row, "InstallDate") {
        record.set_field("installed_on", install_date(&raw));
    }

    Ok(record)
}

impl QueryParser for WmiInstalledSoftwareParser {
    fn parse_multiple<'a>(&'a self, rows: Vec<&'a QueryRow>) -> ParseResult<'a> {
        Ok(Box::new(rows.into_iter().map(software_package)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::QueryAdapter;
    use artifact_parser_base::contracts::{ErrorKind, MultiResponseParser};
    use artifact_parser_base::types::{CollectedResponse, HostContext};
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> CollectedResponse {
        CollectedResponse::QueryRow(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_rows_become_packages() {
        let adapter = QueryAdapter::new(WmiInstalledSoftwareParser::new());
        let host = HostContext::new();
        let responses = vec![
            row(&[
                ("Name", json!("7-Zip 23.01 (x64)")),
                ("Version", json!("23.01.00.0")),
                ("Vendor", json!("Igor Pavlov")),
                ("InstallDate", json!("20240115")),
            ]),
            row(&[("Name", json!("Notepad++")), ("InstallDate", json!("unknown"))]),
        ];

        let records: Vec<ParsedRecord> = adapter
            .parse_responses(&host, &responses)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("name"), Some("7-Zip 23.01 (x64)"));
        assert_eq!(records[0].get_str("version"), Some("23.01.00.0"));
        assert_eq!(records[0].get_str("installed_on"), Some("2024-01-15"));
        assert_eq!(records[1].get_str("installed_on"), Some("unknown"));
        assert!(!records[1].has_field("vendor"));
    }

    #[test]
    fn test_row_without_name_fails_alone() {
        let adapter = QueryAdapter::new(WmiInstalledSoftwareParser::new());
        let host = HostContext::new();
        let responses = vec![
            row(&[("Version", json!("1.0"))]),
            row(&[("Name", json!("Git"))]),
        ];

        let items: Vec<_> = adapter.parse_responses(&host, &responses).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().err().unwrap().kind(), ErrorKind::ParseFailure);
        assert_eq!(items[1].as_ref().unwrap().get_str("name"), Some("Git"));
    }
}
