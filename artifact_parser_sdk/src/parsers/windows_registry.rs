//! Windows registry parsers
//!
//! - [`WindowsSystemRootParser`]: the `SystemRoot` value, in either form
//! - [`RegistryValueStatParser`]: full stat of a single value
//! - [`WindowsRunKeysParser`]: `Run`/`RunOnce` values grouped by key

use artifact_parser_base::adapters::{RegistryMultiParser, RegistryParser, RegistryValueParser};
use artifact_parser_base::contracts::{record_stream, ParseError, ParseResult, ParserDefinition};
use artifact_parser_base::types::{HostContext, ParsedRecord, PathDescriptor, RegistryValue};
use serde_json::json;
use std::collections::BTreeMap;

pub const SYSTEM_ROOT_PARSER: &str = "windows_system_root";
pub const REGISTRY_STAT_PARSER: &str = "registry_value_stat";
pub const RUN_KEYS_PARSER: &str = "windows_run_keys";

fn value_text(stat: &PathDescriptor) -> Option<String> {
    stat.registry_data.as_ref().and_then(|data| data.as_text())
}

pub struct WindowsSystemRootParser;

impl ParserDefinition for WindowsSystemRootParser {
    fn name(&self) -> &str {
        SYSTEM_ROOT_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["WindowsEnvironmentVariableSystemRoot".to_string()]
    }

    fn description(&self) -> &str {
        "Windows system root directory"
    }
}

impl RegistryValueParser for WindowsSystemRootParser {
    fn parse<'a>(&'a self, value: &'a RegistryValue, host: &'a HostContext) -> ParseResult<'a> {
        let raw = match value {
            RegistryValue::Descriptor(stat) => value_text(stat).unwrap_or_default(),
            RegistryValue::RawString(s) => s.clone(),
        };

        let expanded = host.expand_windows_env(raw.trim());
        if expanded.is_empty() {
            return Err(ParseError::malformed(SYSTEM_ROOT_PARSER, "SystemRoot value is empty").into());
        }

        Ok(record_stream(vec![ParsedRecord::new("EnvironmentVariable")
            .with_field("name", "SystemRoot")
            .with_field("value", expanded)]))
    }
}

pub struct RegistryValueStatParser;

impl ParserDefinition for RegistryValueStatParser {
    fn name(&self) -> &str {
        REGISTRY_STAT_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["WindowsRegistryValueStat".to_string()]
    }
}

impl RegistryParser for RegistryValueStatParser {
    fn parse<'a>(&'a self, stat: &'a PathDescriptor, _host: &'a HostContext) -> ParseResult<'a> {
        let mut record = ParsedRecord::new("RegistryValueStat")
            .with_field("path", stat.path())
            .with_field("key", stat.pathspec.dirname())
            .with_field("value_name", stat.pathspec.basename());

        if let Some(kind) = stat.registry_type {
            record.set_field("registry_type", json!(kind));
        }
        if let Some(data) = &stat.registry_data {
            record.set_field("data", json!(data));
        }
        if let Some(mtime) = stat.st_mtime {
            record.set_field("modified", mtime.to_rfc3339());
        }

        Ok(record_stream(vec![record]))
    }
}

pub struct WindowsRunKeysParser;

impl ParserDefinition for WindowsRunKeysParser {
    fn name(&self) -> &str {
        RUN_KEYS_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["WindowsRunKeys".to_string()]
    }

    fn description(&self) -> &str {
        "Autostart commands from Run and RunOnce keys"
    }
}

impl RegistryMultiParser for WindowsRunKeysParser {
    fn parse_multiple<'a>(
        &'a self,
        stats: Vec<&'a PathDescriptor>,
        host: &'a HostContext,
    ) -> ParseResult<'a> {
        let mut keys: BTreeMap<&str, Vec<serde_json::Value>> = BTreeMap::new();

        for stat in stats {
            let Some(command) = value_text(stat) else {
                log::debug!("{}: {} has no text data, skipping", RUN_KEYS_PARSER, stat.path());
                continue;
            };

            keys.entry(stat.pathspec.dirname()).or_default().push(json!({
                "name": stat.pathspec.basename(),
                "command": host.expand_windows_env(&command),
            }));
        }

        Ok(record_stream(
            keys.into_iter()
                .map(|(key, entries)| {
                    ParsedRecord::new("RunKey")
                        .with_field("key", key)
                        .with_field("entries", entries)
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::{
        RegistryEntryAdapter, RegistryMultiAdapter, RegistryValueAdapter,
    };
    use artifact_parser_base::contracts::{
        DefinitionError, MultiResponseParser, ParserError, SingleResponseParser,
    };
    use artifact_parser_base::types::{
        CollectedResponse, PathSpec, PathType, RegistryData, RegistryType,
    };
    use assert_matches::assert_matches;

    const RUN: &str = r"HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows\CurrentVersion\Run";
    const RUN_ONCE: &str = r"HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows\CurrentVersion\RunOnce";

    fn value(path: &str, data: &str) -> PathDescriptor {
        PathDescriptor::from_pathspec(PathSpec::registry(path))
            .with_registry_data(RegistryType::RegExpandSz, RegistryData::String(data.into()))
    }

    fn windows_host() -> HostContext {
        let mut host = HostContext::new()
            .with_os("Windows")
            .with_env("ProgramFiles", r"C:\Program Files");
        host.environ_systemroot = Some(r"C:\Windows".to_string());
        host
    }

    #[test]
    fn test_system_root_from_either_form() {
        let adapter = RegistryValueAdapter::new(WindowsSystemRootParser);
        let host = windows_host();

        let responses = [
            CollectedResponse::Registry(RegistryValue::Descriptor(value(
                r"HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows NT\CurrentVersion\SystemRoot",
                r"C:\Windows",
            ))),
            CollectedResponse::Registry(RegistryValue::RawString(r"C:\Windows".into())),
        ];

        for response in &responses {
            let records: Vec<ParsedRecord> = adapter
                .parse_response(&host, response, PathType::Registry)
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            assert_eq!(records[0].get_str("value"), Some(r"C:\Windows"));
        }

        let empty = CollectedResponse::Registry(RegistryValue::RawString("  ".into()));
        let err = adapter
            .parse_response(&host, &empty, PathType::Registry)
            .err()
            .unwrap();
        assert!(!err.is_definition_defect());
    }

    #[test]
    fn test_value_stat_requires_descriptor() {
        let adapter = RegistryEntryAdapter::new(RegistryValueStatParser);
        let host = windows_host();

        let descriptor = CollectedResponse::Registry(RegistryValue::Descriptor(value(
            &format!(r"{}\OneDrive", RUN),
            r"%ProgramFiles%\OneDrive.exe",
        )));
        let records: Vec<ParsedRecord> = adapter
            .parse_response(&host, &descriptor, PathType::Registry)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records[0].get_str("key"), Some(RUN));
        assert_eq!(records[0].get_str("value_name"), Some("OneDrive"));
        assert_eq!(
            records[0].get_field("registry_type"),
            Some(&json!("REG_EXPAND_SZ"))
        );

        let raw = CollectedResponse::Registry(RegistryValue::RawString("x".into()));
        let err = adapter
            .parse_response(&host, &raw, PathType::Registry)
            .err()
            .unwrap();
        assert_matches!(err, ParserError::Definition(DefinitionError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_run_keys_grouped_by_parent() {
        let adapter = RegistryMultiAdapter::new(WindowsRunKeysParser);
        let host = windows_host();

        let responses: Vec<CollectedResponse> = vec![
            value(&format!(r"{}\OneDrive", RUN), r"%ProgramFiles%\OneDrive.exe"),
            value(&format!(r"{}\Cleanup", RUN_ONCE), "cleanmgr.exe /autoclean"),
            value(&format!(r"{}\Defender", RUN), r"%SystemRoot%\defender.exe"),
            PathDescriptor::from_pathspec(PathSpec::registry(format!(r"{}\Empty", RUN))),
        ]
        .into_iter()
        .map(|stat| CollectedResponse::Registry(RegistryValue::Descriptor(stat)))
        .collect();

        let records: Vec<ParsedRecord> = adapter
            .parse_responses(&host, &responses)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("key"), Some(RUN));
        assert_eq!(
            records[0].get_field("entries"),
            Some(&json!([
                {"name": "OneDrive", "command": r"C:\Program Files\OneDrive.exe"},
                {"name": "Defender", "command": r"C:\Windows\defender.exe"}
            ]))
        );
        assert_eq!(records[1].get_str("key"), Some(RUN_ONCE));
    }
}
