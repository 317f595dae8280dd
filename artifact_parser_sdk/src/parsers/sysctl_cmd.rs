//! Sysctl command parser
//!
//! Parses `sysctl -a` style `name = value` output into one record per kernel
//! parameter.

use artifact_parser_base::adapters::{CommandOutput, CommandParser};
use artifact_parser_base::contracts::{
    check_return, DefinitionError, ParseError, ParseResult, ParserDefinition, ParserError,
};
use artifact_parser_base::types::{HostContext, ParsedRecord};
use regex::Regex;

pub const SYSCTL_CMD_PARSER: &str = "sysctl_cmd";

pub struct SysctlCmdParser {
    line: Regex,
}

impl SysctlCmdParser {
    pub fn new() -> Result<Self, DefinitionError> {
        let line = Regex::new(r"^([A-Za-z0-9_.\-/]+)\s*=\s*(.*)$").map_err(|e| {
            DefinitionError::InvalidDefinition {
                parser: SYSCTL_CMD_PARSER.to_string(),
                reason: format!("line pattern: {}", e),
            }
        })?;
        Ok(Self { line })
    }

    fn parse_line(&self, number: usize, line: &str) -> Result<ParsedRecord, ParserError> {
        let caps = self
            .line
            .captures(line)
            .ok_or_else(|| ParseError::at_line(SYSCTL_CMD_PARSER, number, "expected 'name = value'"))?;

        Ok(ParsedRecord::new("SysctlParameter")
            .with_field("name", &caps[1])
            .with_field("value", caps[2].trim_end()))
    }
}

impl ParserDefinition for SysctlCmdParser {
    fn name(&self) -> &str {
        SYSCTL_CMD_PARSER
    }

    fn supported_artifacts(&self) -> Vec<String> {
        vec!["LinuxSysctlParameters".to_string()]
    }

    fn description(&self) -> &str {
        "Kernel parameters from sysctl output"
    }
}

impl CommandParser for SysctlCmdParser {
    fn parse<'a>(&'a self, output: CommandOutput<'a>, _host: &'a HostContext) -> ParseResult<'a> {
        // Partial output from a failed sysctl is not trustworthy
        check_return(output.cmd, output.exit_status)?;

        Ok(Box::new(
            output
                .stdout
                .split(|b| *b == b'\n')
                .enumerate()
                .filter_map(move |(index, raw)| {
                    let line = String::from_utf8_lossy(raw);
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                        return None;
                    }
                    Some(self.parse_line(index + 1, line))
                }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_parser_base::adapters::CommandAdapter;
    use artifact_parser_base::contracts::{ErrorKind, SingleResponseParser};
    use artifact_parser_base::types::{CollectedResponse, CommandResult, PathType};

    fn run(result: CommandResult) -> Result<Vec<Result<ParsedRecord, ParserError>>, ParserError> {
        let adapter = CommandAdapter::new(SysctlCmdParser::new().unwrap());
        let host = HostContext::new();
        let response = CollectedResponse::Command(result);
        let stream = adapter.parse_response(&host, &response, PathType::Os)?;
        Ok(stream.collect())
    }

    #[test]
    fn test_parses_parameters() {
        let result = CommandResult::new("/sbin/sysctl", vec!["-a".into()]).with_stdout(
            "kernel.sysrq = 1\n# comment\n\nnet.ipv4.ip_forward=0\nkernel.hostname = web 01  \n",
        );

        let records: Vec<ParsedRecord> = run(result)
            .unwrap()
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get_str("name"), Some("kernel.sysrq"));
        assert_eq!(records[0].get_str("value"), Some("1"));
        assert_eq!(records[1].get_str("name"), Some("net.ipv4.ip_forward"));
        assert_eq!(records[1].get_str("value"), Some("0"));
        assert_eq!(records[2].get_str("value"), Some("web 01"));
    }

    #[test]
    fn test_malformed_line_is_item_failure() {
        let result = CommandResult::new("/sbin/sysctl", vec!["-a".into()])
            .with_stdout("kernel.sysrq = 1\ngarbage\nvm.swappiness = 60\n");

        let items = run(result).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        let err = items[1].as_ref().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert!(err.to_string().contains("line 2"));
        assert!(items[2].is_ok());
    }

    #[test]
    fn test_nonzero_exit_fails_whole_call() {
        let result = CommandResult::new("/sbin/sysctl", vec!["-a".into()])
            .with_stdout("kernel.sysrq = 1\n")
            .with_exit_status(5);

        let err = run(result).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::CommandFailure);
        assert!(err.to_string().contains("/sbin/sysctl"));
        assert!(err.to_string().contains('5'));
    }
}
