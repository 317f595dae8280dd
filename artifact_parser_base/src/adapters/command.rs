// src/adapters/command.rs
//! Command output adapter

use crate::contracts::validation::shape_mismatch;
use crate::contracts::{ParseResult, ParserDefinition, SingleResponseParser};
use crate::types::{CollectedResponse, HostContext, PathType, ResponseShape};
use std::time::Duration;

const ACCEPTED: &[ResponseShape] = &[ResponseShape::Command];

/// Unpacked command result handed to [`CommandParser::parse`]
#[derive(Debug, Clone, Copy)]
pub struct CommandOutput<'a> {
    pub cmd: &'a str,
    pub args: &'a [String],
    pub stdout: &'a [u8],
    pub stderr: &'a [u8],
    pub exit_status: i32,
    pub time_used: Duration,
}

impl<'a> CommandOutput<'a> {
    /// Stdout decoded lossily as UTF-8
    pub fn stdout_text(&self) -> std::borrow::Cow<'a, str> {
        String::from_utf8_lossy(self.stdout)
    }
}

/// Hook for parsers of command output
pub trait CommandParser: ParserDefinition {
    /// Turn one command's output into records
    ///
    /// A non-zero exit status is not checked for you; call
    /// [`crate::contracts::check_return`] if it matters.
    fn parse<'a>(&'a self, output: CommandOutput<'a>, host: &'a HostContext) -> ParseResult<'a>;
}

/// Binds a [`CommandParser`] to the single-response contract
pub struct CommandAdapter<P> {
    parser: P,
}

delegate_definition!(CommandAdapter, CommandParser);

impl<P: CommandParser> SingleResponseParser for CommandAdapter<P> {
    fn accepted_shapes(&self) -> &'static [ResponseShape] {
        ACCEPTED
    }

    fn parse_response<'a>(
        &'a self,
        host: &'a HostContext,
        response: &'a CollectedResponse,
        _path_type: PathType,
    ) -> ParseResult<'a> {
        let result = match response {
            CollectedResponse::Command(result) => result,
            other => return Err(shape_mismatch(self.name(), ACCEPTED, other.shape()).into()),
        };

        let output = CommandOutput {
            cmd: &result.cmd,
            args: &result.args,
            stdout: &result.stdout,
            stderr: &result.stderr,
            exit_status: result.exit_status,
            time_used: result.time_used,
        };

        self.parser.parse(output, host)
    }
}
