// src/types/response.rs
//! Collected responses handed to parsers
//!
//! [`CollectedResponse`] is the closed set of shapes the collection layer can
//! deliver. Adapters match on it exhaustively; a variant they do not accept is
//! a wiring defect, never a parse failure.

use super::content::{base64_bytes, handle_from_bytes, ContentHandle};
use super::path::{PathDescriptor, PathSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Result of running a command on the host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandResult {
    pub cmd: String,
    pub args: Vec<String>,
    #[serde(with = "base64_bytes")]
    pub stdout: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub stderr: Vec<u8>,
    pub exit_status: i32,
    pub time_used: Duration,
}

impl CommandResult {
    pub fn new(cmd: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args,
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<Vec<u8>>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_exit_status(mut self, status: i32) -> Self {
        self.exit_status = status;
        self
    }

    pub fn with_time_used(mut self, time_used: Duration) -> Self {
        self.time_used = time_used;
        self
    }

    /// Command line as typed, for messages
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.cmd.clone()
        } else {
            format!("{} {}", self.cmd, self.args.join(" "))
        }
    }
}

/// A collected file: its descriptor plus the downloaded content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReference {
    pub descriptor: PathDescriptor,
    #[serde(with = "base64_bytes", default)]
    pub content: Vec<u8>,
}

impl FileReference {
    pub fn new(descriptor: PathDescriptor, content: impl Into<Vec<u8>>) -> Self {
        Self {
            descriptor,
            content: content.into(),
        }
    }

    pub fn pathspec(&self) -> &PathSpec {
        &self.descriptor.pathspec
    }

    /// Open the content as a handle borrowing this reference
    pub fn open(&self) -> ContentHandle<'_> {
        handle_from_bytes(&self.content)
    }
}

/// A registry value, either as a full descriptor or as a bare string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryValue {
    Descriptor(PathDescriptor),
    RawString(String),
}

/// One row of a structured (WMI-style) query result
pub type QueryRow = BTreeMap<String, Value>;

/// The file-finder query a match set originated from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderQuery {
    pub paths: Vec<String>,
    pub condition: String,
}

/// A single grep-style hit inside a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferMatch {
    pub offset: u64,
    pub length: u64,
    #[serde(with = "base64_bytes", default)]
    pub data: Vec<u8>,
}

/// Grep-style results for one file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResultSet {
    pub query: FinderQuery,
    pub stat: PathDescriptor,
    pub matches: Vec<BufferMatch>,
}

/// A file reference derived from an artifact definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFileRef {
    pub descriptor: PathDescriptor,
    #[serde(default)]
    pub source_artifact: Option<String>,
}

/// Every shape the collection layer can deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CollectedResponse {
    Command(CommandResult),
    File(FileReference),
    Registry(RegistryValue),
    QueryRow(QueryRow),
    MatchSet(MatchResultSet),
    ArtifactFile(ArtifactFileRef),
}

impl CollectedResponse {
    /// Runtime shape of this response, including the registry sub-form
    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::Command(_) => ResponseShape::Command,
            Self::File(_) => ResponseShape::File,
            Self::Registry(RegistryValue::Descriptor(_)) => ResponseShape::RegistryDescriptor,
            Self::Registry(RegistryValue::RawString(_)) => ResponseShape::RegistryString,
            Self::QueryRow(_) => ResponseShape::QueryRow,
            Self::MatchSet(_) => ResponseShape::MatchSet,
            Self::ArtifactFile(_) => ResponseShape::ArtifactFile,
        }
    }
}

/// Runtime shape tag of a [`CollectedResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    Command,
    File,
    RegistryDescriptor,
    RegistryString,
    QueryRow,
    MatchSet,
    ArtifactFile,
}

impl ResponseShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command_result",
            Self::File => "file_reference",
            Self::RegistryDescriptor => "registry_value(descriptor)",
            Self::RegistryString => "registry_value(raw_string)",
            Self::QueryRow => "query_row",
            Self::MatchSet => "match_result_set",
            Self::ArtifactFile => "artifact_file_ref",
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable list of accepted shapes, e.g. `a or b`
pub fn describe_shapes(shapes: &[ResponseShape]) -> String {
    shapes
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}
