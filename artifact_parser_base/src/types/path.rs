// src/types/path.rs
//! Path specifications and stat-like path descriptors
//!
//! A [`PathSpec`] is the reduced form older file parsers were written against:
//! a path and the access method used to reach it. A [`PathDescriptor`] carries
//! the full stat metadata produced by collection and is also used as the
//! synthetic value built by the legacy file bridges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access method used to reach a path on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    #[default]
    Unset,
    Os,
    Tsk,
    Ntfs,
    Registry,
    Temp,
}

impl PathType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Os => "os",
            Self::Tsk => "tsk",
            Self::Ntfs => "ntfs",
            Self::Registry => "registry",
            Self::Temp => "temp",
        }
    }

    /// Parse the lowercase name used on the command line and in JSON
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unset" => Some(Self::Unset),
            "os" => Some(Self::Os),
            "tsk" => Some(Self::Tsk),
            "ntfs" => Some(Self::Ntfs),
            "registry" => Some(Self::Registry),
            "temp" => Some(Self::Temp),
            _ => None,
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path plus the access method used to reach it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PathSpec {
    pub path: String,
    #[serde(default)]
    pub path_type: PathType,
}

impl PathSpec {
    pub fn new(path: impl Into<String>, path_type: PathType) -> Self {
        Self {
            path: path.into(),
            path_type,
        }
    }

    /// Operating-system path
    pub fn os(path: impl Into<String>) -> Self {
        Self::new(path, PathType::Os)
    }

    /// Registry key or value path
    pub fn registry(path: impl Into<String>) -> Self {
        Self::new(path, PathType::Registry)
    }

    /// Final component of the path, accepting both `/` and `\` separators
    pub fn basename(&self) -> &str {
        self.path
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.path)
    }

    /// Everything before the final component, or an empty string
    pub fn dirname(&self) -> &str {
        match self.path.rfind(|c| c == '/' || c == '\\') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path_type, self.path)
    }
}

/// Windows registry value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryType {
    RegNone,
    RegSz,
    RegExpandSz,
    RegBinary,
    RegDword,
    RegDwordBigEndian,
    RegLink,
    RegMultiSz,
    RegQword,
}

/// Decoded data of a registry value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RegistryData {
    String(String),
    Integer(u64),
    Binary(#[serde(with = "crate::types::content::base64_bytes")] Vec<u8>),
    MultiString(Vec<String>),
}

impl RegistryData {
    /// String view of the data, joining multi-strings with NUL the way the
    /// registry stores them
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::MultiString(parts) => Some(parts.join("\0")),
            Self::Binary(_) => None,
        }
    }
}

/// Stat-like record for a collected path
///
/// Only `pathspec` is mandatory; every other attribute defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDescriptor {
    pub pathspec: PathSpec,
    pub st_mode: u32,
    pub st_ino: u64,
    pub st_dev: u64,
    pub st_nlink: u64,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_size: u64,
    pub st_atime: Option<DateTime<Utc>>,
    pub st_mtime: Option<DateTime<Utc>>,
    pub st_ctime: Option<DateTime<Utc>>,
    pub symlink: Option<String>,
    pub registry_type: Option<RegistryType>,
    pub registry_data: Option<RegistryData>,
}

impl PathDescriptor {
    /// Minimal descriptor carrying only the pathspec
    pub fn from_pathspec(pathspec: PathSpec) -> Self {
        Self {
            pathspec,
            ..Self::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.pathspec.path
    }

    /// Attach registry value data
    pub fn with_registry_data(mut self, kind: RegistryType, data: RegistryData) -> Self {
        self.registry_type = Some(kind);
        self.registry_data = Some(data);
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.st_size = size;
        self
    }

    pub fn with_mtime(mut self, mtime: DateTime<Utc>) -> Self {
        self.st_mtime = Some(mtime);
        self
    }

    /// True when no stat attribute beyond the pathspec has been populated
    pub fn is_bare(&self) -> bool {
        *self == Self::from_pathspec(self.pathspec.clone())
    }
}
