//! Host context (knowledge base) supplied to every parse call

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user account known on the host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostUser {
    pub username: String,
    pub uid: Option<u32>,
    pub sid: Option<String>,
    pub homedir: Option<String>,
}

/// Read-only interpretive data about the originating host
///
/// Parsers receive it by shared reference and can never modify it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostContext {
    pub fqdn: Option<String>,
    pub os: Option<String>,
    pub os_release: Option<String>,
    pub os_major_version: Option<u32>,
    pub os_minor_version: Option<u32>,
    pub environ_systemroot: Option<String>,
    pub environ_windir: Option<String>,
    pub users: Vec<HostUser>,
    pub environment: BTreeMap<String, String>,
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Expand `%VAR%` references using the Windows environment fields and the
    /// environment map. Unknown references are left untouched.
    pub fn expand_windows_env(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(end) => {
                    let name = &after[..end];
                    match self.lookup_env(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('%');
                            out.push_str(name);
                            out.push('%');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn lookup_env(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "systemroot" => self.environ_systemroot.as_deref(),
            "windir" => self.environ_windir.as_deref(),
            _ => self
                .environment
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
        }
    }
}
