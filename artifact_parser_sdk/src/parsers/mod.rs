//! # Reference Parsers
//!
//! Artifact hooks bundled with the SDK:
//! - SysctlCmdParser: kernel parameters from `sysctl -a`
//! - HostsFileParser: static host mappings from `/etc/hosts`
//! - OsReleaseFilesParser: distribution identity from os-release files
//! - WmiInstalledSoftwareParser: installed packages from `Win32_Product`
//! - WindowsSystemRootParser, RegistryValueStatParser, WindowsRunKeysParser:
//!   registry values
//! - GrepMatchesParser: file-finder content matches
//! - ArtifactFileReferenceParser, ArtifactFileInventoryParser: files referenced
//!   by other artifacts

pub mod artifact_files;
pub mod grep_matches;
pub mod hosts_file;
pub mod os_release;
pub mod sysctl_cmd;
pub mod windows_registry;
pub mod wmi_software;

pub use artifact_files::{ArtifactFileInventoryParser, ArtifactFileReferenceParser};
pub use grep_matches::GrepMatchesParser;
pub use hosts_file::HostsFileParser;
pub use os_release::OsReleaseFilesParser;
pub use sysctl_cmd::SysctlCmdParser;
pub use windows_registry::{RegistryValueStatParser, WindowsRunKeysParser, WindowsSystemRootParser};
pub use wmi_software::WmiInstalledSoftwareParser;
