//! # Artifact Parser SDK
//!
//! Reference parsers for common Linux and Windows artifacts, and a ready-made
//! registry wiring each one to its adapter.

pub mod parsers;

use artifact_parser_base::adapters::{
    ArtifactFilesAdapter, ArtifactFilesMultiAdapter, CommandAdapter, FileAdapter, GrepAdapter,
    MultiFileAdapter, QueryAdapter, RegistryEntryAdapter, RegistryMultiAdapter,
    RegistryValueAdapter,
};
use artifact_parser_base::contracts::{DefinitionError, ParserRegistry, RegistryBuilder};
use artifact_parser_base::RegistryConfig;

/// Create a registry with every bundled parser
///
/// Parsers named in `config.disabled_parsers` are left out.
pub fn create_parser_registry(config: &RegistryConfig) -> Result<ParserRegistry, DefinitionError> {
    let registry = RegistryBuilder::new(config.clone())
        // Linux
        .add_single(CommandAdapter::new(parsers::SysctlCmdParser::new()?))?
        .add_single_file(FileAdapter::new(parsers::HostsFileParser::new()))?
        .add_multi_file(MultiFileAdapter::new(parsers::OsReleaseFilesParser::new()?))?
        // Windows
        .add_multi(QueryAdapter::new(parsers::WmiInstalledSoftwareParser::new()))?
        .add_single(RegistryValueAdapter::new(parsers::WindowsSystemRootParser))?
        .add_single(RegistryEntryAdapter::new(parsers::RegistryValueStatParser))?
        .add_multi(RegistryMultiAdapter::new(parsers::WindowsRunKeysParser))?
        // Any platform
        .add_single(GrepAdapter::new(parsers::GrepMatchesParser))?
        .add_single(ArtifactFilesAdapter::new(parsers::ArtifactFileReferenceParser))?
        .add_multi(ArtifactFilesMultiAdapter::new(parsers::ArtifactFileInventoryParser))?
        .build();

    Ok(registry)
}
