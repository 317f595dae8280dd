//! # Artifact Parser Base
//!
//! Contracts and adapters for turning collected forensic responses into typed
//! records. Collection layers hand a [`contracts::ParserRegistry`] one or more
//! [`types::CollectedResponse`] values; the registry routes them to a parser
//! whose adapter checks the response shape and calls an artifact-specific hook.

pub mod adapters;
pub mod config;
pub mod contracts;
pub mod types;

pub use config::{ConfigError, RegistryConfig};
pub use contracts::{ParserError, ParserRegistry, RegistryBuilder};

pub mod prelude {
    pub use crate::adapters::{
        ArtifactFilesAdapter, ArtifactFilesMultiAdapter, ArtifactFilesMultiParser,
        ArtifactFilesParser, CommandAdapter, CommandOutput, CommandParser, FileAdapter,
        FileMultiParser, FileParser, GrepAdapter, GrepParser, MultiFileAdapter, QueryAdapter,
        QueryParser, RegistryEntryAdapter, RegistryMultiAdapter, RegistryMultiParser,
        RegistryParser, RegistryValueAdapter, RegistryValueParser,
    };

    pub use crate::config::{ConfigError, RegistryConfig};

    pub use crate::contracts::{
        check_return, empty_stream, record_stream, stream_from, ContractKind, DefinitionError,
        ErrorKind, MultiFileParser, MultiResponseParser, ParseError, ParseResult,
        ParserDefinition, ParserDescriptor, ParserError, ParserRegistry, RecordStream,
        RegisteredParser, RegistryBuilder, SingleFileParser, SingleResponseParser,
    };

    pub use crate::types::{
        handle_from_bytes, ArtifactFileRef, BufferMatch, CollectedResponse, CommandResult,
        ContentHandle, FileReference, FinderQuery, HostContext, HostUser, MatchResultSet,
        ParsedRecord, PathDescriptor, PathSpec, PathType, QueryRow, RegistryData, RegistryType,
        RegistryValue, ResponseShape,
    };
}
