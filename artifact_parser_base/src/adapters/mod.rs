//! # Shape-specialized adapters
//!
//! Each adapter binds one hook trait to one base contract and one response
//! shape. Entry points follow the same three steps:
//!
//! 1. Match the response (or every batch element) against the declared shape;
//!    anything else is a [`crate::contracts::DefinitionError`].
//! 2. Unpack the variant into the arguments the hook expects.
//! 3. Call the hook and return its stream or failure unchanged.
//!
//! | Adapter | Hook | Contract |
//! |---|---|---|
//! | [`CommandAdapter`] | [`CommandParser`] | single response |
//! | [`FileAdapter`] | [`FileParser`] | single file (legacy bridge) |
//! | [`MultiFileAdapter`] | [`FileMultiParser`] | multi file (legacy bridge) |
//! | [`QueryAdapter`] | [`QueryParser`] | multi response |
//! | [`RegistryValueAdapter`] | [`RegistryValueParser`] | single response |
//! | [`RegistryEntryAdapter`] | [`RegistryParser`] | single response |
//! | [`RegistryMultiAdapter`] | [`RegistryMultiParser`] | multi response |
//! | [`GrepAdapter`] | [`GrepParser`] | single response |
//! | [`ArtifactFilesAdapter`] | [`ArtifactFilesParser`] | single response |
//! | [`ArtifactFilesMultiAdapter`] | [`ArtifactFilesMultiParser`] | multi response |

/// Implements `new` and [`crate::contracts::ParserDefinition`] for an adapter
/// wrapping a hook in its `parser` field
macro_rules! delegate_definition {
    ($adapter:ident, $hook:ident) => {
        impl<P: $hook> $adapter<P> {
            pub fn new(parser: P) -> Self {
                Self { parser }
            }
        }

        impl<P: $hook> $crate::contracts::ParserDefinition for $adapter<P> {
            fn name(&self) -> &str {
                self.parser.name()
            }

            fn supported_artifacts(&self) -> Vec<String> {
                self.parser.supported_artifacts()
            }

            fn description(&self) -> &str {
                self.parser.description()
            }
        }
    };
}

pub mod artifact_files;
pub mod command;
pub mod file;
pub mod grep;
pub mod query;
pub mod registry;

pub use artifact_files::{
    ArtifactFilesAdapter, ArtifactFilesMultiAdapter, ArtifactFilesMultiParser,
    ArtifactFilesParser,
};
pub use command::{CommandAdapter, CommandOutput, CommandParser};
pub use file::{FileAdapter, FileMultiParser, FileParser, MultiFileAdapter};
pub use grep::{GrepAdapter, GrepParser};
pub use query::{QueryAdapter, QueryParser};
pub use registry::{
    RegistryEntryAdapter, RegistryMultiAdapter, RegistryMultiParser, RegistryParser,
    RegistryValueAdapter, RegistryValueParser,
};
