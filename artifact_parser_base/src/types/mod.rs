//! Value types exchanged between the collection layer, adapters and hooks

pub mod content;
pub mod host;
pub mod path;
pub mod record;
pub mod response;

pub use content::{handle_from_bytes, ContentHandle};
pub use host::{HostContext, HostUser};
pub use path::{PathDescriptor, PathSpec, PathType, RegistryData, RegistryType};
pub use record::ParsedRecord;
pub use response::{
    describe_shapes, ArtifactFileRef, BufferMatch, CollectedResponse, CommandResult,
    FileReference, FinderQuery, MatchResultSet, QueryRow, RegistryValue, ResponseShape,
};
