//! # Parser contracts
//!
//! Base capability contracts, the error taxonomy, shape validation, the
//! command postcondition check and the parser registry.

pub mod command_check;
pub mod errors;
pub mod registry;
pub mod traits;
pub mod validation;

pub use command_check::{check_return, SUCCESS_STATUS};
pub use errors::{DefinitionError, ErrorKind, ParseError, ParserError};
pub use registry::{
    ParserDescriptor, ParserRegistry, RegisteredParser, RegistryBuilder, RegistryStatistics,
};
pub use traits::{
    empty_stream, record_stream, stream_from, ContractKind, MultiFileParser,
    MultiResponseParser, ParseResult, ParserDefinition, RecordStream, SingleFileParser,
    SingleResponseParser,
};
