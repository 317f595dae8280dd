// src/contracts/registry.rs
//! Parser registry
//!
//! Parsers are registered once through [`RegistryBuilder`], which validates
//! every definition, and the resulting [`ParserRegistry`] is immutable. The
//! registry is the uniform entry point for orchestrators: it routes a batch of
//! collected responses to a named parser according to that parser's contract.

use crate::config::RegistryConfig;
use crate::contracts::errors::{DefinitionError, ParserError};
use crate::contracts::traits::{
    ContractKind, MultiFileParser, MultiResponseParser, ParseResult, SingleFileParser,
    SingleResponseParser,
};
use crate::contracts::validation::{
    expect_single, extract_batch, shape_mismatch, validate_definition,
};
use crate::types::{
    CollectedResponse, FileReference, HostContext, PathType, ResponseShape,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const FILE_SHAPES: &[ResponseShape] = &[ResponseShape::File];

/// A parser stored under one of the four base contracts
pub enum RegisteredParser {
    SingleResponse(Box<dyn SingleResponseParser>),
    MultiResponse(Box<dyn MultiResponseParser>),
    SingleFile(Box<dyn SingleFileParser>),
    MultiFile(Box<dyn MultiFileParser>),
}

impl RegisteredParser {
    pub fn contract(&self) -> ContractKind {
        match self {
            Self::SingleResponse(_) => ContractKind::SingleResponse,
            Self::MultiResponse(_) => ContractKind::MultiResponse,
            Self::SingleFile(_) => ContractKind::SingleFile,
            Self::MultiFile(_) => ContractKind::MultiFile,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SingleResponse(p) => p.name(),
            Self::MultiResponse(p) => p.name(),
            Self::SingleFile(p) => p.name(),
            Self::MultiFile(p) => p.name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::SingleResponse(p) => p.description(),
            Self::MultiResponse(p) => p.description(),
            Self::SingleFile(p) => p.description(),
            Self::MultiFile(p) => p.description(),
        }
    }

    pub fn supported_artifacts(&self) -> Vec<String> {
        match self {
            Self::SingleResponse(p) => p.supported_artifacts(),
            Self::MultiResponse(p) => p.supported_artifacts(),
            Self::SingleFile(p) => p.supported_artifacts(),
            Self::MultiFile(p) => p.supported_artifacts(),
        }
    }

    /// Response shapes the registry will route to this parser
    ///
    /// File contracts are fed from `File` responses.
    pub fn accepted_shapes(&self) -> &'static [ResponseShape] {
        match self {
            Self::SingleResponse(p) => p.accepted_shapes(),
            Self::MultiResponse(p) => p.accepted_shapes(),
            Self::SingleFile(_) | Self::MultiFile(_) => FILE_SHAPES,
        }
    }

    pub fn supports_artifact(&self, artifact: &str) -> bool {
        self.supported_artifacts().iter().any(|a| a == artifact)
    }

    pub fn descriptor(&self) -> ParserDescriptor {
        ParserDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            contract: self.contract(),
            accepted_shapes: self.accepted_shapes().to_vec(),
            supported_artifacts: self.supported_artifacts(),
        }
    }
}

/// Catalog entry describing one registered parser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParserDescriptor {
    pub name: String,
    pub description: String,
    pub contract: ContractKind,
    pub accepted_shapes: Vec<ResponseShape>,
    pub supported_artifacts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatistics {
    pub total_parsers: usize,
    pub single_response: usize,
    pub multi_response: usize,
    pub single_file: usize,
    pub multi_file: usize,
    pub artifacts_covered: usize,
    pub disabled_skipped: usize,
}

/// Immutable name-keyed collection of parsers
pub struct ParserRegistry {
    parsers: BTreeMap<String, RegisteredParser>,
    config: RegistryConfig,
    disabled_skipped: usize,
}

impl ParserRegistry {
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn get(&self, name: &str) -> Result<&RegisteredParser, DefinitionError> {
        self.parsers
            .get(name)
            .ok_or_else(|| DefinitionError::UnknownParser(name.to_string()))
    }

    pub fn has_parser(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    pub fn single(&self, name: &str) -> Result<&dyn SingleResponseParser, DefinitionError> {
        match self.get(name)? {
            RegisteredParser::SingleResponse(p) => Ok(p.as_ref()),
            other => Err(contract_mismatch(other, ContractKind::SingleResponse)),
        }
    }

    pub fn multi(&self, name: &str) -> Result<&dyn MultiResponseParser, DefinitionError> {
        match self.get(name)? {
            RegisteredParser::MultiResponse(p) => Ok(p.as_ref()),
            other => Err(contract_mismatch(other, ContractKind::MultiResponse)),
        }
    }

    pub fn single_file(&self, name: &str) -> Result<&dyn SingleFileParser, DefinitionError> {
        match self.get(name)? {
            RegisteredParser::SingleFile(p) => Ok(p.as_ref()),
            other => Err(contract_mismatch(other, ContractKind::SingleFile)),
        }
    }

    pub fn multi_file(&self, name: &str) -> Result<&dyn MultiFileParser, DefinitionError> {
        match self.get(name)? {
            RegisteredParser::MultiFile(p) => Ok(p.as_ref()),
            other => Err(contract_mismatch(other, ContractKind::MultiFile)),
        }
    }

    /// Parsers of one contract that declare support for `artifact`
    pub fn select(&self, contract: ContractKind, artifact: &str) -> Vec<&RegisteredParser> {
        self.parsers
            .values()
            .filter(|p| p.contract() == contract && p.supports_artifact(artifact))
            .collect()
    }

    /// Parsers of any contract that declare support for `artifact`
    pub fn parsers_for_artifact(&self, artifact: &str) -> Vec<&RegisteredParser> {
        self.parsers
            .values()
            .filter(|p| p.supports_artifact(artifact))
            .collect()
    }

    /// Sorted by parser name
    pub fn descriptors(&self) -> Vec<ParserDescriptor> {
        self.parsers.values().map(RegisteredParser::descriptor).collect()
    }

    pub fn list_parsers(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    pub fn get_statistics(&self) -> RegistryStatistics {
        let count = |kind: ContractKind| {
            self.parsers
                .values()
                .filter(|p| p.contract() == kind)
                .count()
        };

        let artifacts: BTreeSet<String> = self
            .parsers
            .values()
            .flat_map(RegisteredParser::supported_artifacts)
            .collect();

        RegistryStatistics {
            total_parsers: self.parsers.len(),
            single_response: count(ContractKind::SingleResponse),
            multi_response: count(ContractKind::MultiResponse),
            single_file: count(ContractKind::SingleFile),
            multi_file: count(ContractKind::MultiFile),
            artifacts_covered: artifacts.len(),
            disabled_skipped: self.disabled_skipped,
        }
    }

    /// Route `responses` to the parser registered as `name`
    ///
    /// Single contracts take exactly one response. File contracts take `File`
    /// responses whose content is opened as the handle(s). Definition defects
    /// are logged at warn before being returned.
    pub fn dispatch<'a>(
        &'a self,
        name: &str,
        host: &'a HostContext,
        responses: &'a [CollectedResponse],
        path_type: PathType,
    ) -> ParseResult<'a> {
        let result = self.route(name, host, responses, path_type);

        if let Err(ParserError::Definition(defect)) = &result {
            log::warn!("Dispatch to '{}' rejected: {}", name, defect);
        }

        result
    }

    fn route<'a>(
        &'a self,
        name: &str,
        host: &'a HostContext,
        responses: &'a [CollectedResponse],
        path_type: PathType,
    ) -> ParseResult<'a> {
        let parser = self.get(name)?;

        if self.config.trace_dispatch {
            log::debug!(
                "Dispatching {} response(s) to '{}' ({}, path type {})",
                responses.len(),
                name,
                parser.contract(),
                path_type
            );
        }

        match parser {
            RegisteredParser::SingleResponse(p) => {
                let response = expect_single(p.name(), responses)?;
                p.parse_response(host, response, path_type)
            }
            RegisteredParser::MultiResponse(p) => p.parse_responses(host, responses),
            RegisteredParser::SingleFile(p) => {
                let file = match expect_single(p.name(), responses)? {
                    CollectedResponse::File(file) => file,
                    other => return Err(shape_mismatch(p.name(), FILE_SHAPES, other.shape()).into()),
                };
                p.parse_file(host, file.pathspec(), file.open())
            }
            RegisteredParser::MultiFile(p) => {
                let files: Vec<&FileReference> =
                    extract_batch(p.name(), FILE_SHAPES, responses, |r| match r {
                        CollectedResponse::File(file) => Some(file),
                        _ => None,
                    })?;

                let pathspecs = files.iter().copied().map(FileReference::pathspec).collect();
                let handles = files.iter().copied().map(FileReference::open).collect();
                p.parse_files(host, pathspecs, handles)
            }
        }
    }
}

fn contract_mismatch(parser: &RegisteredParser, requested: ContractKind) -> DefinitionError {
    DefinitionError::ContractMismatch {
        parser: parser.name().to_string(),
        declared: parser.contract(),
        requested,
    }
}

/// Builder validating and collecting parser registrations
pub struct RegistryBuilder {
    parsers: BTreeMap<String, RegisteredParser>,
    // Every name offered, including disabled ones
    seen: BTreeSet<String>,
    config: RegistryConfig,
    disabled_skipped: usize,
}

impl RegistryBuilder {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            parsers: BTreeMap::new(),
            seen: BTreeSet::new(),
            config,
            disabled_skipped: 0,
        }
    }

    pub fn add_single<P: SingleResponseParser + 'static>(
        self,
        parser: P,
    ) -> Result<Self, DefinitionError> {
        validate_definition(&parser)?;
        self.register(RegisteredParser::SingleResponse(Box::new(parser)))
    }

    pub fn add_multi<P: MultiResponseParser + 'static>(
        self,
        parser: P,
    ) -> Result<Self, DefinitionError> {
        validate_definition(&parser)?;
        self.register(RegisteredParser::MultiResponse(Box::new(parser)))
    }

    pub fn add_single_file<P: SingleFileParser + 'static>(
        self,
        parser: P,
    ) -> Result<Self, DefinitionError> {
        validate_definition(&parser)?;
        self.register(RegisteredParser::SingleFile(Box::new(parser)))
    }

    pub fn add_multi_file<P: MultiFileParser + 'static>(
        self,
        parser: P,
    ) -> Result<Self, DefinitionError> {
        validate_definition(&parser)?;
        self.register(RegisteredParser::MultiFile(Box::new(parser)))
    }

    fn register(mut self, parser: RegisteredParser) -> Result<Self, DefinitionError> {
        let name = parser.name().to_string();

        if !self.seen.insert(name.clone()) {
            return Err(DefinitionError::DuplicateParser(name));
        }

        if self.config.is_disabled(&name) {
            log::info!("Parser '{}' disabled by configuration, skipping", name);
            self.disabled_skipped += 1;
            return Ok(self);
        }

        log::debug!("Registered parser '{}' ({})", name, parser.contract());
        self.parsers.insert(name, parser);
        Ok(self)
    }

    pub fn build(self) -> ParserRegistry {
        log::info!("Parser registry built with {} parser(s)", self.parsers.len());
        ParserRegistry {
            parsers: self.parsers,
            config: self.config,
            disabled_skipped: self.disabled_skipped,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
