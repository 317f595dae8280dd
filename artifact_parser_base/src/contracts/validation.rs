// src/contracts/validation.rs
//! Shape expectations and parser definition checks
//!
//! Adapters run these before touching any response data, so a wiring bug
//! surfaces as a [`DefinitionError`] instead of a half-run hook.

use crate::contracts::errors::DefinitionError;
use crate::contracts::traits::ParserDefinition;
use crate::types::{describe_shapes, CollectedResponse, ResponseShape};
use std::collections::HashSet;

/// Build the defect reported when a single response has the wrong shape
pub fn shape_mismatch(
    adapter: &str,
    accepted: &[ResponseShape],
    actual: ResponseShape,
) -> DefinitionError {
    DefinitionError::ShapeMismatch {
        adapter: adapter.to_string(),
        expected: describe_shapes(accepted),
        actual,
    }
}

/// Narrow every element of a batch with `extract`, failing on the first
/// element it rejects
///
/// The whole batch is checked before anything is returned, so a hook never
/// sees a partially valid batch.
pub fn extract_batch<'a, T, F>(
    adapter: &str,
    accepted: &[ResponseShape],
    responses: &'a [CollectedResponse],
    extract: F,
) -> Result<Vec<&'a T>, DefinitionError>
where
    T: ?Sized,
    F: Fn(&'a CollectedResponse) -> Option<&'a T>,
{
    responses
        .iter()
        .enumerate()
        .map(|(index, response)| {
            extract(response).ok_or_else(|| DefinitionError::BatchShapeMismatch {
                adapter: adapter.to_string(),
                index,
                expected: describe_shapes(accepted),
                actual: response.shape(),
            })
        })
        .collect()
}

/// Batched descriptors and handles must be positionally aligned
pub fn expect_aligned(
    adapter: &str,
    descriptors: usize,
    handles: usize,
) -> Result<(), DefinitionError> {
    if descriptors == handles {
        Ok(())
    } else {
        Err(DefinitionError::BatchLengthMismatch {
            adapter: adapter.to_string(),
            descriptors,
            handles,
        })
    }
}

/// Single-shape contracts take exactly one response per call
pub fn expect_single<'a>(
    parser: &str,
    responses: &'a [CollectedResponse],
) -> Result<&'a CollectedResponse, DefinitionError> {
    match responses {
        [response] => Ok(response),
        _ => Err(DefinitionError::ArityMismatch {
            parser: parser.to_string(),
            expected: 1,
            actual: responses.len(),
        }),
    }
}

/// Registration-time checks on a parser's catalog metadata
pub fn validate_definition(definition: &dyn ParserDefinition) -> Result<(), DefinitionError> {
    let name = definition.name();
    let invalid = |reason: String| DefinitionError::InvalidDefinition {
        parser: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("parser name is empty".to_string()));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(invalid(format!(
            "parser name contains '{}'; only [a-z0-9_] is allowed",
            bad
        )));
    }

    let artifacts = definition.supported_artifacts();
    if artifacts.is_empty() {
        return Err(invalid("no supported artifacts declared".to_string()));
    }

    let mut seen = HashSet::new();
    for artifact in &artifacts {
        if artifact.trim().is_empty() {
            return Err(invalid("empty artifact name".to_string()));
        }
        if !seen.insert(artifact.as_str()) {
            return Err(invalid(format!("artifact '{}' declared twice", artifact)));
        }
    }

    Ok(())
}
