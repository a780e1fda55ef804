use thiserror::Error;

/// Error taxonomy of the advisor core.
///
/// Contract violations (wrong-length series, malformed time labels from a
/// collaborator) are programming errors: fatal for the request, never
/// silently patched. Missing optional data is not an error; it is recovered
/// with documented defaults before the core runs.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("contract violation: {0}")]
    ContractViolation(String),
}
