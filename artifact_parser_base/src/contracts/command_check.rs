//! Postcondition check for finished commands
//!
//! Command hooks call [`check_return`] themselves when a non-zero exit status
//! means the output cannot be trusted. The command adapter never calls it.

use crate::contracts::errors::ParserError;

/// Exit status reported by a successful command
pub const SUCCESS_STATUS: i32 = 0;

/// Fail with [`ParserError::CommandFailed`] unless `status` is zero
pub fn check_return(cmd: &str, status: i32) -> Result<(), ParserError> {
    if status == SUCCESS_STATUS {
        return Ok(());
    }

    log::debug!("command '{}' exited with status {}", cmd, status);
    Err(ParserError::CommandFailed {
        cmd: cmd.to_string(),
        status,
    })
}
