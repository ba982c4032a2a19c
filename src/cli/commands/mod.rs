//! CLI command implementations

pub mod hash;
pub mod init;
pub mod mask;
pub mod validate;

use crate::domain::LogmaskError;

/// Success
pub const EXIT_OK: i32 = 0;
/// Invalid or unreadable configuration
pub const EXIT_CONFIG: i32 = 2;
/// Input could not be loaded or output could not be written
pub const EXIT_IO: i32 = 3;
/// Anything else
pub const EXIT_FATAL: i32 = 5;

/// Exit code for a failed run
pub fn exit_code_for(error: &LogmaskError) -> i32 {
    match error {
        LogmaskError::Configuration(_) | LogmaskError::Validation(_) | LogmaskError::Pattern(_) => {
            EXIT_CONFIG
        }
        LogmaskError::Spreadsheet(_) | LogmaskError::Io(_) => EXIT_IO,
        LogmaskError::Other(_) => EXIT_FATAL,
    }
}
