//! Result type alias for logmask

use super::errors::LogmaskError;

/// Result type alias for logmask operations
///
/// # Examples
///
/// ```
/// use logmask::domain::result::Result;
/// use logmask::domain::errors::LogmaskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LogmaskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LogmaskError>;
