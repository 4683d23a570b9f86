//! Result type alias
//!
//! A convenient Result type alias that uses `PhenomlError` as the error type.

use super::errors::PhenomlError;

/// Result type alias for crate operations
///
/// # Examples
///
/// ```
/// use phenoml_workflow::domain::result::Result;
/// use phenoml_workflow::domain::errors::PhenomlError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PhenomlError::validation("--input-data", "not JSON"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PhenomlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PhenomlError::validation("field", "bad"));
        assert!(result.is_err());
    }
}
