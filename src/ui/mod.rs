use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::{Style, init_colors};

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive prompt flow, treating Ctrl+C / Escape as a clean exit.
///
/// Returns `Ok(None)` when the user cancelled, `Ok(Some(value))` otherwise.
pub fn handle_prompt_cancellation<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            eprintln!();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_prompt_cancellation_ok() {
        let result = handle_prompt_cancellation(|| Ok(42));
        assert_eq!(result.unwrap(), Some(42));
    }

    #[test]
    fn test_handle_prompt_cancellation_operation_canceled() {
        let result: Result<Option<()>> =
            handle_prompt_cancellation(|| Err(InquireError::OperationCanceled.into()));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_handle_prompt_cancellation_operation_interrupted() {
        let result: Result<Option<()>> =
            handle_prompt_cancellation(|| Err(InquireError::OperationInterrupted.into()));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_handle_prompt_cancellation_other_error() {
        let result: Result<Option<()>> =
            handle_prompt_cancellation(|| Err(anyhow::anyhow!("Some other error")));
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("Some other error"));
    }

    #[test]
    fn test_is_prompt_cancelled_other_error() {
        let err = InquireError::Custom("test".into());
        assert!(!is_prompt_cancelled(&err));
    }
}
