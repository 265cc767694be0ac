/// ProgressReporter port for user-facing stage feedback during
/// long-running operations.
///
/// Implementations must write to stderr (or elsewhere) so machine
/// output on stdout stays clean.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message for the current stage.
    fn report(&self, message: &str);

    /// Reports a warning or recovered error.
    fn report_error(&self, message: &str);

    /// Reports completion of the whole operation.
    fn report_completion(&self, message: &str);
}
