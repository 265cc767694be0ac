/// Filesystem and console presenters implementing the `OutputPresenter`
/// port.
pub mod presenters;

pub use presenters::{FilePresenter, StdoutPresenter};
