/// Ports module defining interfaces for hexagonal architecture.
///
/// Only outbound (driven) ports exist here: the CLI bootstrap drives
/// the use cases directly.
pub mod outbound;
