/// Outbound adapters - infrastructure implementations of outbound ports.
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod graph;
pub mod network;
pub mod persistence;
