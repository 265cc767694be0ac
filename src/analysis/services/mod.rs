/// Pure domain services: no I/O, domain objects in and out.
pub mod hdfm;
pub mod maintenance;

pub use hdfm::{HdfmModel, MetricMatrix, ScoringWeights, METRIC_COLUMNS};
pub use maintenance::MaintenanceRisk;
