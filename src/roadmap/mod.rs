//! Roadmap generation: concurrent dual-provider aggregation and the
//! combined report.

pub mod aggregator;
pub mod report;

pub use aggregator::ResponseAggregator;
pub use report::RoadmapReport;
