/// Dashboard pipeline: aggregation, chart building, and the controller
/// that ties a control tuple to one atomic output batch.
///
/// ```text
///   FilterSpec ──▶ filter ──▶ aggregate ──▶ chart builders ──▶ DashboardOutput
///                  (data)     (statistics,   (ChartSpecs)       (atomic batch)
///                              grouped tables)
/// ```

pub mod aggregate;
pub mod chart;
pub mod controller;
