//! MetricMancer: a source-code analysis engine computing cyclomatic
//! complexity, SonarSource cognitive complexity, code churn, ownership,
//! hotspot scores, health grades, and ref-to-ref complexity deltas.
//!
//! The two public entry points are [`analyze`] and [`delta`]; everything
//! else in this crate is the pipeline and data model behind them.
pub mod aggregate;
pub mod churn;
pub mod cogcom;
pub mod config;
pub mod cycom;
pub mod delta;
pub mod error;
pub mod file_analyzer;
pub mod git;
pub mod grading;
pub mod hierarchy;
pub mod hotspot;
pub mod lang;
pub mod model;
pub mod orchestrator;
pub mod ownership;
pub mod reader;
pub mod scan;
pub mod util;

pub use config::{
    AnalysisConfig, Clock, CognitiveThresholds, CyclomaticThresholds, DeltaThresholds, FixedClock,
    HotspotThresholds, SystemClock,
};
pub use delta::{ChangeStatus, FileChange, FunctionChange};
pub use error::{AnalysisError, Result};
pub use model::{
    AuthorShare, CalculationValues, Directory, File, Function, FunctionValue, Kpi, KpiKind,
    KpiMap, KpiValue, OwnershipClass, Repository,
};
pub use orchestrator::{analyze, analyze_with_cancellation, delta, CancellationToken};
