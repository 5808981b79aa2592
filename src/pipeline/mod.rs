//! Training and evaluation pipeline
//!
//! - [`TrainingPipeline`] drives episodes between two agents
//! - observers record progress, metrics, milestones and game logs

pub mod observers;
pub mod training;

pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, MilestoneObserver, Observation,
    ProgressObserver, SharedObserver, StepObservation,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};
