// slotbook/src/checkout/mod.rs

//! The checkout pipeline: named stages run in order against one shared
//! `CheckoutContext`, stopping at the first failure.

pub mod context;
pub mod pipeline;
pub mod steps;

pub use context::{CheckoutContext, CheckoutState};
pub use pipeline::{CheckoutOutcome, CheckoutPipeline, CheckoutStep, SkipCondition, StepControl, StepHandler};
pub use steps::{standard_pipeline, CheckoutPolicy};
