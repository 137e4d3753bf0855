// slotbook/src/checkout/pipeline.rs

//! `CheckoutPipeline` definition and execution.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, instrument, span, Instrument, Level};

use crate::checkout::context::{CheckoutContext, CheckoutState};
use crate::error::{BookingError, BookingResult};

/// Signal from a stage handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  Continue,
  /// Halt the checkout without an error. No later stage runs.
  Stop,
}

/// How a checkout run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
  Completed,
  Stopped,
}

pub type StepHandler =
  Box<dyn Fn(CheckoutContext) -> Pin<Box<dyn Future<Output = BookingResult<StepControl>> + Send>> + Send + Sync>;

/// Skip predicate evaluated on the state before a stage runs.
pub type SkipCondition = Arc<dyn Fn(&CheckoutState) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct CheckoutStep {
  pub name: &'static str,
  pub optional: bool,
  pub skip_if: Option<SkipCondition>,
}

impl std::fmt::Debug for CheckoutStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutStep")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}

pub struct CheckoutPipeline {
  steps: Vec<CheckoutStep>,
  handlers: HashMap<&'static str, Vec<StepHandler>>,
}

impl std::fmt::Debug for CheckoutPipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutPipeline").field("steps", &self.steps).finish()
  }
}

impl CheckoutPipeline {
  pub fn new(step_defs: &[(&'static str, bool)]) -> Self {
    Self {
      steps: step_defs
        .iter()
        .map(|(name, optional)| CheckoutStep {
          name: *name,
          optional: *optional,
          skip_if: None,
        })
        .collect(),
      handlers: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&'static str> {
    self.steps.iter().map(|s| s.name).collect()
  }

  /// Panics on an unknown step name: that is a wiring mistake, not a runtime condition.
  fn step_mut(&mut self, step_name: &str) -> &mut CheckoutStep {
    match self.steps.iter_mut().find(|s| s.name == step_name) {
      Some(step) => step,
      None => panic!("checkout setup error: step '{}' is not defined", step_name),
    }
  }

  /// Appends a handler to `step_name`.
  pub fn on<F>(&mut self, step_name: &'static str, handler_fn: impl Fn(CheckoutContext) -> F + Send + Sync + 'static)
  where
    F: Future<Output = BookingResult<StepControl>> + Send + 'static,
  {
    self.step_mut(step_name);
    let handler: StepHandler = Box::new(move |ctx| Box::pin(handler_fn(ctx)));
    self.handlers.entry(step_name).or_default().push(handler);
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition>) {
    self.step_mut(step_name).skip_if = skip_if;
  }

  #[instrument(name = "CheckoutPipeline::run", skip_all, fields(num_steps = self.steps.len()))]
  pub async fn run(&self, ctx: CheckoutContext) -> BookingResult<CheckoutOutcome> {
    for (step_index, step) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "checkout_step",
        step_name = step.name,
        step_index = step_index,
        optional = step.optional
      );

      if let Some(skip) = &step.skip_if {
        if skip(&ctx.read()) {
          event!(parent: &step_span, Level::DEBUG, "Step skipped.");
          continue;
        }
      }

      let handlers = match self.handlers.get(step.name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step.optional => {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
          return Err(BookingError::Internal(format!(
            "no handler registered for checkout step '{}'",
            step.name
          )));
        }
      };

      for handler in handlers {
        match handler(ctx.clone()).instrument(step_span.clone()).await {
          Ok(StepControl::Continue) => {}
          Ok(StepControl::Stop) => {
            event!(parent: &step_span, Level::INFO, "Checkout stopped by step.");
            return Ok(CheckoutOutcome::Stopped);
          }
          Err(e) => {
            event!(parent: &step_span, Level::WARN, error = %e, kind = %e.kind(), "Checkout step failed.");
            return Err(e);
          }
        }
      }
      ctx.write().completed_steps.push(step.name);
    }
    Ok(CheckoutOutcome::Completed)
  }
}
