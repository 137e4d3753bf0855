// slotbook-server/src/state.rs
use crate::config::AppConfig;
use slotbook::{BookingEngine, BookingStore, CheckoutPolicy};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn BookingStore>,
  pub engine: Arc<BookingEngine>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the engine over `store` with the checkout policy from `config`.
  pub fn new(store: Arc<dyn BookingStore>, config: Arc<AppConfig>) -> Self {
    let policy = CheckoutPolicy {
      revalidate_promo: config.promo_revalidation,
    };
    let engine = Arc::new(BookingEngine::with_policy(store.clone(), policy));
    Self { store, engine, config }
  }
}
