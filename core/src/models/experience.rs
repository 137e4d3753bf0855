// slotbook/src/models/experience.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item. Read-only from the booking engine's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
  pub id: Uuid,
  pub name: String,
  pub location: String,
  pub description: String,
  pub about: String,
  pub image_url: String,
  pub price: Decimal,
  pub created_at: DateTime<Utc>,
}
