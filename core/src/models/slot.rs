// slotbook/src/models/slot.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable (experience, date, time) unit.
///
/// `available_count` stays within `0..=total_capacity` and only ever moves
/// down, through the engine's reservation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
  pub id: Uuid,
  pub experience_id: Uuid,
  pub date: NaiveDate,
  pub time: NaiveTime,
  pub total_capacity: i32,
  pub available_count: i32,
}

impl Slot {
  pub fn can_seat(&self, quantity: i32) -> bool {
    quantity >= 1 && self.available_count >= quantity
  }

  /// `HH:MM`, 24-hour.
  pub fn time_label(&self) -> String {
    self.time.format("%H:%M").to_string()
  }
}
