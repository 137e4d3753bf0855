// slotbook-server/src/models/slot.rs

use chrono::{NaiveDate, NaiveTime};
use slotbook::Slot;
use sqlx::FromRow;
use uuid::Uuid;

pub const SLOT_COLUMNS: &str = "id, experience_id, date, time, total_capacity, available_count";

#[derive(Debug, Clone, FromRow)]
pub struct SlotRow {
  pub id: Uuid,
  pub experience_id: Uuid,
  pub date: NaiveDate,
  pub time: NaiveTime,
  pub total_capacity: i32,
  pub available_count: i32,
}

impl From<SlotRow> for Slot {
  fn from(row: SlotRow) -> Self {
    Slot {
      id: row.id,
      experience_id: row.experience_id,
      date: row.date,
      time: row.time,
      total_capacity: row.total_capacity,
      available_count: row.available_count,
    }
  }
}
