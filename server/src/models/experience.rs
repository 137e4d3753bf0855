// slotbook-server/src/models/experience.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use slotbook::Experience;
use sqlx::FromRow;
use uuid::Uuid;

pub const EXPERIENCE_COLUMNS: &str = "id, name, location, description, about, image_url, price, created_at";

#[derive(Debug, Clone, FromRow)]
pub struct ExperienceRow {
  pub id: Uuid,
  pub name: String,
  pub location: String,
  pub description: String,
  pub about: String,
  pub image_url: String,
  pub price: Decimal,
  pub created_at: DateTime<Utc>,
}

impl From<ExperienceRow> for Experience {
  fn from(row: ExperienceRow) -> Self {
    Experience {
      id: row.id,
      name: row.name,
      location: row.location,
      description: row.description,
      about: row.about,
      image_url: row.image_url,
      price: row.price,
      created_at: row.created_at,
    }
  }
}
