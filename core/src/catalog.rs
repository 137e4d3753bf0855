// slotbook/src/catalog.rs

//! Read-side views of the catalog: experience listings and an experience
//! with its slots grouped by date.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{Experience, Slot};
use crate::store::BookingStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSummary {
  pub id: Uuid,
  pub name: String,
  pub location: String,
  pub description: String,
  pub image_url: String,
  pub starting_price: Decimal,
}

impl From<Experience> for ExperienceSummary {
  fn from(exp: Experience) -> Self {
    Self {
      id: exp.id,
      name: exp.name,
      location: exp.location,
      description: exp.description,
      image_url: exp.image_url,
      starting_price: exp.price,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
  pub id: Uuid,
  /// `HH:MM`
  pub time: String,
  pub available_count: i32,
  pub total_capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSlots {
  /// `YYYY-MM-DD`
  pub date: String,
  pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDetail {
  pub id: Uuid,
  pub name: String,
  pub location: String,
  pub description: String,
  pub image_url: String,
  pub price: Decimal,
  pub about: String,
  pub available_dates: Vec<DateSlots>,
}

/// Groups slots by date. Groups come out in ascending date order and slots
/// within a group in ascending time order, whatever the input order.
pub fn group_slots_by_date(mut slots: Vec<Slot>) -> Vec<DateSlots> {
  slots.sort_by_key(|s| (s.date, s.time));
  let mut groups: Vec<DateSlots> = Vec::new();
  for slot in slots {
    let date = slot.date.format("%Y-%m-%d").to_string();
    let view = SlotView {
      id: slot.id,
      time: slot.time_label(),
      available_count: slot.available_count,
      total_capacity: slot.total_capacity,
    };
    match groups.last_mut() {
      Some(group) if group.date == date => group.slots.push(view),
      _ => groups.push(DateSlots {
        date,
        slots: vec![view],
      }),
    }
  }
  groups
}

#[instrument(name = "catalog::list_experiences", skip(store))]
pub async fn list_experiences(store: &dyn BookingStore, search: Option<&str>) -> BookingResult<Vec<ExperienceSummary>> {
  let experiences = store.list_experiences(search).await?;
  info!(count = experiences.len(), "Experiences listed.");
  Ok(experiences.into_iter().map(ExperienceSummary::from).collect())
}

#[instrument(name = "catalog::experience_detail", skip(store))]
pub async fn experience_detail(store: &dyn BookingStore, id: Uuid) -> BookingResult<ExperienceDetail> {
  let experience = match store.find_experience(id).await? {
    Some(exp) => exp,
    None => {
      warn!("Experience not found.");
      return Err(BookingError::NotFound("Experience not found".to_string()));
    }
  };
  let slots = store.slots_for_experience(id).await?;
  Ok(ExperienceDetail {
    id: experience.id,
    name: experience.name,
    location: experience.location,
    description: experience.description,
    image_url: experience.image_url,
    price: experience.price,
    about: experience.about,
    available_dates: group_slots_by_date(slots),
  })
}
