// slotbook-server/src/web/handlers/experience_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use slotbook::catalog;
use slotbook::request::parse_id;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::envelope::respond;

#[derive(Deserialize, Debug)]
pub struct ListExperiencesQuery {
  pub search: Option<String>,
}

#[instrument(name = "handler::list_experiences", skip(app_state, query), fields(search = ?query.search))]
pub async fn list_experiences_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListExperiencesQuery>,
) -> Result<HttpResponse, AppError> {
  let experiences = catalog::list_experiences(app_state.store.as_ref(), query.search.as_deref()).await?;
  info!("Fetched {} experiences.", experiences.len());
  Ok(respond(StatusCode::OK, experiences))
}

#[instrument(name = "handler::get_experience", skip(app_state, path), fields(experience_id = %path.as_str()))]
pub async fn get_experience_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  // Ids that are not UUIDs cannot name a stored experience.
  let experience_id = parse_id(Some(path.as_str()), "Experience")?;
  let detail = catalog::experience_detail(app_state.store.as_ref(), experience_id).await?;
  info!(dates = detail.available_dates.len(), "Experience fetched.");
  Ok(respond(StatusCode::OK, detail))
}
