use crate::error::ApiError;
use crate::state::AppState;

use catalog_core::details::{GameDetails, parse_game_id};
use catalog_core::error::CatalogError;
use catalog_core::search::SearchResultItem;
use catalog_core::store::StoreLookupResult;

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct GameNameQuery {
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /search?gameName=...`
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GameNameQuery>, QueryRejection>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        CatalogError::validation(format!("Invalid query string: {}", rejection.body_text()))
    })?;
    let game_name = params.game_name.unwrap_or_default();
    info!("GET /search gameName='{game_name}'");

    let results = state.search.search(&game_name).await?;
    Ok(Json(results))
}

/// `GET /details/{id}`
pub async fn details_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<GameDetails>, ApiError> {
    info!("GET /details/{raw_id}");

    let id = parse_game_id(&raw_id)?;
    let details = state.details.get_details(id).await?;
    Ok(Json(details))
}

/// `GET /checkGog?gameName=...`. Never fails; lookups degrade to `{found:false}`.
pub async fn check_gog_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GameNameQuery>, QueryRejection>,
) -> Json<StoreLookupResult> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("GET /checkGog rejected query string: {}", rejection.body_text());
            return Json(StoreLookupResult::not_found());
        }
    };
    let game_name = params.game_name.unwrap_or_default();
    info!("GET /checkGog gameName='{game_name}' ({})", state.store_checker.name());

    Json(state.store_checker.check_store(&game_name).await)
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
