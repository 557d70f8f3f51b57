use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::ledger;
use crate::models::House;
use crate::storage::{lock, Store};

pub type AppState = Arc<Store>;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseSummary {
    pub id: u64,
    pub name: String,
    pub points: i64,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub points: i64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseInfo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MemberInfo {
    pub id: u64,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseMembers {
    pub house: HouseInfo,
    pub members: Vec<MemberInfo>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CaptainRef {
    pub id: u64,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementView {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub house: HouseRef,
    pub captain: CaptainRef,
}

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub house: Option<String>,
}

/// Houses with their ledger totals, in table order.
fn houses_with_points(store: &Store) -> Result<Vec<(House, i64)>, AppError> {
    let houses = lock(&store.houses, "houses")?;
    let txs = lock(&store.transactions, "point transactions")?;
    let totals = ledger::totals(txs.rows());
    Ok(houses
        .rows()
        .iter()
        .map(|h| (h.clone(), totals.get(&h.id).copied().unwrap_or(0)))
        .collect())
}

pub fn list_houses(store: &Store) -> Result<Vec<HouseSummary>, AppError> {
    let mut houses = houses_with_points(store)?;
    houses.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
    Ok(houses
        .into_iter()
        .map(|(h, points)| HouseSummary {
            id: h.id,
            name: h.name,
            points,
            description: h.description,
            logo_url: h.logo_url,
        })
        .collect())
}

/// Highest points first; equal totals fall back to name order.
pub fn standings(store: &Store) -> Result<Vec<Standing>, AppError> {
    let mut houses = houses_with_points(store)?;
    houses.sort_by(|(a, pa), (b, pb)| pb.cmp(pa).then_with(|| a.name.cmp(&b.name)));
    Ok(houses
        .into_iter()
        .enumerate()
        .map(|(i, (h, points))| Standing {
            rank: i + 1,
            name: h.name,
            points,
            description: h.description,
        })
        .collect())
}

pub fn house_members(store: &Store, house_name: Option<&str>) -> Result<Vec<HouseMembers>, AppError> {
    let houses = lock(&store.houses, "houses")?;
    let members = lock(&store.members, "members")?;

    let selected: Vec<&House> = match house_name {
        Some(name) => {
            let house = houses
                .find(|h| h.name == name)
                .ok_or_else(|| AppError::NotFound("House not found".to_string()))?;
            vec![house]
        }
        None => {
            let mut all: Vec<&House> = houses.rows().iter().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            all
        }
    };

    Ok(selected
        .into_iter()
        .map(|h| HouseMembers {
            house: HouseInfo {
                id: h.id,
                name: h.name.clone(),
                description: h.description.clone(),
            },
            members: members
                .rows()
                .iter()
                .filter(|m| m.house_id == h.id)
                .map(|m| MemberInfo {
                    id: m.id,
                    name: m.name.clone(),
                    role: m.role.clone(),
                })
                .collect(),
        })
        .collect())
}

/// Newest first, joined with the owning house and captain.
pub fn announcement_feed(store: &Store) -> Result<Vec<AnnouncementView>, AppError> {
    let houses = lock(&store.houses, "houses")?;
    let captains = lock(&store.captains, "captains")?;
    let announcements = lock(&store.announcements, "announcements")?;

    let mut feed = Vec::with_capacity(announcements.len());
    for ann in announcements.rows() {
        let (Some(house), Some(captain)) = (houses.get(ann.house_id), captains.get(ann.captain_id)) else {
            tracing::warn!(id = ann.id, "announcement references a missing house or captain");
            continue;
        };
        feed.push(AnnouncementView {
            id: ann.id,
            title: ann.title.clone(),
            content: ann.content.clone(),
            image_url: ann.image_url.clone(),
            created_at: ann.created_at,
            house: HouseRef {
                id: house.id,
                name: house.name.clone(),
            },
            captain: CaptainRef {
                id: captain.id,
                username: captain.username.clone(),
                name: captain.name.clone(),
            },
        });
    }
    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    Ok(feed)
}

pub async fn get_houses(State(state): State<AppState>) -> Result<Json<Vec<HouseSummary>>, AppError> {
    Ok(Json(list_houses(&state)?))
}

pub async fn get_live_points(State(state): State<AppState>) -> Result<Json<Vec<Standing>>, AppError> {
    Ok(Json(standings(&state)?))
}

pub async fn get_members(
    State(state): State<AppState>,
    Query(query): Query<MembersQuery>,
) -> Result<Json<Vec<HouseMembers>>, AppError> {
    let house = query.house.as_deref().filter(|name| !name.is_empty());
    Ok(Json(house_members(&state, house)?))
}

pub async fn get_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementView>>, AppError> {
    Ok(Json(announcement_feed(&state)?))
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

/// `*` anywhere in the list allows any origin; other entries are matched exactly.
fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return AllowOrigin::any();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/houses", get(get_houses))
        .route("/live-points", get(get_live_points))
        .route("/members", get(get_members))
        .route("/announcements", get(get_announcements));

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin(allowed_origins))
                .allow_methods([Method::GET, Method::OPTIONS]),
        )
}
