use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct TargetGroupInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, TargetGroup>>>;

type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/target-groups", get(list_target_groups).post(create_target_group))
        .route(
            "/target-groups/{id}",
            get(get_target_group)
                .put(update_target_group)
                .delete(delete_target_group),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(json!({ "message": message })))
}

/// Names are unique, matching the real server.
fn check_name(
    groups: &HashMap<String, TargetGroup>,
    name: &str,
    except: Option<&str>,
) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "name must not be empty".to_string()));
    }
    let taken = groups
        .values()
        .any(|g| g.name == name && Some(g.id.as_str()) != except);
    if taken {
        return Err(error(
            StatusCode::CONFLICT,
            format!("a target group named {name} already exists"),
        ));
    }
    Ok(())
}

async fn list_target_groups(State(db): State<Db>) -> Json<Vec<TargetGroup>> {
    let groups = db.read().await;
    let mut all: Vec<TargetGroup> = groups.values().cloned().collect();
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Json(all)
}

async fn create_target_group(
    State(db): State<Db>,
    Json(input): Json<TargetGroupInput>,
) -> Result<(StatusCode, Json<TargetGroup>), ApiError> {
    let mut groups = db.write().await;
    check_name(&groups, &input.name, None)?;
    let group = TargetGroup {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description.unwrap_or_default(),
        color: input.color,
    };
    groups.insert(group.id.clone(), group.clone());
    tracing::info!(id = %group.id, name = %group.name, "created target group");
    Ok((StatusCode::CREATED, Json(group)))
}

async fn get_target_group(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<TargetGroup>, StatusCode> {
    let groups = db.read().await;
    groups.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement: omitted optional fields are cleared.
async fn update_target_group(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TargetGroupInput>,
) -> Result<Json<TargetGroup>, ApiError> {
    let mut groups = db.write().await;
    if !groups.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, format!("target group {id} not found")));
    }
    check_name(&groups, &input.name, Some(&id))?;
    let group = TargetGroup {
        id: id.clone(),
        name: input.name,
        description: input.description.unwrap_or_default(),
        color: input.color,
    };
    groups.insert(id, group.clone());
    tracing::info!(id = %group.id, "updated target group");
    Ok(Json(group))
}

async fn delete_target_group(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut groups = db.write().await;
    match groups.remove(&id) {
        Some(_) => {
            tracing::info!(%id, "deleted target group");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(error(StatusCode::NOT_FOUND, format!("target group {id} not found"))),
    }
}
