//! RPC facade used by the map client.
//!
//! Queries are `GET /trpc/{procedure}?input=<json>`, mutations are
//! `POST /trpc/{procedure}` with the input as the JSON body. Results are
//! wrapped as `{"result":{"data":...}}`; failures as
//! `{"error":{"code","message","path"}}` with the matching HTTP status.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::location::{
    CreateLocationRequest, GeofencePreviewRequest, UpdateLocationRequest,
};
use domain::models::personnel::{CreatePersonnelRequest, UpdatePersonnelRequest};
use domain::models::snapshot::CreateSnapshotRequest;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ShareBaseUrl;
use crate::middleware::metrics::{
    record_location_created, record_personnel_created, record_snapshot_created,
};
use crate::routes::health;
use crate::routes::{IdResponse, OkResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    LocationsList,
    LocationsGetById,
    LocationsCreate,
    LocationsUpdate,
    LocationsDelete,
    LocationsGeofence,
    PersonnelListByLocation,
    PersonnelGetById,
    PersonnelCreate,
    PersonnelUpdate,
    PersonnelDelete,
    SnapshotsCreate,
    SnapshotsGet,
    GeofencePreview,
    Health,
}

impl Procedure {
    pub fn parse(name: &str) -> Option<Self> {
        let procedure = match name {
            "locations.list" => Procedure::LocationsList,
            "locations.getById" => Procedure::LocationsGetById,
            "locations.create" => Procedure::LocationsCreate,
            "locations.update" => Procedure::LocationsUpdate,
            "locations.delete" => Procedure::LocationsDelete,
            "locations.geofence" => Procedure::LocationsGeofence,
            "personnel.listByLocation" => Procedure::PersonnelListByLocation,
            "personnel.getById" => Procedure::PersonnelGetById,
            "personnel.create" => Procedure::PersonnelCreate,
            "personnel.update" => Procedure::PersonnelUpdate,
            "personnel.delete" => Procedure::PersonnelDelete,
            "snapshots.create" => Procedure::SnapshotsCreate,
            "snapshots.get" => Procedure::SnapshotsGet,
            "geofence.preview" => Procedure::GeofencePreview,
            "health" => Procedure::Health,
            _ => return None,
        };
        Some(procedure)
    }

    pub fn kind(&self) -> ProcedureKind {
        match self {
            Procedure::LocationsCreate
            | Procedure::LocationsUpdate
            | Procedure::LocationsDelete
            | Procedure::PersonnelCreate
            | Procedure::PersonnelUpdate
            | Procedure::PersonnelDelete
            | Procedure::SnapshotsCreate => ProcedureKind::Mutation,
            Procedure::LocationsList
            | Procedure::LocationsGetById
            | Procedure::LocationsGeofence
            | Procedure::PersonnelListByLocation
            | Procedure::PersonnelGetById
            | Procedure::SnapshotsGet
            | Procedure::GeofencePreview
            | Procedure::Health => ProcedureKind::Query,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcQueryParams {
    pub input: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdInput {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct GeofenceInput {
    id: i64,
    zoom: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationIdInput {
    location_id: i64,
}

#[derive(Debug, Deserialize)]
struct TokenInput {
    token: String,
}

#[derive(Debug, Serialize)]
struct RpcSuccess {
    result: RpcData,
}

#[derive(Debug, Serialize)]
struct RpcData {
    data: Value,
}

#[derive(Debug, Serialize)]
struct RpcFailure {
    error: RpcErrorBody,
}

#[derive(Debug, Serialize)]
struct RpcErrorBody {
    code: &'static str,
    message: String,
    path: String,
}

fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ApiError> {
    serde_json::from_value(input).map_err(|e| ApiError::Validation(format!("Invalid input: {}", e)))
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize result: {}", e)))
}

fn envelope(path: &str, result: Result<Value, ApiError>) -> Response {
    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(RpcSuccess {
                result: RpcData { data },
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::debug!(procedure = %path, error = %err, "RPC call failed");
            let body = RpcFailure {
                error: RpcErrorBody {
                    code: err.rpc_code(),
                    message: err.public_message(),
                    path: path.to_string(),
                },
            };
            (err.status(), Json(body)).into_response()
        }
    }
}

async fn call(
    state: &AppState,
    name: &str,
    verb: ProcedureKind,
    input: Value,
    base_url: &str,
) -> Result<Value, ApiError> {
    let procedure = Procedure::parse(name)
        .ok_or_else(|| ApiError::NotFound(format!("No procedure named {}", name)))?;

    if procedure.kind() != verb {
        let expected = match procedure.kind() {
            ProcedureKind::Query => "GET",
            ProcedureKind::Mutation => "POST",
        };
        return Err(ApiError::MethodNotAllowed(format!(
            "{} must be called with {}",
            name, expected
        )));
    }

    dispatch(state, procedure, input, base_url).await
}

async fn dispatch(
    state: &AppState,
    procedure: Procedure,
    input: Value,
    base_url: &str,
) -> Result<Value, ApiError> {
    match procedure {
        Procedure::LocationsList => to_data(state.locations.list().await?),
        Procedure::LocationsGetById => {
            let IdInput { id } = parse_input(input)?;
            to_data(state.locations.get_by_id(id).await?)
        }
        Procedure::LocationsCreate => {
            let request: CreateLocationRequest = parse_input(input)?;
            let id = state.locations.create(request).await?;
            record_location_created();
            to_data(IdResponse { id })
        }
        Procedure::LocationsUpdate => {
            let IdInput { id } = parse_input(input.clone())?;
            let request: UpdateLocationRequest = parse_input(input)?;
            state.locations.update(id, request).await?;
            to_data(OkResponse::default())
        }
        Procedure::LocationsDelete => {
            let IdInput { id } = parse_input(input)?;
            state.locations.delete(id).await?;
            to_data(OkResponse::default())
        }
        Procedure::LocationsGeofence => {
            let GeofenceInput { id, zoom } = parse_input(input)?;
            to_data(state.locations.geofence(id, zoom).await?)
        }
        Procedure::PersonnelListByLocation => {
            let LocationIdInput { location_id } = parse_input(input)?;
            to_data(state.personnel.list_by_location(location_id).await?)
        }
        Procedure::PersonnelGetById => {
            let IdInput { id } = parse_input(input)?;
            to_data(state.personnel.get_by_id(id).await?)
        }
        Procedure::PersonnelCreate => {
            let request: CreatePersonnelRequest = parse_input(input)?;
            let id = state.personnel.create(request).await?;
            record_personnel_created();
            to_data(IdResponse { id })
        }
        Procedure::PersonnelUpdate => {
            let IdInput { id } = parse_input(input.clone())?;
            let request: UpdatePersonnelRequest = parse_input(input)?;
            state.personnel.update(id, request).await?;
            to_data(OkResponse::default())
        }
        Procedure::PersonnelDelete => {
            let IdInput { id } = parse_input(input)?;
            state.personnel.delete(id).await?;
            to_data(OkResponse::default())
        }
        Procedure::SnapshotsCreate => {
            let request: CreateSnapshotRequest = parse_input(input)?;
            let created = state.snapshots.create(request, base_url).await?;
            record_snapshot_created();
            to_data(created)
        }
        Procedure::SnapshotsGet => {
            let TokenInput { token } = parse_input(input)?;
            let view = state
                .snapshots
                .get(&token)
                .await?
                .ok_or_else(|| ApiError::NotFound("Snapshot not found".to_string()))?;
            to_data(view)
        }
        Procedure::GeofencePreview => {
            let request: GeofencePreviewRequest = parse_input(input)?;
            to_data(state.locations.preview(&request)?)
        }
        Procedure::Health => to_data(health::check(state.health.as_ref()).await),
    }
}

fn query_input(params: Result<Query<RpcQueryParams>, QueryRejection>) -> Result<Value, ApiError> {
    let Query(params) = params?;
    match params.input.as_deref().map(str::trim) {
        None | Some("") => Ok(Value::Null),
        Some(raw) => Ok(serde_json::from_str(raw)?),
    }
}

fn body_input(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}

/// GET /trpc/:procedure
pub async fn rpc_query(
    State(state): State<AppState>,
    Path(procedure): Path<String>,
    ShareBaseUrl(base_url): ShareBaseUrl,
    params: Result<Query<RpcQueryParams>, QueryRejection>,
) -> Response {
    let result = match query_input(params) {
        Ok(input) => call(&state, &procedure, ProcedureKind::Query, input, &base_url).await,
        Err(err) => Err(err),
    };
    envelope(&procedure, result)
}

/// POST /trpc/:procedure
pub async fn rpc_mutation(
    State(state): State<AppState>,
    Path(procedure): Path<String>,
    ShareBaseUrl(base_url): ShareBaseUrl,
    body: Bytes,
) -> Response {
    let result = match body_input(&body) {
        Ok(input) => call(&state, &procedure, ProcedureKind::Mutation, input, &base_url).await,
        Err(err) => Err(err),
    };
    envelope(&procedure, result)
}
