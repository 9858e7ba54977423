use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::{LocationService, PersonnelService, SnapshotService};
use domain::store::{InMemoryStore, LocationStore, PersonnelStore, SnapshotStore, StoreHealth};
use persistence::repositories::{
    LocationRepository, PersonnelRepository, PostgresHealth, SnapshotRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{geofence, health, locations, map_config, personnel, rpc, snapshots};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub locations: LocationService,
    pub personnel: PersonnelService,
    pub snapshots: SnapshotService,
    pub health: Arc<dyn StoreHealth>,
}

/// The storage backends behind the services.
pub struct Stores {
    pub locations: Arc<dyn LocationStore>,
    pub personnel: Arc<dyn PersonnelStore>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            locations: Arc::new(LocationRepository::new(pool.clone())),
            personnel: Arc::new(PersonnelRepository::new(pool.clone())),
            snapshots: Arc::new(SnapshotRepository::new(pool.clone())),
            health: Arc::new(PostgresHealth::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            locations: store.clone(),
            personnel: store.clone(),
            snapshots: store.clone(),
            health: store,
        }
    }
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Self {
        let settings = config.locations.settings();
        Self {
            config: Arc::new(config),
            locations: LocationService::new(
                stores.locations.clone(),
                stores.personnel.clone(),
                settings,
            ),
            personnel: PersonnelService::new(stores.personnel, stores.locations),
            snapshots: SnapshotService::new(stores.snapshots),
            health: stores.health,
        }
    }
}

/// Builds the application backed by PostgreSQL.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_router(AppState::new(config, Stores::postgres(pool)))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    // REST surface, mirrors the RPC procedures
    let v1_routes = Router::new()
        .route(
            "/api/v1/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/api/v1/locations/:id",
            get(locations::get_location)
                .patch(locations::update_location)
                .delete(locations::delete_location),
        )
        .route(
            "/api/v1/locations/:id/personnel",
            get(locations::list_location_personnel),
        )
        .route(
            "/api/v1/locations/:id/geofence",
            get(locations::get_location_geofence),
        )
        .route("/api/v1/personnel", post(personnel::create_personnel))
        .route(
            "/api/v1/personnel/:id",
            get(personnel::get_personnel)
                .patch(personnel::update_personnel)
                .delete(personnel::delete_personnel),
        )
        .route("/api/v1/snapshots", post(snapshots::create_snapshot))
        .route("/api/v1/snapshots/:token", get(snapshots::get_snapshot))
        .route("/api/v1/geofence/preview", post(geofence::preview_geofence))
        .route("/api/v1/config/map", get(map_config::get_map_config));

    let rpc_routes = Router::new().route(
        "/trpc/:procedure",
        get(rpc::rpc_query).post(rpc::rpc_mutation),
    );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(v1_routes)
        .merge(rpc_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
