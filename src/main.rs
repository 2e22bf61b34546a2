use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use medinfo_catalog::{Disease, Drug, disease_catalog, drug_catalog};
use medinfo_core::{
    CoreConfig, SearchService, reclick_policy_from_env_value, search_latency_from_env_value,
    upload_max_bytes_from_env_value,
};
use medinfo_uploads::{ImageRef, ImageStore, UploadError};

/// Application state shared across REST API handlers
///
/// Holds the startup-resolved configuration, one search service per
/// catalog, and the in-memory image store. The catalogs themselves are
/// compiled-in statics, so they are not part of the state.
#[derive(Clone)]
struct AppState {
    config: CoreConfig,
    disease_search: SearchService,
    drug_search: SearchService,
    images: ImageStore,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        search_diseases,
        search_drugs,
        login,
        upload_image,
        get_image,
        delete_image
    ),
    components(schemas(
        HealthRes,
        SearchReq,
        DiseaseSearchRes,
        DrugSearchRes,
        LoginReq,
        LoginRes,
        ErrorRes,
        ImageRef,
        Disease,
        Drug
    ))
)]
struct ApiDoc;

/// Main entry point for the medinfo application
///
/// Starts the REST server that backs the medicine information UI: disease
/// and drug catalog search, the login stub, and the image upload surface.
///
/// # Environment Variables
/// - `MEDINFO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDINFO_SEARCH_LATENCY_MS`: simulated search latency (default: 1500)
/// - `MEDINFO_RECLICK_POLICY`: "keep-open" or "collapse" (default: keep-open)
/// - `MEDINFO_UPLOAD_MAX_BYTES`: upload size cap (default: 5 MiB)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration or startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medinfo=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("MEDINFO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let search_latency =
        search_latency_from_env_value(std::env::var("MEDINFO_SEARCH_LATENCY_MS").ok())?;
    let reclick_policy =
        reclick_policy_from_env_value(std::env::var("MEDINFO_RECLICK_POLICY").ok())?;
    let upload_max_bytes =
        upload_max_bytes_from_env_value(std::env::var("MEDINFO_UPLOAD_MAX_BYTES").ok())?;

    let config = CoreConfig::new(
        search_latency,
        medinfo_catalog::MatchFields::BROAD,
        medinfo_catalog::MatchFields::NAME_ONLY,
        reclick_policy,
        upload_max_bytes,
    )?;

    tracing::info!("++ Starting medinfo REST on {}", rest_addr);
    tracing::info!(
        "++ Search latency {:?}, upload cap {} bytes",
        config.search_latency(),
        config.upload_max_bytes()
    );

    let disease_search = SearchService::new(config.disease_fields());
    let drug_search = SearchService::new(config.drug_fields());
    let images = ImageStore::new(config.upload_max_bytes());

    let app = Router::new()
        .route("/health", get(health))
        .route("/catalogs/diseases/search", post(search_diseases))
        .route("/catalogs/drugs/search", post(search_drugs))
        .route("/auth/login", post(login))
        .route("/uploads", post(upload_image))
        .route("/uploads/:hash", get(get_image).delete(delete_image))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            config,
            disease_search,
            drug_search,
            images,
        });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[derive(Serialize, ToSchema)]
struct ErrorRes {
    error: String,
}

impl ErrorRes {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "medinfo is alive".into(),
    })
}

#[derive(Deserialize, ToSchema)]
struct SearchReq {
    query: String,
}

#[derive(Serialize, ToSchema)]
struct DiseaseSearchRes {
    results: Vec<Disease>,
    total: usize,
    notice: String,
}

#[derive(Serialize, ToSchema)]
struct DrugSearchRes {
    results: Vec<Drug>,
    total: usize,
    notice: String,
}

/// Runs one catalog search with the simulated backend latency.
///
/// Blank queries fail immediately, before the delay; accepted searches
/// respond only after the configured latency has elapsed, matching the
/// observed UI behaviour.
async fn delayed_search<'a, R: medinfo_catalog::Searchable>(
    state: &AppState,
    service: &SearchService,
    raw_query: &str,
    catalog: &'a [R],
) -> Result<Vec<&'a R>, (StatusCode, Json<ErrorRes>)> {
    let results = service
        .search(raw_query, catalog)
        .map_err(|e| (StatusCode::BAD_REQUEST, ErrorRes::new(e.to_string())))?;
    tokio::time::sleep(state.config.search_latency()).await;
    Ok(results)
}

#[utoipa::path(
    post,
    path = "/catalogs/diseases/search",
    request_body = SearchReq,
    responses(
        (status = 200, description = "Matching diseases in catalog order", body = DiseaseSearchRes),
        (status = 400, description = "Blank query", body = ErrorRes)
    )
)]
/// Search the disease catalog
///
/// Matches the query case-insensitively against disease names,
/// descriptions, categories and symptoms (the configured breadth for this
/// catalog). Zero matches is a valid outcome reported via the notice
/// field, not an error.
async fn search_diseases(
    State(state): State<AppState>,
    Json(req): Json<SearchReq>,
) -> Result<Json<DiseaseSearchRes>, (StatusCode, Json<ErrorRes>)> {
    let results: Vec<Disease> =
        delayed_search(&state, &state.disease_search, &req.query, disease_catalog())
            .await?
            .into_iter()
            .cloned()
            .collect();

    let total = results.len();
    let notice = if total == 0 {
        "No results found: try searching with different terms or symptoms".to_string()
    } else {
        format!("Found {} matching conditions", total)
    };

    Ok(Json(DiseaseSearchRes {
        results,
        total,
        notice,
    }))
}

#[utoipa::path(
    post,
    path = "/catalogs/drugs/search",
    request_body = SearchReq,
    responses(
        (status = 200, description = "Matching drugs in catalog order", body = DrugSearchRes),
        (status = 400, description = "Blank query", body = ErrorRes)
    )
)]
/// Search the drug catalog
///
/// The drug catalog matches on name only by default; the breadth is
/// configuration, not a rule.
async fn search_drugs(
    State(state): State<AppState>,
    Json(req): Json<SearchReq>,
) -> Result<Json<DrugSearchRes>, (StatusCode, Json<ErrorRes>)> {
    let results: Vec<Drug> =
        delayed_search(&state, &state.drug_search, &req.query, drug_catalog())
            .await?
            .into_iter()
            .cloned()
            .collect();

    let total = results.len();
    let notice = if total == 0 {
        "No results found: try searching with a different term".to_string()
    } else {
        format!("Found {} matching medications", total)
    };

    Ok(Json(DrugSearchRes {
        results,
        total,
        notice,
    }))
}

#[derive(Deserialize, ToSchema)]
struct LoginReq {
    email: String,
    password: String,
}

#[derive(Serialize, ToSchema)]
struct LoginRes {
    message: String,
    detail: String,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Login accepted", body = LoginRes),
        (status = 400, description = "Missing credentials", body = ErrorRes)
    )
)]
/// Login stub
///
/// There is no authentication backend: credentials are checked for
/// presence only and never verified against anything. This mirrors the
/// observed form, which greets any submission.
async fn login(
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginRes>, (StatusCode, Json<ErrorRes>)> {
    if req.email.trim().is_empty() || req.password.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            ErrorRes::new("email and password are required"),
        ));
    }

    Ok(Json(LoginRes {
        message: "Login Successful".into(),
        detail: "Welcome back!".into(),
    }))
}

#[derive(Deserialize)]
struct UploadParams {
    filename: Option<String>,
}

fn upload_error_response(err: UploadError) -> (StatusCode, Json<ErrorRes>) {
    let status = match &err {
        UploadError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::UnsupportedFileType => StatusCode::BAD_REQUEST,
        UploadError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, ErrorRes::new(err.to_string()))
}

#[utoipa::path(
    post,
    path = "/uploads",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    params(
        ("filename" = Option<String>, Query, description = "Original filename")
    ),
    responses(
        (status = 201, description = "Image accepted", body = ImageRef),
        (status = 400, description = "Unsupported file type", body = ErrorRes),
        (status = 413, description = "File too large", body = ErrorRes)
    )
)]
/// Upload a medicine image
///
/// The media type is detected from the bytes (JPEG, PNG, GIF or WebP);
/// client-declared content types are ignored. Accepted images are
/// addressed by their SHA-256 hash.
async fn upload_image(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<(StatusCode, Json<ImageRef>), (StatusCode, Json<ErrorRes>)> {
    let filename = params.filename.as_deref().unwrap_or("upload");
    let reference = state
        .images
        .add(body.to_vec(), filename)
        .map_err(upload_error_response)?;

    tracing::info!(
        hash = %reference.hash,
        media_type = %reference.media_type,
        "stored uploaded image"
    );
    Ok((StatusCode::CREATED, Json(reference)))
}

#[utoipa::path(
    get,
    path = "/uploads/{hash}",
    params(
        ("hash" = String, Path, description = "SHA-256 hash of the image")
    ),
    responses(
        (status = 200, description = "Image bytes with detected media type"),
        (status = 404, description = "No image under this hash", body = ErrorRes)
    )
)]
/// Fetch a stored image
///
/// Returns the raw bytes with the media type detected at upload time, so
/// the reference is directly renderable.
async fn get_image(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorRes>)> {
    let (reference, bytes) = state.images.get(&hash).map_err(upload_error_response)?;
    Ok(([(header::CONTENT_TYPE, reference.media_type)], bytes))
}

#[utoipa::path(
    delete,
    path = "/uploads/{hash}",
    params(
        ("hash" = String, Path, description = "SHA-256 hash of the image")
    ),
    responses(
        (status = 200, description = "Removed image reference", body = ImageRef),
        (status = 404, description = "No image under this hash", body = ErrorRes)
    )
)]
/// Remove a stored image
///
/// The removal action exposed by the upload surface.
async fn delete_image(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ImageRef>, (StatusCode, Json<ErrorRes>)> {
    let removed = state.images.remove(&hash).map_err(upload_error_response)?;
    Ok(Json(removed))
}
