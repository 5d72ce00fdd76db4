use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::{HeaderName, HeaderValue};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use mischief_managed::bootstrap::app_context::{AppContext, AppServices};
use mischief_managed::bootstrap::config::Config;
use mischief_managed::infrastructure::crypto::{self, NoteCipher};
use mischief_managed::infrastructure::store::notes::JsonNoteRepository;
use mischief_managed::infrastructure::store::shares::JsonShareRepository;
use mischief_managed::infrastructure::store::wizards::JsonWizardRepository;
use mischief_managed::infrastructure::vault::FsNoteVault;

#[derive(OpenApi)]
#[openapi(
    paths(
        mischief_managed::presentation::http::health::root,
        mischief_managed::presentation::http::wizards::list_wizards,
        mischief_managed::presentation::http::notes::create_note,
        mischief_managed::presentation::http::notes::list_notes,
        mischief_managed::presentation::http::notes::read_note,
        mischief_managed::presentation::http::notes::download_note,
        mischief_managed::presentation::http::notes::delete_note,
        mischief_managed::presentation::http::sharing::share_note,
        mischief_managed::presentation::http::sharing::request_access,
        mischief_managed::presentation::http::sharing::list_requests,
        mischief_managed::presentation::http::sharing::approve_request,
        mischief_managed::presentation::http::admin::list_all_notes,
        mischief_managed::presentation::http::admin::download_encrypted,
        mischief_managed::presentation::http::admin::delete_any_note,
        mischief_managed::presentation::http::admin::clear_shares,
        mischief_managed::presentation::http::admin::create_wizard,
    ),
    components(schemas(
        mischief_managed::presentation::http::MessageResponse,
        mischief_managed::presentation::http::health::ServiceStatus,
        mischief_managed::presentation::http::wizards::WizardItem,
        mischief_managed::presentation::http::notes::CreateNoteRequest,
        mischief_managed::presentation::http::notes::NoteItem,
        mischief_managed::presentation::http::notes::NoteContentResponse,
        mischief_managed::presentation::http::sharing::ShareNoteRequest,
        mischief_managed::presentation::http::sharing::AccessRequestBody,
        mischief_managed::presentation::http::sharing::AccessRequestCreated,
        mischief_managed::presentation::http::sharing::AccessRequestItem,
        mischief_managed::presentation::http::sharing::ApproveRequestBody,
        mischief_managed::presentation::http::admin::CreateWizardRequest,
    )),
    tags(
        (name = "Health", description = "System status"),
        (name = "Wizards", description = "Wizard directory"),
        (name = "Notes", description = "Encrypted note management"),
        (name = "Sharing", description = "Note sharing and access requests"),
        (name = "Admin", description = "Administrative operations")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "mischief_managed=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting Mischief Managed backend");

    tokio::fs::create_dir_all(&cfg.data_dir).await?;

    let cipher = match &cfg.encryption_secret {
        Some(secret) => NoteCipher::from_secret(secret),
        None => NoteCipher::new(&crypto::load_or_create_key(&cfg.key_file())?),
    };

    let wizard_repo = Arc::new(JsonWizardRepository::open(
        cfg.wizards_file(),
        &cfg.default_wizards(),
    )?);
    let note_repo = Arc::new(JsonNoteRepository::open(cfg.notes_meta_file())?);
    let share_repo = Arc::new(JsonShareRepository::open(cfg.share_data_file())?);
    let note_vault = Arc::new(FsNoteVault::new(cfg.notes_dir(), cipher)?);

    let services = AppServices::new(wizard_repo, note_repo, share_repo, note_vault);
    let ctx = AppContext::new(cfg.clone(), services);

    let api_key_header = HeaderName::from_static("x-api-key");
    let cors = if let Some(origin) = cfg.frontend_url.clone() {
        match HeaderValue::from_str(&origin) {
            Ok(v) => CorsLayer::new()
                .allow_origin(v)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::DELETE,
                    http::Method::OPTIONS,
                ])
                .allow_headers([http::header::CONTENT_TYPE, api_key_header.clone()]),
            Err(_) => CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::DELETE,
                    http::Method::OPTIONS,
                ])
                .allow_headers([http::header::CONTENT_TYPE, api_key_header.clone()]),
        }
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::DELETE,
                http::Method::OPTIONS,
            ])
            .allow_headers([http::header::CONTENT_TYPE, api_key_header])
    };

    let app = Router::new()
        .merge(mischief_managed::presentation::http::health::routes())
        .merge(mischief_managed::presentation::http::wizards::routes(
            ctx.clone(),
        ))
        .merge(mischief_managed::presentation::http::notes::routes(
            ctx.clone(),
        ))
        .merge(mischief_managed::presentation::http::sharing::routes(
            ctx.clone(),
        ))
        .merge(mischief_managed::presentation::http::admin::routes(
            ctx.clone(),
        ))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
