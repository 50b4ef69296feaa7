//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use catalogo_backend::{config::AppState, docs::ApiDoc, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger (RUST_LOG controla o nível).
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let catalog_routes = Router::new()
        .route(
            "/categories",
            post(handlers::catalog::create_category).get(handlers::catalog::list_categories),
        )
        .route(
            "/brands",
            post(handlers::catalog::create_brand).get(handlers::catalog::list_brands),
        )
        .route("/products", get(handlers::catalog::list_products));

    let inventory_routes = Router::new()
        .route(
            "/warehouses",
            post(handlers::inventory::create_warehouse).get(handlers::inventory::list_warehouses),
        )
        .route("/stock", get(handlers::inventory::list_stock))
        .route("/import", post(handlers::import::import_products))
        // Planilhas de catálogo passam fácil do limite padrão de 2 MB.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/catalog", catalog_routes)
        .nest("/api/inventory", inventory_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
