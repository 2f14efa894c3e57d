//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

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

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::brokers::register))
        .route("/login", post(handlers::auth::login));

    // Gestão de corretores (protegida; mutações exigem admin via extractor)
    let broker_routes = Router::new()
        .route("/", get(handlers::brokers::list))
        .route(
            "/{id}",
            get(handlers::brokers::get)
                .put(handlers::brokers::update)
                .delete(handlers::brokers::delete),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Cadastros, tabelas de preço, orçamentos e dashboard (protegidos)
    let api_routes = Router::new()
        // Cadastros de apoio
        .route(
            "/cities",
            post(handlers::catalog::create_city).get(handlers::catalog::list_cities),
        )
        .route(
            "/cities/{id}",
            get(handlers::catalog::get_city)
                .put(handlers::catalog::update_city)
                .delete(handlers::catalog::delete_city),
        )
        .route(
            "/carriers",
            post(handlers::catalog::create_carrier).get(handlers::catalog::list_carriers),
        )
        .route(
            "/carriers/{id}",
            get(handlers::catalog::get_carrier)
                .put(handlers::catalog::update_carrier)
                .delete(handlers::catalog::delete_carrier),
        )
        .route(
            "/modalities",
            post(handlers::catalog::create_modality).get(handlers::catalog::list_modalities),
        )
        .route(
            "/modalities/{id}",
            get(handlers::catalog::get_modality)
                .put(handlers::catalog::update_modality)
                .delete(handlers::catalog::delete_modality),
        )
        .route(
            "/accommodations",
            post(handlers::catalog::create_accommodation)
                .get(handlers::catalog::list_accommodations),
        )
        .route(
            "/accommodations/{id}",
            get(handlers::catalog::get_accommodation)
                .put(handlers::catalog::update_accommodation)
                .delete(handlers::catalog::delete_accommodation),
        )
        // Tabelas de preço
        .route(
            "/price-tables",
            post(handlers::pricing::create).get(handlers::pricing::find),
        )
        .route(
            "/price-tables/{id}",
            get(handlers::pricing::get)
                .put(handlers::pricing::update)
                .delete(handlers::pricing::delete),
        )
        // Orçamentos
        .route(
            "/quotes",
            post(handlers::quotes::create).get(handlers::quotes::list),
        )
        .route(
            "/quotes/{id}",
            get(handlers::quotes::get).delete(handlers::quotes::delete),
        )
        .route("/quotes/{id}/stage", put(handlers::quotes::update_stage))
        // Dashboard
        .route(
            "/dashboard/pipeline-monthly",
            get(handlers::dashboard::pipeline_monthly),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/brokers", broker_routes)
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
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
