//! Servidor Axum com API JSON para consultas e comparações no CP/CPP

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use consultor_core::{
    samples::{sample_queries, SAMPLE_PENAL_CODE, SAMPLE_PROCEDURE_CODE},
    BailRuleTable, Consultant, Extractor, LegalDocument,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Configuração lida do ambiente
#[derive(Debug, Clone)]
struct AppConfig {
    penal_code_path: PathBuf,
    procedure_code_path: PathBuf,
    bail_rules_path: Option<PathBuf>,
    addr: SocketAddr,
}

impl AppConfig {
    fn from_env() -> anyhow::Result<Self> {
        let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.to_string());
        let addr = var("CONSULTOR_ADDR", "0.0.0.0:3000");
        Ok(Self {
            penal_code_path: var("CONSULTOR_CP_PATH", "cp.html").into(),
            procedure_code_path: var("CONSULTOR_CPP_PATH", "cpp.html").into(),
            bail_rules_path: std::env::var("CONSULTOR_BAIL_RULES").ok().map(PathBuf::from),
            addr: addr
                .parse()
                .with_context(|| format!("CONSULTOR_ADDR inválido: {addr}"))?,
        })
    }
}

/// Estado compartilhado da aplicação. O consultor só usa `&self`.
struct AppState {
    consultant: Consultant,
}

#[derive(Deserialize)]
struct ConsultRequest {
    query: String,
}

#[derive(Deserialize)]
struct CompareRequest {
    queries: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let consultant = build_consultant(&config).await?;
    info!(
        articles = consultant.penal_code().len(),
        procedure_code = consultant.procedure_code().is_some(),
        "consultor carregado"
    );

    let state = Arc::new(AppState { consultant });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/sample-queries", get(sample_queries_handler))
        .route("/consult", post(consult_handler))
        .route("/compare", post(compare_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("não foi possível escutar em {}", config.addr))?;
    info!("⚖️ Consultor iniciado em http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Carrega CP e CPP dos arquivos locais; sem eles, usa os excertos embutidos.
async fn build_consultant(config: &AppConfig) -> anyhow::Result<Consultant> {
    let penal_code = match load_document(&config.penal_code_path).await? {
        Some(doc) => doc,
        None => {
            warn!(path = %config.penal_code_path.display(), "CP não encontrado, usando excerto embutido");
            LegalDocument::parse(SAMPLE_PENAL_CODE)?
        }
    };
    let procedure_code = match load_document(&config.procedure_code_path).await? {
        Some(doc) => doc,
        None => {
            warn!(path = %config.procedure_code_path.display(), "CPP não encontrado, usando excerto embutido");
            LegalDocument::parse(SAMPLE_PROCEDURE_CODE)?
        }
    };

    let mut consultant = Consultant::new(penal_code).with_procedure_code(procedure_code);

    if let Some(path) = &config.bail_rules_path {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("falha ao ler tabela de fiança {}", path.display()))?;
        let table = BailRuleTable::from_json(&json)?;
        info!(rules = table.rules.len(), "tabela de fiança externa carregada");
        consultant = consultant.with_extractor(Extractor::new(table));
    }
    Ok(consultant)
}

/// `Ok(None)` quando o arquivo não existe.
async fn load_document(path: &Path) -> anyhow::Result<Option<LegalDocument>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("falha ao ler {}", path.display())),
    };
    let doc = LegalDocument::from_bytes(&bytes)
        .with_context(|| format!("falha ao interpretar {}", path.display()))?;
    info!(path = %path.display(), articles = doc.len(), "documento carregado");
    Ok(Some(doc))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "articles": state.consultant.penal_code().len(),
        "procedure_code": state.consultant.procedure_code().is_some(),
    }))
}

/// Consultas de demonstração
async fn sample_queries_handler() -> impl IntoResponse {
    Json(sample_queries())
}

/// Consulta de um crime
async fn consult_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConsultRequest>,
) -> impl IntoResponse {
    let query = req.query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Consulta vazia"})),
        )
            .into_response();
    }
    info!("Consultando: {}", query);
    Json(state.consultant.consult(query)).into_response()
}

/// Comparação entre vários crimes
async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> impl IntoResponse {
    let queries: Vec<&str> = req
        .queries
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .collect();
    if queries.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Nenhuma consulta informada"})),
        )
            .into_response();
    }
    info!("Comparando {} consultas", queries.len());
    Json(state.consultant.compare(queries.as_slice())).into_response()
}
