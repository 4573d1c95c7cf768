//! Servidor web Axum com WebSocket para visualização do etiquetador POS em
//! tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use postag_core::{
    corpus::demo_texts,
    pipeline::{PipelineEvent, PosPipeline, TaggedToken},
    DecodingMethod,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Estado compartilhado da aplicação. O modelo treinado é imutável, então o
/// pipeline pode ser lido por qualquer número de conexões simultâneas.
struct AppState {
    pipeline: PosPipeline,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    method: Option<DecodingMethod>,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    method: Option<DecodingMethod>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    tagged_tokens: Vec<TaggedToken>,
    method: DecodingMethod,
    total_tokens: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let pipeline = match PosPipeline::new() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("falha ao treinar o modelo embutido: {e}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:3000").await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("falha ao abrir a porta 3000: {e}");
            std::process::exit(1);
        }
    };
    info!("🚀 Servidor POS iniciado em http://localhost:3000");
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("servidor encerrado com erro: {e}");
        std::process::exit(1);
    }
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Etiquetagem via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let method = req.method.unwrap_or(DecodingMethod::Viterbi);
    let text = req.text.clone();
    let state_for_task = Arc::clone(&state);

    // A decodificação Viterbi é O(T·N³): roda fora do runtime async
    let tagged = tokio::task::spawn_blocking(move || {
        state_for_task.pipeline.analyze_with_method(&text, method)
    })
    .await
    .unwrap_or_default();

    let total_tokens = tagged.len();
    Json(AnalyzeResponse {
        tagged_tokens: tagged,
        method,
        total_tokens,
    })
    .into_response()
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, executa o pipeline e envia os eventos
/// em tempo real
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Aceita JSON {text, method} ou texto puro
                let (text_str, method) =
                    if let Ok(req) = serde_json::from_str::<WsRequest>(&text) {
                        (
                            req.text.trim().to_string(),
                            req.method.unwrap_or(DecodingMethod::Viterbi),
                        )
                    } else {
                        (text.trim().to_string(), DecodingMethod::Viterbi)
                    };

                if text_str.is_empty() {
                    continue;
                }

                info!(
                    "Analisando via WebSocket [{:?}]: {} chars",
                    method,
                    text_str.len()
                );

                // Pipeline síncrono: roda em spawn_blocking para não travar
                // o runtime
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_task = Arc::clone(&state);
                let text_for_task = text_str.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    state_for_task
                        .pipeline
                        .analyze_streaming(&text_for_task, method, tx_std);
                });
                handle.await.ok();

                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
