//! # Comandos del Servidor
//! src/commands/mod.rs
//!
//! Handlers que el binario registra al arrancar:
//! - `/`: página de bienvenida
//! - `/status`: estado del servidor en JSON
//! - `/echo`: devuelve el body del request (POST)
//!
//! Todos cumplen el contrato de handler: vista inmutable del request,
//! respuesta propia opcional.

use crate::http::{status, Request, Response};
use serde::Serialize;

/// Payload del handler /status
#[derive(Serialize)]
struct ServerStatus {
    status: &'static str,
    server: &'static str,
    version: &'static str,
}

/// Handler para GET /
pub fn home_handler(_req: &Request) -> Option<Response> {
    Some(Response::new(status::OK).with_body("<h1>minihttp</h1>\n"))
}

/// Handler para GET /status
///
/// # Ejemplo de response
/// ```json
/// {"status":"running","server":"minihttp","version":"0.1.0"}
/// ```
pub fn status_handler(_req: &Request) -> Option<Response> {
    let payload = ServerStatus {
        status: "running",
        server: "minihttp",
        version: env!("CARGO_PKG_VERSION"),
    };

    let body = match serde_json::to_string(&payload) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to serialize server status: {}", e);
            return Some(Response::new(status::INTERNAL_SERVER_ERROR));
        }
    };

    Some(
        Response::new(status::OK)
            .with_header("Content-Type", "application/json")
            .with_body(&body),
    )
}

/// Handler para POST /echo
///
/// Devuelve el body del request tal cual llegó; sin body responde 400.
pub fn echo_handler(req: &Request) -> Option<Response> {
    match req.body() {
        Some(body) => Some(
            Response::new(status::OK)
                .with_header("Content-Type", "text/plain; charset=utf-8")
                .with_body(body),
        ),
        None => Some(Response::new(status::BAD_REQUEST).with_body("Missing request body")),
    }
}
