//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Este módulo implementa el protocolo HTTP a nivel de bytes, sin
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests
//! - Construcción y serialización de responses
//! - Tabla de status codes
//!
//! El alcance es deliberadamente mínimo: cada conexión se lee una vez,
//! se atiende una vez y se cierra. No hay keep-alive, ni chunked
//! transfer-encoding, ni decodificación de porcentajes en el path.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! body opcional
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 12\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción y serialización de HTTP responses
pub mod status; // Tabla de códigos de estado

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request, METHOD_COUNT};
pub use response::{write_response, Response, WriteError};
