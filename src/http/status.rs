//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Tabla fija de códigos de estado y sus reason phrases (RFC 7231).
//!
//! El código de estado viaja como `u16` por todo el servidor: un handler
//! puede responder con cualquier número, y el serializador resuelve el
//! reason phrase contra esta tabla ("Unknown" para códigos que no figuran).

/// 200 OK
pub const OK: u16 = 200;

/// 400 Bad Request
pub const BAD_REQUEST: u16 = 400;

/// 404 Not Found
pub const NOT_FOUND: u16 = 404;

/// 405 Method Not Allowed
pub const METHOD_NOT_ALLOWED: u16 = 405;

/// 500 Internal Server Error
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Retorna el reason phrase asociado a un código de estado.
///
/// Los códigos que no están en la tabla se reportan como "Unknown";
/// la status line se serializa igual.
///
/// # Ejemplo
/// ```
/// use minihttp::http::status;
///
/// assert_eq!(status::reason_phrase(200), "OK");
/// assert_eq!(status::reason_phrase(404), "Not Found");
/// assert_eq!(status::reason_phrase(799), "Unknown");
/// ```
pub fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Verifica si el código indica éxito (2xx)
pub fn is_success(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

/// Verifica si el código indica error del cliente (4xx)
pub fn is_client_error(status_code: u16) -> bool {
    (400..500).contains(&status_code)
}

/// Verifica si el código indica error del servidor (5xx)
pub fn is_server_error(status_code: u16) -> bool {
    (500..600).contains(&status_code)
}
