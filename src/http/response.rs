//! # Construcción y Serialización de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo proporciona una API para construir respuestas HTTP y
//! serializarlas sobre un socket.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! X-Custom: value\r\n
//! Content-Length: 12\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! Los headers del caller se escriben verbatim y en orden. El serializador
//! inyecta `Content-Length`, `Content-Type` y `Connection` solo cuando el
//! caller no los proveyó (la comparación de nombres es case-insensitive).

use super::status;
use std::io::Write;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado numérico (200, 404, …). Puede ser cualquier valor;
    /// el serializador resuelve el reason phrase contra la tabla fija.
    status_code: u16,

    /// Líneas de header crudas ("Name: value"), escritas verbatim
    headers: Vec<String>,

    /// Cuerpo de la respuesta (opcional)
    body: Option<String>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado,
    /// sin headers ni body.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::Response;
    ///
    /// let response = Response::new(200);
    /// ```
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Agrega un header a la respuesta (versión builder)
    ///
    /// No hay de-duplicación: el caller es dueño de sus headers.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::Response;
    ///
    /// let response = Response::new(200)
    ///     .with_header("Content-Type", "application/json");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", name, value));
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(format!("{}: {}", name, value));
    }

    /// Establece el cuerpo de la respuesta.
    ///
    /// `Content-Length` no se fija acá: lo calcula el serializador al
    /// escribir, salvo que el caller ya lo haya provisto.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::Response;
    ///
    /// let response = Response::new(200).with_body("Hello");
    /// ```
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> u16 {
        self.status_code
    }

    /// Obtiene las líneas de header del caller
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Obtiene el body, si existe
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Etapa de serialización que falló al escribir una respuesta.
///
/// Una falla aborta las etapas restantes; no hay reintento ni reporte
/// de éxito parcial.
#[derive(Debug)]
pub enum WriteError {
    /// Falló la escritura de la status line
    StatusLine(std::io::Error),

    /// Falló la escritura de los headers
    Headers(std::io::Error),

    /// Falló la escritura de la línea vacía separadora
    Separator(std::io::Error),

    /// Falló la escritura del body
    Body(std::io::Error),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::StatusLine(e) => write!(f, "Failed writing status line: {}", e),
            WriteError::Headers(e) => write!(f, "Failed writing headers: {}", e),
            WriteError::Separator(e) => write!(f, "Failed writing header separator: {}", e),
            WriteError::Body(e) => write!(f, "Failed writing body: {}", e),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::StatusLine(e)
            | WriteError::Headers(e)
            | WriteError::Separator(e)
            | WriteError::Body(e) => Some(e),
        }
    }
}

/// Serializa una respuesta completa sobre un writer.
///
/// Orden de escritura: status line, headers del caller verbatim,
/// `Content-Length` inyectado si falta, `Content-Type` y `Connection`
/// por defecto si faltan, línea vacía, body (omitido si no hay).
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<(), WriteError> {
    write_status_line(writer, response.status()).map_err(WriteError::StatusLine)?;

    write_headers(writer, response).map_err(WriteError::Headers)?;

    writer.write_all(b"\r\n").map_err(WriteError::Separator)?;

    write_body(writer, response.body()).map_err(WriteError::Body)?;

    Ok(())
}

fn write_status_line<W: Write>(writer: &mut W, status_code: u16) -> std::io::Result<()> {
    let status_line = format!(
        "HTTP/1.1 {} {}\r\n",
        status_code,
        status::reason_phrase(status_code)
    );
    writer.write_all(status_line.as_bytes())
}

fn write_header_line<W: Write>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

/// Verifica si una línea de header con ese nombre ya existe.
///
/// El nombre matchea case-insensitive y debe estar seguido de ':'.
fn header_exists(headers: &[String], name: &str) -> bool {
    let name = name.as_bytes();

    headers.iter().any(|line| {
        let line = line.as_bytes();
        line.len() > name.len()
            && line[name.len()] == b':'
            && line[..name.len()].eq_ignore_ascii_case(name)
    })
}

fn write_headers<W: Write>(writer: &mut W, response: &Response) -> std::io::Result<()> {
    for line in response.headers() {
        write_header_line(writer, line)?;
    }

    if !header_exists(response.headers(), "Content-Length") {
        let body_len = response.body().map(str::len).unwrap_or(0);
        write_header_line(writer, &format!("Content-Length: {}", body_len))?;
    }

    if !header_exists(response.headers(), "Content-Type") {
        write_header_line(writer, "Content-Type: text/html; charset=utf-8")?;
    }

    if !header_exists(response.headers(), "Connection") {
        write_header_line(writer, "Connection: close")?;
    }

    Ok(())
}

fn write_body<W: Write>(writer: &mut W, body: Option<&str>) -> std::io::Result<()> {
    match body {
        Some(body) => writer.write_all(body.as_bytes()),
        None => Ok(()),
    }
}
