//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP a nivel de bytes.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! body opcional
//! ```
//!
//! El parser es tolerante por diseño: un método desconocido o una versión
//! rara no son errores de parseo (el router decide qué hacer con ellos).
//! Solo una request line irreconocible aborta el parseo, y en ese caso no
//! se construye ningún objeto parcial.

/// Métodos HTTP reconocidos
///
/// `Unknown` representa cualquier token de método que no sea uno de los
/// ocho verbos conocidos. Es un valor válido (el request parsea bien),
/// pero ninguna ruta puede registrarse bajo él.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    TRACE,
    Unknown,
}

/// Cantidad de métodos conocidos (excluye `Unknown`)
pub const METHOD_COUNT: usize = 8;

impl Method {
    /// Mapea un token de método a su variante.
    ///
    /// La comparación es exacta y case-sensitive: `"get"` no es `GET`.
    /// Cualquier token no reconocido produce `Unknown`, nunca un error.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            _ => Method::Unknown,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::Unknown => "UNKNOWN",
        }
    }

    /// Índice del método en las tablas por-método del router.
    ///
    /// `None` para `Unknown`, que no tiene tabla.
    pub fn index(&self) -> Option<usize> {
        match self {
            Method::GET => Some(0),
            Method::POST => Some(1),
            Method::PUT => Some(2),
            Method::DELETE => Some(3),
            Method::PATCH => Some(4),
            Method::HEAD => Some(5),
            Method::OPTIONS => Some(6),
            Method::TRACE => Some(7),
            Method::Unknown => None,
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// El buffer no es UTF-8 válido
    InvalidEncoding,

    /// No hay `\r\n` que termine la request line
    MissingRequestLine,

    /// La request line no tiene espacio tras el método
    MissingMethod,

    /// La request line no tiene espacio entre path y versión
    MissingPath,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidEncoding => write!(f, "Request is not valid UTF-8"),
            ParseError::MissingRequestLine => write!(f, "Missing request line terminator"),
            ParseError::MissingMethod => write!(f, "Invalid HTTP request: missing method"),
            ParseError::MissingPath => write!(f, "Invalid HTTP request: missing path"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP mapeado
    method: Method,

    /// Token de método tal como llegó (ej: "GET", "BREW")
    method_str: String,

    /// Path de la petición (ej: "/status"), sin decodificar
    path: String,

    /// Versión del protocolo tal como llegó (ej: "HTTP/1.1")
    version: String,

    /// Líneas de header crudas y en orden (ej: "Host: localhost")
    headers: Vec<String>,

    /// Body del request: el sufijo verbatim tras la primera línea vacía
    body: Option<String>,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes leídos del socket (longitud explícita, sin NUL final)
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado
    /// * `Err(ParseError)` - Request irreconocible; no queda estado parcial
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let raw = b"GET /status HTTP/1.1\r\nHost: x\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/status");
    /// assert_eq!(request.headers(), ["Host: x"]);
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let raw = std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidEncoding)?;

        // 1. Request line: todo hasta el primer \r\n
        let request_line_end = raw.find("\r\n").ok_or(ParseError::MissingRequestLine)?;
        let request_line = &raw[..request_line_end];

        // 2. Separar método, path y versión por los primeros espacios.
        // Buscar dentro del slice de la request line evita que una línea
        // sin espacios "encuentre" delimitadores más allá del \r\n.
        let (method_str, remainder) = request_line
            .split_once(' ')
            .ok_or(ParseError::MissingMethod)?;
        let (path, version) = remainder.split_once(' ').ok_or(ParseError::MissingPath)?;

        // 3. Token → método. Un verbo desconocido no es error de parseo.
        let method = Method::from_token(method_str);

        // 4. Headers: comienzan dos bytes después de la request line
        let headers = Self::parse_headers(&raw[request_line_end + 2..]);

        // 5. Body: sufijo tras la primera línea vacía, si hay algo
        let body = Self::parse_body(raw);

        Ok(Request {
            method,
            method_str: method_str.to_string(),
            path: path.to_string(),
            version: version.to_string(),
            headers,
            body,
        })
    }

    /// Cuenta las líneas de header de la sección.
    ///
    /// Una línea cuenta solo si está terminada por `\r\n` y no es vacía;
    /// la línea vacía marca el fin de los headers.
    fn count_header_lines(section: &str) -> usize {
        let mut count = 0;
        let mut rest = section;

        while let Some(line_end) = rest.find("\r\n") {
            if line_end == 0 {
                break;
            }
            count += 1;
            rest = &rest[line_end + 2..];
        }

        count
    }

    /// Parsea los headers como líneas crudas, en orden de llegada.
    ///
    /// Primero se cuentan las líneas y luego se reserva el storage exacto,
    /// así la población no realoca.
    fn parse_headers(section: &str) -> Vec<String> {
        let count = Self::count_header_lines(section);
        let mut headers = Vec::with_capacity(count);

        let mut rest = section;
        while headers.len() < count {
            let line_end = match rest.find("\r\n") {
                Some(end) => end,
                None => break,
            };
            if line_end == 0 {
                break;
            }

            headers.push(rest[..line_end].to_string());
            rest = &rest[line_end + 2..];
        }

        headers
    }

    /// Extrae el body: todo lo que sigue al primer `\r\n\r\n` del buffer,
    /// verbatim y sin decodificar. Si no sigue nada, no hay body.
    fn parse_body(raw: &str) -> Option<String> {
        let separator = raw.find("\r\n\r\n")?;
        let body_start = separator + 4;

        if body_start < raw.len() {
            Some(raw[body_start..].to_string())
        } else {
            None
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el token de método crudo
    pub fn method_str(&self) -> &str {
        &self.method_str
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión del protocolo
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene las líneas de header crudas, en orden
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Busca el valor de un header por nombre (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (header_name, value) = line.split_once(':')?;
            if header_name.eq_ignore_ascii_case(name) {
                Some(value.trim_start())
            } else {
                None
            }
        })
    }

    /// Obtiene el body del request, si existe
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
