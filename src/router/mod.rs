//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, path) a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::resolve → Handler → Option<Response>
//! ```
//!
//! Hay una tabla de rutas por método HTTP conocido. El lookup es un
//! escaneo lineal en orden de registro; si el path no aparece se usa el
//! fallback de 404, y si el método no es conocido, el de 405.
//!
//! El registro de rutas ocurre antes de arrancar el accept loop; durante
//! el servicio el router es de solo lectura y no necesita sincronización.

use crate::http::{status, Method, Request, Response, METHOD_COUNT};
use log::trace;

/// Tipo de función handler
///
/// Un handler recibe una vista inmutable del request y retorna una
/// response propia, o `None` para indicar "nada que responder" (la
/// conexión se cierra igual).
pub type Handler = fn(&Request) -> Option<Response>;

/// Capacidad inicial de cada tabla de rutas
const DEFAULT_ROUTE_CAPACITY: usize = 8;

/// Una ruta registrada: path exacto + handler
struct Route {
    path: String,
    handler: Handler,
}

/// Errores al registrar una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No se puede registrar bajo un método no reconocido
    UnknownMethod,

    /// El path está vacío
    EmptyPath,
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::UnknownMethod => write!(f, "Cannot register a route for an unknown method"),
            RouterError::EmptyPath => write!(f, "Cannot register a route with an empty path"),
        }
    }
}

impl std::error::Error for RouterError {}

/// Router con una tabla de rutas por método y dos handlers de fallback
pub struct Router {
    /// Tablas indexadas por `Method::index()`
    methods: [Vec<Route>; METHOD_COUNT],

    /// Fallback cuando ningún path matchea (404)
    not_found_handler: Handler,

    /// Fallback cuando el método no es reconocido (405)
    method_not_allowed_handler: Handler,
}

impl Router {
    /// Crea un router sin rutas, con los fallbacks por defecto
    pub fn new() -> Self {
        Self {
            methods: std::array::from_fn(|_| Vec::with_capacity(DEFAULT_ROUTE_CAPACITY)),
            not_found_handler: default_not_found_handler,
            method_not_allowed_handler: default_method_not_allowed_handler,
        }
    }

    /// Registra una ruta bajo un método conocido.
    ///
    /// No hay de-duplicación: registrar el mismo path dos veces conserva
    /// ambas entradas, y el lookup retorna la primera en orden de
    /// registro. La primera registrada gana.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Method, Request, Response};
    /// use minihttp::router::Router;
    ///
    /// fn hello_handler(_req: &Request) -> Option<Response> {
    ///     Some(Response::new(200).with_body("Hello"))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.add_route(Method::GET, "/hello", hello_handler).unwrap();
    /// ```
    pub fn add_route(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> Result<(), RouterError> {
        let index = method.index().ok_or(RouterError::UnknownMethod)?;

        if path.is_empty() {
            return Err(RouterError::EmptyPath);
        }

        self.methods[index].push(Route {
            path: path.to_string(),
            handler,
        });

        Ok(())
    }

    /// Resuelve el handler para (método, path).
    ///
    /// Siempre retorna un handler: el registrado que matchee exacto, o
    /// uno de los dos fallbacks. Un path registrado bajo *otro* método no
    /// se consulta: cualquier mismatch resuelve a not-found, no a
    /// method-not-allowed (distinguirlos exigiría recorrer todas las
    /// tablas en cada lookup).
    pub fn resolve(&self, method: Method, path: &str) -> Handler {
        let index = match method.index() {
            Some(index) => index,
            None => {
                trace!("Unroutable method, using 405 handler");
                return self.method_not_allowed_handler;
            }
        };

        for route in &self.methods[index] {
            if route.path == path {
                return route.handler;
            }
        }

        self.not_found_handler
    }

    /// Reemplaza el handler de 404
    pub fn set_not_found_handler(&mut self, handler: Handler) {
        self.not_found_handler = handler;
    }

    /// Reemplaza el handler de 405
    pub fn set_method_not_allowed_handler(&mut self, handler: Handler) {
        self.method_not_allowed_handler = handler;
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn default_not_found_handler(_request: &Request) -> Option<Response> {
    Some(Response::new(status::NOT_FOUND).with_body("Page not Found"))
}

fn default_method_not_allowed_handler(_request: &Request) -> Option<Response> {
    Some(Response::new(status::METHOD_NOT_ALLOWED).with_body("Method not allowed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_one(_req: &Request) -> Option<Response> {
        Some(Response::new(status::OK).with_body("one"))
    }

    fn handler_two(_req: &Request) -> Option<Response> {
        Some(Response::new(status::OK).with_body("two"))
    }

    fn custom_fallback(_req: &Request) -> Option<Response> {
        Some(Response::new(status::OK).with_body("custom"))
    }

    fn sample_request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    fn invoke(handler: Handler) -> Response {
        let request = sample_request(b"GET /any HTTP/1.1\r\n\r\n");
        handler(&request).expect("test handlers always respond")
    }

    #[test]
    fn test_resolve_registered_route() {
        let mut router = Router::new();
        router.add_route(Method::GET, "/x", handler_one).unwrap();

        let response = invoke(router.resolve(Method::GET, "/x"));
        assert_eq!(response.status(), status::OK);
        assert_eq!(response.body(), Some("one"));
    }

    #[test]
    fn test_first_registered_wins() {
        let mut router = Router::new();
        router.add_route(Method::GET, "/x", handler_one).unwrap();
        router.add_route(Method::GET, "/x", handler_two).unwrap();

        let response = invoke(router.resolve(Method::GET, "/x"));
        assert_eq!(response.body(), Some("one"));
    }

    #[test]
    fn test_unregistered_path_resolves_not_found() {
        let router = Router::new();

        let response = invoke(router.resolve(Method::GET, "/missing"));
        assert_eq!(response.status(), status::NOT_FOUND);
        assert_eq!(response.body(), Some("Page not Found"));
    }

    #[test]
    fn test_method_isolation_reports_not_found() {
        // "/x" existe solo bajo GET; resolverlo bajo POST da 404, no 405
        let mut router = Router::new();
        router.add_route(Method::GET, "/x", handler_one).unwrap();

        let response = invoke(router.resolve(Method::POST, "/x"));
        assert_eq!(response.status(), status::NOT_FOUND);
    }

    #[test]
    fn test_unknown_method_resolves_method_not_allowed() {
        let router = Router::new();

        let response = invoke(router.resolve(Method::Unknown, "/x"));
        assert_eq!(response.status(), status::METHOD_NOT_ALLOWED);
        assert_eq!(response.body(), Some("Method not allowed"));
    }

    #[test]
    fn test_exact_match_only() {
        let mut router = Router::new();
        router.add_route(Method::GET, "/x", handler_one).unwrap();

        let response = invoke(router.resolve(Method::GET, "/x/"));
        assert_eq!(response.status(), status::NOT_FOUND);
    }

    #[test]
    fn test_add_route_rejects_unknown_method() {
        let mut router = Router::new();

        let result = router.add_route(Method::Unknown, "/x", handler_one);
        assert_eq!(result.unwrap_err(), RouterError::UnknownMethod);
    }

    #[test]
    fn test_add_route_rejects_empty_path() {
        let mut router = Router::new();

        let result = router.add_route(Method::GET, "", handler_one);
        assert_eq!(result.unwrap_err(), RouterError::EmptyPath);
    }

    #[test]
    fn test_not_found_handler_override() {
        let mut router = Router::new();
        router.set_not_found_handler(custom_fallback);

        let response = invoke(router.resolve(Method::GET, "/missing"));
        assert_eq!(response.body(), Some("custom"));
    }

    #[test]
    fn test_method_not_allowed_handler_override() {
        let mut router = Router::new();
        router.set_method_not_allowed_handler(custom_fallback);

        let response = invoke(router.resolve(Method::Unknown, "/x"));
        assert_eq!(response.body(), Some("custom"));
    }

    #[test]
    fn test_tables_grow_past_initial_capacity() {
        let mut router = Router::new();

        for i in 0..20 {
            let path = format!("/route-{}", i);
            router.add_route(Method::GET, &path, handler_one).unwrap();
        }

        let response = invoke(router.resolve(Method::GET, "/route-19"));
        assert_eq!(response.status(), status::OK);
    }
}
