//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Accept loop de un solo thread sobre un socket de escucha. Por cada
//! conexión: una única lectura al buffer, parseo, resolución del handler
//! y submit al pool; el worker que toma la tarea invoca el handler,
//! serializa la respuesta y cierra la conexión.
//!
//! La vida de la conexión va del accept (main thread) al fin de la
//! escritura de la respuesta (worker thread). El `TcpStream` se mueve
//! dentro de la tarea, así que el cierre ocurre exactamente una vez, en
//! el worker, cuando el stream sale de scope.

use crate::config::Config;
use crate::http::{self, Method, Request};
use crate::pool::{PoolError, ThreadPool};
use crate::router::{Handler, Router, RouterError};
use log::{debug, error, info, trace, warn};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Router,
    pool: ThreadPool,
}

impl Server {
    /// Crea el servidor: router vacío + pool con los workers configurados.
    ///
    /// Una falla arrancando el pool es fatal para la construcción; los
    /// workers ya arrancados quedan joineados, sin threads huérfanos.
    pub fn new(config: Config) -> Result<Self, PoolError> {
        let pool = ThreadPool::new(config.workers)?;

        Ok(Self {
            config,
            router: Router::new(),
            pool,
        })
    }

    /// Registra una ruta.
    ///
    /// El registro ocurre antes de `run()`; no es thread-safe contra el
    /// servicio.
    pub fn add_route(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> Result<(), RouterError> {
        self.router.add_route(method, path, handler)
    }

    /// Reemplaza el handler de 404
    pub fn set_not_found_handler(&mut self, handler: Handler) {
        self.router.set_not_found_handler(handler);
    }

    /// Reemplaza el handler de 405
    pub fn set_method_not_allowed_handler(&mut self, handler: Handler) {
        self.router.set_method_not_allowed_handler(handler);
    }

    /// Crea el socket de escucha y sirve para siempre.
    ///
    /// Una falla creando/bindeando el socket se propaga al caller (el
    /// binario la loguea y termina el proceso); las fallas por conexión
    /// nunca llegan hasta acá.
    pub fn run(&self) -> std::io::Result<()> {
        let listener = create_listener(&self.config.address(), self.config.backlog)?;

        info!(
            "Server listening on {} (backlog: {})",
            self.config.address(),
            self.config.backlog
        );

        self.serve(listener)
    }

    /// Sirve conexiones sobre un listener ya creado.
    ///
    /// Separado de `run` para poder servir sobre un puerto efímero en
    /// tests. Las fallas de accept son transitorias: se loguean y el
    /// loop continúa.
    pub fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        info!(
            "Serving with {} worker threads",
            self.pool.thread_count()
        );

        loop {
            debug!("Waiting for connections...");

            let (stream, peer_addr) = match listener.accept() {
                Ok(connection) => connection,
                Err(e) => {
                    error!("Failed to accept client connection: {}", e);
                    continue;
                }
            };

            debug!("Client connected from {}", peer_addr);
            self.handle_client(stream);
        }
    }

    /// Lee, parsea y despacha una conexión recién aceptada.
    ///
    /// Una única lectura: un request más grande que el buffer configurado
    /// queda truncado. Cualquier falla acá degrada a "descartar esta
    /// conexión", nunca a una falla del proceso.
    fn handle_client(&self, mut stream: TcpStream) {
        let mut buffer = vec![0u8; self.config.read_buffer_size];

        let bytes_read = match stream.read(&mut buffer) {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to read client request from socket: {}", e);
                return;
            }
        };

        if bytes_read == 0 {
            debug!("Client closed the connection without sending data");
            return;
        }

        let request = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => request,
            Err(e) => {
                // La conexión se descarta sin escribir respuesta
                error!("Failed to parse HTTP request: {}", e);
                return;
            }
        };

        trace!(
            "{} {} {}",
            request.method_str(),
            request.path(),
            request.version()
        );

        let handler = self.router.resolve(request.method(), request.path());

        let submitted = self
            .pool
            .submit(move || complete_request(handler, request, stream));

        if let Err(e) = submitted {
            error!("Failed to hand connection to worker pool: {}", e);
        }
    }
}

/// Lado worker: invoca el handler, escribe la respuesta y cierra.
///
/// El stream y el request son propiedad exclusiva de esta tarea; al
/// retornar se liberan, con o sin respuesta escrita.
fn complete_request(handler: Handler, request: Request, mut stream: TcpStream) {
    let response = match handler(&request) {
        Some(response) => response,
        None => {
            warn!("Handler returned no response");
            return;
        }
    };

    if let Err(e) = http::write_response(&mut stream, &response) {
        error!("Failed sending response to client: {}", e);
        return;
    }

    debug!("Sent response with status code {}", response.status());
}

/// Construye el socket de escucha con address-reuse y el backlog pedido.
///
/// std no expone estas opciones antes del bind, así que el socket se
/// arma con socket2 y recién después se convierte en `TcpListener`.
fn create_listener(address: &str, backlog: u32) -> std::io::Result<TcpListener> {
    let address: SocketAddr = address
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&address.into())?;
    socket.listen(backlog.min(i32::MAX as u32) as i32)?;

    Ok(socket.into())
}
