//! # minihttp - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: inicializa el logging, parsea la
//! configuración, registra las rutas y arranca el accept loop.

use clap::Parser;
use log::error;
use minihttp::commands;
use minihttp::config::Config;
use minihttp::http::Method;
use minihttp::router::Handler;
use minihttp::server::Server;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create server: {}", e);
            std::process::exit(1);
        }
    };

    let routes: [(Method, &str, Handler); 3] = [
        (Method::GET, "/", commands::home_handler),
        (Method::GET, "/status", commands::status_handler),
        (Method::POST, "/echo", commands::echo_handler),
    ];

    for (method, path, handler) in routes {
        if let Err(e) = server.add_route(method, path, handler) {
            error!("Failed to add route {} {}: {}", method.as_str(), path, e);
            std::process::exit(1);
        }
    }

    // El accept loop no retorna salvo falla creando el socket de escucha
    if let Err(e) = server.run() {
        error!("Fatal server error: {}", e);
        std::process::exit(1);
    }
}
