//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test arranca su propio servidor sobre un puerto efímero y le
//! habla por TCP crudo, como lo haría un cliente real.

use minihttp::config::Config;
use minihttp::http::{status, Method, Request, Response};
use minihttp::router::Handler;
use minihttp::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

fn ok_handler(_req: &Request) -> Option<Response> {
    Some(Response::new(status::OK).with_body("OK"))
}

fn echo_handler(req: &Request) -> Option<Response> {
    req.body()
        .map(|body| Response::new(status::OK).with_body(body))
}

fn teapot_handler(_req: &Request) -> Option<Response> {
    Some(Response::new(418).with_body("short and stout"))
}

/// Arranca un servidor con las rutas dadas sobre un puerto efímero
fn spawn_server(routes: Vec<(Method, &'static str, Handler)>) -> SocketAddr {
    let config = Config {
        workers: 4,
        ..Config::default()
    };

    let mut server = Server::new(config).expect("failed to build server");
    for (method, path, handler) in routes {
        server.add_route(method, path, handler).expect("add_route");
    }

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().unwrap();

    thread::spawn(move || {
        let _ = server.serve(listener);
    });

    address
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(address: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(address).expect("connect");

    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

#[test]
fn test_end_to_end_ok_route() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"GET / HTTP/1.1\r\n\r\n");

    assert!(
        response.starts_with("HTTP/1.1 200 OK\r\n"),
        "unexpected status line: {}",
        response
    );
    assert_eq!(extract_body(&response), "OK");
}

#[test]
fn test_default_headers_present() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");

    assert!(response.contains("Content-Length: 2\r\n"));
    assert!(response.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(response.contains("Connection: close\r\n"));
}

#[test]
fn test_unregistered_path_gets_404() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"GET /missing HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert_eq!(extract_body(&response), "Page not Found");
}

#[test]
fn test_wrong_method_gets_404_not_405() {
    // "/" existe solo bajo GET: un POST resuelve al fallback de 404
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"POST / HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_unknown_verb_gets_405() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"BREW / HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert_eq!(extract_body(&response), "Method not allowed");
}

#[test]
fn test_post_body_reaches_handler() {
    let address = spawn_server(vec![(Method::POST, "/echo", echo_handler)]);

    let response = send_raw(address, b"POST /echo HTTP/1.1\r\n\r\nhello");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_body(&response), "hello");
}

#[test]
fn test_custom_status_code_serialized() {
    let address = spawn_server(vec![(Method::GET, "/teapot", teapot_handler)]);

    let response = send_raw(address, b"GET /teapot HTTP/1.1\r\n\r\n");

    // 418 no está en la tabla de reason phrases
    assert!(response.starts_with("HTTP/1.1 418 Unknown\r\n"));
    assert_eq!(extract_body(&response), "short and stout");
}

#[test]
fn test_malformed_request_closes_without_response() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let response = send_raw(address, b"\x01\x02\x03 garbage without structure");

    assert!(response.is_empty());
}

#[test]
fn test_request_headers_are_visible_to_handlers() {
    fn header_probe(req: &Request) -> Option<Response> {
        let value = req.header("X-Probe").unwrap_or("absent");
        Some(Response::new(status::OK).with_body(value))
    }

    let address = spawn_server(vec![(Method::GET, "/probe", header_probe as Handler)]);

    let response = send_raw(address, b"GET /probe HTTP/1.1\r\nX-Probe: seen\r\n\r\n");

    assert_eq!(extract_body(&response), "seen");
}

#[test]
fn test_concurrent_clients_all_served() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    let clients: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(move || {
                let response = send_raw(address, b"GET / HTTP/1.1\r\n\r\n");
                response.starts_with("HTTP/1.1 200 OK\r\n") && extract_body(&response) == "OK"
            })
        })
        .collect();

    for client in clients {
        assert!(client.join().unwrap(), "a client did not get 200 OK");
    }
}

#[test]
fn test_sequential_requests_each_on_fresh_connection() {
    let address = spawn_server(vec![(Method::GET, "/", ok_handler)]);

    // Sin keep-alive: cada request usa su propia conexión
    for _ in 0..5 {
        let response = send_raw(address, b"GET / HTTP/1.1\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}
