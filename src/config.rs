//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttp --port 8080 --workers 16 --backlog 100
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_WORKERS=8 ./minihttp
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp")]
#[command(about = "Servidor HTTP/1.1 minimalista con pool de worker threads")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Número de worker threads del pool
    #[arg(long, default_value = "16", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Profundidad del backlog del socket (conexiones pendientes de accept)
    #[arg(long, default_value = "100", env = "HTTP_BACKLOG")]
    pub backlog: u32,

    /// Tamaño del buffer de lectura por conexión, en bytes.
    /// Un request más grande que el buffer se trunca.
    #[arg(long = "read-buffer", default_value = "16384", env = "HTTP_READ_BUFFER")]
    pub read_buffer_size: usize,
}

impl Config {
    /// Obtiene la dirección completa para bind.
    ///
    /// El servidor escucha en todas las interfaces locales; solo el puerto
    /// es configurable.
    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.backlog == 0 {
            return Err("Backlog must be >= 1".to_string());
        }

        if self.read_buffer_size == 0 {
            return Err("Read buffer size must be >= 1".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            workers: 16,
            backlog: 100,
            read_buffer_size: 16384,
        }
    }
}
