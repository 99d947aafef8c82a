//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 4221 --directory /tmp/data
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/data ./file_server
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP/1.1 concurrente para servir y recibir archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio servido por las rutas /files
    ///
    /// Si no se configura, las rutas /files responden siempre 404.
    #[arg(long, env = "FILES_DIR")]
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(format!(
                    "Serve directory does not exist or is not a directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:    {}", self.address());
        match &self.directory {
            Some(dir) => println!("   Files dir:  {}", dir.display()),
            None => println!("   Files dir:  (no configurado, /files responde 404)"),
        }
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: None,
        }
    }
}
