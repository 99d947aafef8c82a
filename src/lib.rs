//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente implementado desde cero: acepta
//! conexiones TCP, parsea un request por conexión, despacha a un conjunto
//! fijo de rutas y serializa la response, comprimida con gzip si el
//! cliente la negocia.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: parsing de requests, negociación de encoding, responses y status
//! - `router`: tabla de rutas (método, primer segmento) → handler
//! - `handlers`: las rutas del servidor (raíz, echo, user-agent, files)
//! - `server`: listener TCP y manejo de conexiones, un thread por conexión
//! - `config`: argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
