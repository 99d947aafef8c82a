//! # Módulo HTTP
//!
//! Este módulo implementa la capa de protocolo HTTP/1.1 desde cero, sin
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (wire parser)
//! - Negociación de Content-Encoding
//! - Construcción y serialización de responses
//! - Manejo de status codes
//!
//! El soporte de HTTP/1.1 es deliberadamente mínimo: un request por
//! conexión, sin keep-alive, sin chunked transfer encoding y con un
//! conjunto cerrado de headers reconocidos.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Encoding: gzip\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 23\r\n
//! \r\n
//! <body comprimido>
//! ```

pub mod encoding; // Negociación de Content-Encoding
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
