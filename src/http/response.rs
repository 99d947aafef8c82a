//! # Construcción y Serialización de Responses HTTP
//! src/http/response.rs
//!
//! Este módulo arma responses HTTP de forma programática y las convierte a
//! bytes listos para el socket.
//!
//! ## Formato de una response con contenido
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Encoding: gzip\r\n        (solo si se negoció un encoding)
//! Content-Type: text/plain\r\n
//! Content-Length: 23\r\n
//! \r\n
//! <body, comprimido si aplica>
//! ```
//!
//! Los headers de contenido salen siempre en ese orden fijo. Una response
//! sin content type se serializa "pelada": status line y línea vacía, sin
//! headers ni body (así responden la ruta raíz, los 404 y los 201).
//!
//! Cada status se serializa con su propia status line, derivada de la
//! variante de `StatusCode`.

use super::StatusCode;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Representa una response HTTP completa, con el body sin comprimir
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 201, 404, ...)
    status: StatusCode,

    /// Content-Type del body; None significa response pelada
    content_type: Option<&'static str>,

    /// Encoding negociado con el cliente; None significa identidad
    content_encoding: Option<&'static str>,

    /// Cuerpo de la respuesta, antes de aplicar compresión
    body: Vec<u8>,
}

impl Response {
    /// Crea una response con el código de estado especificado
    ///
    /// Por defecto no tiene content type ni body: se serializa pelada.
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_encoding: None,
            body: Vec::new(),
        }
    }

    /// Establece el Content-Type de la response
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_content_type("text/plain")
    ///     .with_body("Hello World");
    /// ```
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (archivos servidos tal cual).
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Adjunta el encoding negociado con el cliente
    ///
    /// Con `Some`, el body se comprime al serializar y se emite el header
    /// `Content-Encoding`. Solo tiene efecto en responses con contenido.
    pub fn with_encoding(mut self, encoding: Option<&'static str>) -> Self {
        self.content_encoding = encoding;
        self
    }

    /// Convierte la response a bytes listos para enviar por el socket
    ///
    /// Si hay un encoding adjunto, el body se comprime **antes** de calcular
    /// `Content-Length`, que siempre cuenta los bytes que van al cable.
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::{Response, StatusCode};
    ///
    /// let bytes = Response::new(StatusCode::Ok)
    ///     .with_content_type("text/plain")
    ///     .with_body("abc")
    ///     .to_bytes();
    ///
    /// assert_eq!(
    ///     bytes,
    ///     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
    /// );
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line, derivada de la variante (nunca de comparar strings)
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // Response pelada: sin headers de contenido ni body
        let content_type = match self.content_type {
            Some(ct) => ct,
            None => {
                result.extend_from_slice(b"\r\n");
                return result;
            }
        };

        // 2. Compresión condicional. Escribir gzip a un Vec no falla en la
        //    práctica, pero si fallara se envía el body en identidad.
        let (wire_body, encoding) = match self.content_encoding {
            Some(enc) => match gzip_compress(&self.body) {
                Ok(compressed) => (compressed, Some(enc)),
                Err(e) => {
                    eprintln!("   ❌ Error comprimiendo body: {}", e);
                    (self.body.clone(), None)
                }
            },
            None => (self.body.clone(), None),
        };

        // 3. Headers de contenido, en orden fijo
        if let Some(enc) = encoding {
            result.extend_from_slice(format!("Content-Encoding: {}\r\n", enc).as_bytes());
        }
        result.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        result.extend_from_slice(format!("Content-Length: {}\r\n", wire_body.len()).as_bytes());

        // 4. Línea vacía y body
        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&wire_body);

        result
    }

    /// Obtiene el código de estado de la response
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el Content-Type, si lo hay
    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Obtiene el encoding adjunto, si lo hay
    pub fn content_encoding(&self) -> Option<&'static str> {
        self.content_encoding
    }

    /// Obtiene una referencia al body (sin comprimir)
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Comprime datos con gzip en un solo paso, nivel por defecto
fn gzip_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gzip_decompress(data: &[u8]) -> Vec<u8> {
        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_bare_response_ok() {
        let bytes = Response::new(StatusCode::Ok).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_bare_response_not_found() {
        let bytes = Response::new(StatusCode::NotFound).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_created_keeps_its_own_status_line() {
        // Un 201 debe serializarse como 201, no degradarse a 404
        let bytes = Response::new(StatusCode::Created).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 201 Created\r\n\r\n");
    }

    #[test]
    fn test_internal_server_error_status_line() {
        let bytes = Response::new(StatusCode::InternalServerError).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 500 Internal Server Error\r\n\r\n");
    }

    #[test]
    fn test_body_response_layout() {
        let bytes = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("Test")
            .to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\nTest"
        );
    }

    #[test]
    fn test_header_order_with_encoding() {
        let bytes = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("hola")
            .with_encoding(Some("gzip"))
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes);

        // Orden fijo: Content-Encoding, Content-Type, Content-Length
        let pos_enc = text.find("Content-Encoding: gzip\r\n").unwrap();
        let pos_type = text.find("Content-Type: text/plain\r\n").unwrap();
        let pos_len = text.find("Content-Length: ").unwrap();
        assert!(pos_enc < pos_type);
        assert!(pos_type < pos_len);
    }

    #[test]
    fn test_gzip_round_trip() {
        let response = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("cuerpo de prueba para comprimir")
            .with_encoding(Some("gzip"));
        let bytes = response.to_bytes();

        let split = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
        let wire_body = &bytes[split + 4..];

        assert_eq!(gzip_decompress(wire_body), b"cuerpo de prueba para comprimir");
    }

    #[test]
    fn test_content_length_counts_compressed_bytes() {
        let bytes = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
            .with_encoding(Some("gzip"))
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes);

        let split = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
        let wire_body_len = bytes.len() - (split + 4);

        let declared: usize = text
            .lines()
            .find_map(|l| l.strip_prefix("Content-Length: "))
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        assert_eq!(declared, wire_body_len);
        // Y no es el largo del body original
        assert_ne!(declared, 40);
    }

    #[test]
    fn test_no_encoding_header_without_negotiation() {
        let bytes = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("abc")
            .with_encoding(None)
            .to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(!text.contains("Content-Encoding"));
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_to_bytes_is_idempotent() {
        let response = Response::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body("abc")
            .with_encoding(Some("gzip"));

        assert_eq!(response.to_bytes(), response.to_bytes());
    }

    #[test]
    fn test_binary_body_bytes() {
        let data = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::new(StatusCode::Ok)
            .with_content_type("application/octet-stream")
            .with_body_bytes(data.clone());

        assert_eq!(response.body(), &data[..]);
        let bytes = response.to_bytes();
        assert!(bytes.ends_with(&data));
    }
}
