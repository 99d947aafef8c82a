//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests desde cero.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION`
//! 2. **Headers**: solo se reconocen cinco nombres; el resto se descarta
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: bytes crudos hasta el final del buffer
//!
//! El buffer de entrada proviene de una única lectura acotada del socket,
//! así que puede venir truncado. El parser nunca entra en pánico por input
//! malformado: retorna un `ParseError` tipado y el caller decide el status.

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    Get,

    /// POST - Enviar datos a un recurso
    Post,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Nombres de header que el servidor reconoce
///
/// Cualquier otro header se descarta en silencio: es una simplificación
/// deliberada, no un olvido. El nombre incluye los dos puntos porque la
/// línea se parte en el primer espacio (`Host: valor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderName {
    Host,
    UserAgent,
    Accept,
    ContentLength,
    AcceptEncoding,
}

impl HeaderName {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "Host:" => Some(HeaderName::Host),
            "User-Agent:" => Some(HeaderName::UserAgent),
            "Accept:" => Some(HeaderName::Accept),
            "Content-Length:" => Some(HeaderName::ContentLength),
            "Accept-Encoding:" => Some(HeaderName::AcceptEncoding),
            _ => None,
        }
    }
}

/// Headers reconocidos, como record de campos fijos
///
/// No hay mapa genérico: el conjunto de headers es cerrado.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    /// Valor del header `Host`
    pub host: String,

    /// Valor del header `User-Agent`
    pub user_agent: String,

    /// Valor del header `Accept`
    pub accept: String,

    /// Valor del header `Content-Length` (0 si falta o no es numérico)
    pub content_length: usize,

    /// Tokens del header `Accept-Encoding`, separados por coma y sin espacios
    pub accept_encoding: Vec<String>,
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST)
    method: Method,

    /// Path de la petición (ej: "/files/notas.txt")
    path: String,

    /// Versión HTTP (se reenvía tal cual, no se valida)
    version: String,

    /// Headers reconocidos
    headers: RequestHeaders,

    /// Body del request (bytes crudos después de la línea vacía)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío (el peer no mandó nada útil)
    EmptyRequest,

    /// La request line no tiene los tres tokens método/path/versión
    MalformedRequestLine,

    /// No apareció la línea vacía que termina los headers
    TruncatedRequest,

    /// Método HTTP no soportado
    UnsupportedMethod(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::MalformedRequestLine => write!(f, "Malformed request line"),
            ParseError::TruncatedRequest => write!(f, "Truncated request: no header terminator"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes leídos del socket en una sola lectura acotada
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error tipado durante el parsing
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.segment(1), Some("echo"));
    /// assert_eq!(request.segment(2), Some("abc"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Request line: hasta el primer CRLF (o el final del buffer)
        let line_end = find(buffer, b"\r\n").unwrap_or(buffer.len());
        let request_line = std::str::from_utf8(&buffer[..line_end])
            .map_err(|_| ParseError::MalformedRequestLine)?;
        let (method, path, version) = Self::parse_request_line(request_line)?;

        // 2. Headers: hasta la línea vacía. Si el buffer se quedó sin el
        //    terminador \r\n\r\n, el request llegó truncado.
        let blank = find(buffer, b"\r\n\r\n").ok_or(ParseError::TruncatedRequest)?;
        let header_bytes = if blank > line_end {
            &buffer[line_end + 2..blank]
        } else {
            &[][..]
        };
        let headers = Self::parse_headers(&String::from_utf8_lossy(header_bytes));

        // 3. Body: todo lo que sigue a la línea vacía, tal cual
        let body = buffer[blank + 4..].to_vec();

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::MalformedRequestLine);
        }

        let method = Method::from_str(parts[0])?;
        let path = parts[1].to_string();
        let version = parts[2].to_string();

        Ok((method, path, version))
    }

    /// Parsea el bloque de headers a un record de campos fijos
    ///
    /// Cada línea se parte en el primer espacio: el nombre conserva los dos
    /// puntos (`Host:`) y el valor es el resto. Un `Content-Length` que no
    /// sea numérico es un fallo suave: se registra y el campo queda en 0.
    fn parse_headers(section: &str) -> RequestHeaders {
        let mut headers = RequestHeaders::default();

        for line in section.split("\r\n") {
            let (name, value) = match line.split_once(' ') {
                Some(pair) => pair,
                None => continue,
            };

            match HeaderName::from_str(name) {
                Some(HeaderName::Host) => headers.host = value.trim().to_string(),
                Some(HeaderName::UserAgent) => headers.user_agent = value.trim().to_string(),
                Some(HeaderName::Accept) => headers.accept = value.trim().to_string(),
                Some(HeaderName::ContentLength) => match value.trim().parse::<usize>() {
                    Ok(n) => headers.content_length = n,
                    Err(_) => {
                        eprintln!("   ⚠️ Content-Length no numérico: {:?}", value.trim());
                    }
                },
                Some(HeaderName::AcceptEncoding) => {
                    headers.accept_encoding = value
                        .split(',')
                        .map(|token| token.trim().to_string())
                        .filter(|token| !token.is_empty())
                        .collect();
                }
                // Headers no reconocidos se descartan
                None => {}
            }
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el n-ésimo segmento del path separado por '/'
    ///
    /// Para "/echo/abc": segment(1) es "echo" y segment(2) es "abc".
    /// Retorna None si el path no tiene tantos segmentos, para que las rutas
    /// que exigen un segmento fallen de forma tipada y no por índice.
    pub fn segment(&self, n: usize) -> Option<&str> {
        self.path.split('/').nth(n)
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene los headers reconocidos
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Busca la primera ocurrencia de `needle` dentro de `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
