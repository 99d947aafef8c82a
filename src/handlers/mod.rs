//! # Handlers de Rutas
//! src/handlers/mod.rs
//!
//! Implementación de las rutas del servidor:
//! - GET /: respuesta vacía 200
//! - GET /echo/{texto}: repite el segundo segmento del path
//! - GET /user-agent: repite el header User-Agent
//! - GET /files/{nombre}: lee un archivo del directorio servido
//! - POST /files/{nombre}: escribe un archivo en el directorio servido
//!
//! Los handlers son funciones puras de (Request, ServerContext) a
//! `Result<Response, HandlerError>`. El router traduce cada error a su
//! status en la frontera de despacho; aquí no se escribe al socket.

use crate::http::{Request, Response, StatusCode};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Configuración compartida que reciben los handlers
///
/// Se inyecta al construir el router; no hay estado global de proceso.
/// Es de solo lectura después del arranque, así que compartirla entre
/// threads no necesita sincronización.
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Directorio servido por las rutas /files; None deja esas rutas en 404
    directory: Option<PathBuf>,
}

impl ServerContext {
    /// Crea el contexto con el directorio servido (si se configuró)
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    /// Resuelve el path de un archivo dentro del directorio servido
    ///
    /// Retorna None si no hay directorio configurado o si el nombre intenta
    /// escapar de él. Los segmentos vienen de partir el path en '/', así que
    /// un nombre no puede traer separadores; solo hay que vetar "..".
    fn file_path(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains("..") {
            return None;
        }
        self.directory.as_ref().map(|dir| dir.join(name))
    }
}

/// Errores que puede producir un handler
///
/// Ninguno es fatal: el router los convierte en un status y la conexión
/// responde igual que cualquier otra.
#[derive(Debug)]
pub enum HandlerError {
    /// La ruta exige un segmento de path que el request no trae
    MissingPathSegment,

    /// No se pudo leer el archivo pedido (inexistente, permisos, sin
    /// directorio configurado, nombre que escapa del directorio)
    FileRead(std::io::Error),

    /// No se pudo escribir el archivo destino
    FileWrite(std::io::Error),
}

impl HandlerError {
    /// Status con el que responde cada error en la frontera de despacho
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::MissingPathSegment => StatusCode::NotFound,
            HandlerError::FileRead(_) => StatusCode::NotFound,
            HandlerError::FileWrite(_) => StatusCode::InternalServerError,
        }
    }

    /// Error de lectura sintético para paths que no se pueden resolver
    fn unresolvable(name: &str) -> Self {
        HandlerError::FileRead(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("cannot resolve file {:?} in serve directory", name),
        ))
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerError::MissingPathSegment => write!(f, "Missing path segment"),
            HandlerError::FileRead(e) => write!(f, "File read failed: {}", e),
            HandlerError::FileWrite(e) => write!(f, "File write failed: {}", e),
        }
    }
}

impl std::error::Error for HandlerError {}

/// Resultado de un handler
pub type HandlerResult = Result<Response, HandlerError>;

/// Handler para GET /
///
/// Responde 200 sin headers de contenido ni body.
pub fn root_handler(_req: &Request, _ctx: &ServerContext) -> HandlerResult {
    Ok(Response::new(StatusCode::Ok))
}

/// Handler para GET /echo/{texto}
///
/// El body de la response es el segundo segmento del path, tal cual.
pub fn echo_handler(req: &Request, _ctx: &ServerContext) -> HandlerResult {
    let text = req.segment(2).ok_or(HandlerError::MissingPathSegment)?;

    Ok(Response::new(StatusCode::Ok)
        .with_content_type("text/plain")
        .with_body(text))
}

/// Handler para GET /user-agent
///
/// Repite el valor del header User-Agent del request.
pub fn user_agent_handler(req: &Request, _ctx: &ServerContext) -> HandlerResult {
    Ok(Response::new(StatusCode::Ok)
        .with_content_type("text/plain")
        .with_body(&req.headers().user_agent))
}

/// Handler para GET /files/{nombre}
///
/// Lee el archivo del directorio servido y lo devuelve como octet-stream.
/// Cualquier fallo de lectura colapsa a 404.
pub fn get_file_handler(req: &Request, ctx: &ServerContext) -> HandlerResult {
    let name = req.segment(2).ok_or(HandlerError::MissingPathSegment)?;
    let path = ctx
        .file_path(name)
        .ok_or_else(|| HandlerError::unresolvable(name))?;

    let contents = fs::read(&path).map_err(HandlerError::FileRead)?;

    Ok(Response::new(StatusCode::Ok)
        .with_content_type("application/octet-stream")
        .with_body_bytes(contents))
}

/// Handler para POST /files/{nombre}
///
/// Escribe el body del request en el directorio servido (sobrescribiendo si
/// existe) y responde 201. El contenido escrito se trunca o se rellena con
/// ceros hasta el Content-Length declarado; nunca se lee fuera del body
/// disponible.
pub fn post_file_handler(req: &Request, ctx: &ServerContext) -> HandlerResult {
    let name = req.segment(2).ok_or(HandlerError::MissingPathSegment)?;
    let path = ctx
        .file_path(name)
        .ok_or_else(|| HandlerError::unresolvable(name))?;

    let contents = sized_body(req);
    write_file(&path, &contents).map_err(HandlerError::FileWrite)?;

    Ok(Response::new(StatusCode::Created))
}

/// Ajusta el body disponible al Content-Length declarado
///
/// El buffer de lectura acota lo que pudo llegar, así que un declarado
/// mayor que ese límite se recorta en vez de reservar memoria a ciegas.
fn sized_body(req: &Request) -> Vec<u8> {
    let declared = req
        .headers()
        .content_length
        .min(crate::server::tcp::MAX_REQUEST_BYTES);

    let mut contents = vec![0u8; declared];
    let available = declared.min(req.body().len());
    contents[..available].copy_from_slice(&req.body()[..available]);
    contents
}

/// Escribe un archivo con permisos 0644 (en Unix), sobrescribiendo
fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Request;

    /// Helper: contexto con un directorio único bajo /tmp
    fn temp_context(tag: &str) -> (ServerContext, PathBuf) {
        let dir = std::env::temp_dir().join(format!("file_server_test_{}_{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        (ServerContext::new(Some(dir.clone())), dir)
    }

    fn get(path: &str) -> Request {
        let raw = format!("GET {} HTTP/1.1\r\n\r\n", path);
        Request::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_root_is_bare_ok() {
        let ctx = ServerContext::new(None);
        let response = root_handler(&get("/"), &ctx).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), None);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_echo_returns_segment() {
        let ctx = ServerContext::new(None);
        let response = echo_handler(&get("/echo/abc"), &ctx).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), Some("text/plain"));
        assert_eq!(response.body(), b"abc");
    }

    #[test]
    fn test_echo_missing_segment() {
        let ctx = ServerContext::new(None);
        let result = echo_handler(&get("/echo"), &ctx);

        assert!(matches!(result, Err(HandlerError::MissingPathSegment)));
    }

    #[test]
    fn test_user_agent_echoes_header() {
        let raw = b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1.0\r\n\r\n";
        let req = Request::parse(raw).unwrap();
        let ctx = ServerContext::new(None);

        let response = user_agent_handler(&req, &ctx).unwrap();
        assert_eq!(response.body(), b"test-client/1.0");
    }

    #[test]
    fn test_get_file_reads_contents() {
        let (ctx, dir) = temp_context("get_file");
        fs::write(dir.join("saludo.txt"), b"hola mundo").unwrap();

        let response = get_file_handler(&get("/files/saludo.txt"), &ctx).unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), Some("application/octet-stream"));
        assert_eq!(response.body(), b"hola mundo");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_get_file_missing_is_read_error() {
        let (ctx, dir) = temp_context("get_missing");

        let result = get_file_handler(&get("/files/no_existe.txt"), &ctx);
        assert!(matches!(result, Err(HandlerError::FileRead(_))));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_get_file_without_directory_configured() {
        let ctx = ServerContext::new(None);

        let result = get_file_handler(&get("/files/algo.txt"), &ctx);
        assert!(matches!(result, Err(HandlerError::FileRead(_))));
    }

    #[test]
    fn test_get_file_rejects_path_escape() {
        let (ctx, dir) = temp_context("escape");

        let result = get_file_handler(&get("/files/.."), &ctx);
        assert!(matches!(result, Err(HandlerError::FileRead(_))));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_post_file_writes_body() {
        let (ctx, dir) = temp_context("post_file");
        let raw = b"POST /files/nuevo.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let req = Request::parse(raw).unwrap();

        let response = post_file_handler(&req, &ctx).unwrap();
        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(fs::read(dir.join("nuevo.txt")).unwrap(), b"hello");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_post_file_truncates_to_content_length() {
        let (ctx, dir) = temp_context("post_trunc");
        // Declara 5 pero manda más: solo se escriben 5 bytes
        let raw = b"POST /files/corto.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello-extra";
        let req = Request::parse(raw).unwrap();

        post_file_handler(&req, &ctx).unwrap();
        assert_eq!(fs::read(dir.join("corto.txt")).unwrap(), b"hello");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_post_file_zero_pads_to_content_length() {
        let (ctx, dir) = temp_context("post_pad");
        // Declara 6 pero solo llegan 3 bytes: se rellena con ceros
        let raw = b"POST /files/pad.txt HTTP/1.1\r\nContent-Length: 6\r\n\r\nabc";
        let req = Request::parse(raw).unwrap();

        post_file_handler(&req, &ctx).unwrap();
        assert_eq!(fs::read(dir.join("pad.txt")).unwrap(), b"abc\0\0\0");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_post_file_overwrites_existing() {
        let (ctx, dir) = temp_context("post_overwrite");
        fs::write(dir.join("v.txt"), b"contenido viejo bastante largo").unwrap();

        let raw = b"POST /files/v.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nnuevo";
        let req = Request::parse(raw).unwrap();
        post_file_handler(&req, &ctx).unwrap();

        assert_eq!(fs::read(dir.join("v.txt")).unwrap(), b"nuevo");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_post_file_without_directory_configured() {
        let ctx = ServerContext::new(None);
        let raw = b"POST /files/x.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\na";
        let req = Request::parse(raw).unwrap();

        // Sin directorio configurado la ruta colapsa a "no encontrado"
        let result = post_file_handler(&req, &ctx);
        match result {
            Err(e) => assert_eq!(e.status(), StatusCode::NotFound),
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_post_file_write_failure_maps_to_500() {
        // Escribir dentro de un "directorio" que es un archivo regular
        let (_, dir) = temp_context("post_fail");
        let not_a_dir = dir.join("archivo.txt");
        fs::write(&not_a_dir, b"x").unwrap();
        let ctx = ServerContext::new(Some(not_a_dir));

        let raw = b"POST /files/y.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\na";
        let req = Request::parse(raw).unwrap();
        let result = post_file_handler(&req, &ctx);

        match result {
            Err(e @ HandlerError::FileWrite(_)) => {
                assert_eq!(e.status(), StatusCode::InternalServerError)
            }
            other => panic!("expected FileWrite error, got {:?}", other.map(|r| r.status())),
        }

        fs::remove_dir_all(dir).ok();
    }
}
