//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea requests a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La clave de ruteo es el par (método, primer segmento del path): una
//! tabla registrada al construir el servidor, no un switch. El contexto
//! con el directorio servido se inyecta aquí y viaja a cada handler.
//!
//! El router también negocia el Content-Encoding de la response y traduce
//! los errores de handler a su status en esta frontera. Si no hay handler
//! para la clave, responde 404 pelado.

use crate::handlers::{HandlerError, HandlerResult, ServerContext};
use crate::http::{encoding, Method, Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el Request y el contexto compartido, y retorna una
/// Response o un error tipado
pub type Handler = fn(&Request, &ServerContext) -> HandlerResult;

/// Router que mapea (método, primer segmento) a handlers
pub struct Router {
    /// Tabla de (método, segmento) → handler
    routes: Vec<(Method, String, Handler)>,

    /// Configuración inyectada que consumen los handlers
    context: ServerContext,
}

impl Router {
    /// Crea un router vacío con su contexto
    pub fn new(context: ServerContext) -> Self {
        Self {
            routes: Vec::new(),
            context,
        }
    }

    /// Registra una ruta con su handler
    ///
    /// El segmento es el primer tramo del path: "" para la raíz, "echo"
    /// para /echo/{texto}, etc.
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::router::Router;
    /// use file_server::handlers::{self, ServerContext};
    /// use file_server::http::Method;
    ///
    /// let mut router = Router::new(ServerContext::new(None));
    /// router.register(Method::Get, "echo", handlers::echo_handler);
    /// ```
    pub fn register(&mut self, method: Method, segment: &str, handler: Handler) {
        self.routes.push((method, segment.to_string(), handler));
    }

    /// Despacha un request al handler apropiado
    ///
    /// Negocia el encoding una sola vez y lo adjunta a la response del
    /// handler (solo surte efecto donde hay headers de contenido). Errores
    /// de handler y rutas desconocidas producen responses peladas con el
    /// status que corresponda.
    pub fn dispatch(&self, request: &Request) -> Response {
        // El path siempre arranca con '/': el primer segmento es el índice 1
        let segment = match request.segment(1) {
            Some(s) => s,
            None => return Response::new(StatusCode::NotFound),
        };

        let negotiated = encoding::negotiate(&request.headers().accept_encoding);

        for (method, route_segment, handler) in &self.routes {
            if *method == request.method() && route_segment == segment {
                return match handler(request, &self.context) {
                    Ok(response) => response.with_encoding(negotiated),
                    Err(e) => self.error_response(request, e),
                };
            }
        }

        Response::new(StatusCode::NotFound)
    }

    /// Traduce un error de handler a una response pelada
    fn error_response(&self, request: &Request, error: HandlerError) -> Response {
        eprintln!(
            "   ❌ {} {} falló: {}",
            request.method().as_str(),
            request.path(),
            error
        );
        Response::new(error.status())
    }
}
