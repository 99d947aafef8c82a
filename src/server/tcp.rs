//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread: una sola lectura acotada, parse, despacho, una escritura y
//! la conexión se cierra. Sin keep-alive, sin timeouts, sin reintentos.

use crate::config::Config;
use crate::handlers::{self, ServerContext};
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::Router;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Tamaño del buffer de lectura por conexión
///
/// Un request más grande llega truncado: limitación conocida del diseño
/// de una-lectura-por-conexión, no un bug a esconder.
pub const MAX_REQUEST_BYTES: usize = 4096;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor y registra la tabla de rutas
    pub fn new(config: Config) -> Self {
        let context = ServerContext::new(config.directory.clone());

        let mut router = Router::new(context);
        router.register(Method::Get, "", handlers::root_handler);
        router.register(Method::Get, "echo", handlers::echo_handler);
        router.register(Method::Get, "user-agent", handlers::user_agent_handler);
        router.register(Method::Get, "files", handlers::get_file_handler);
        router.register(Method::Post, "files", handlers::post_file_handler);

        Self {
            config,
            router: Arc::new(router),
            listener: None,
        }
    }

    /// Hace bind del listener y retorna la dirección local
    ///
    /// Con puerto 0 el sistema asigna uno efímero; útil en tests.
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Acepta conexiones para siempre, un thread por conexión
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            let addr = self.bind()?;
            println!("[+] Servidor escuchando en {}", addr);
        }
        println!("[*] Modo concurrente: un thread por conexión\n");

        // bind() garantiza que el listener existe en este punto
        let listener = match self.listener.as_ref() {
            Some(l) => l,
            None => unreachable!("listener bound above"),
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    println!("   ✅ Nueva conexión desde: {}", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection_static(stream, router) {
                            eprintln!("   ❌ Error en thread: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión: lee, parsea, despacha y responde
    ///
    /// Un request malformado responde 400 pelado; nada de lo que haga un
    /// cliente tumba el listener ni afecta a otras conexiones.
    fn handle_connection_static(mut stream: TcpStream, router: Arc<Router>) -> std::io::Result<()> {
        let mut buffer = [0u8; MAX_REQUEST_BYTES];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            println!("   ✅ Conexión cerrada sin datos");
            return Ok(());
        }

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                println!("   ✅ {} {}", request.method().as_str(), request.path());
                router.dispatch(&request)
            }
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                Response::new(StatusCode::BadRequest)
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        println!("   ✅ {}\n", response.status());

        Ok(())
    }
}
