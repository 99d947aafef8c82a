//! # Negociación de Content-Encoding
//! src/http/encoding.rs
//!
//! Decide qué encoding aplicar a la response a partir de los tokens del
//! header `Accept-Encoding` del cliente. La tabla de encodings soportados
//! es una lista cerrada: agregar un encoding nuevo es una línea más en la
//! tabla, no otra cadena de comparaciones.

/// Encodings que el servidor sabe producir
///
/// Hoy solo gzip. El orden de la tabla no importa: gana el primer token
/// pedido por el cliente que aparezca aquí.
pub const SUPPORTED_ENCODINGS: &[&str] = &["gzip"];

/// Elige el encoding de la response según las preferencias del cliente
///
/// Recorre los tokens pedidos en orden y retorna el primero soportado.
/// Sin coincidencias (incluida la lista vacía) no se aplica encoding.
///
/// # Ejemplo
/// ```
/// use file_server::http::encoding::negotiate;
///
/// let requested = vec!["deflate".to_string(), "gzip".to_string()];
/// assert_eq!(negotiate(&requested), Some("gzip"));
/// assert_eq!(negotiate(&[]), None);
/// ```
pub fn negotiate(requested: &[String]) -> Option<&'static str> {
    requested.iter().find_map(|token| {
        SUPPORTED_ENCODINGS
            .iter()
            .find(|supported| *supported == token)
            .copied()
    })
}
