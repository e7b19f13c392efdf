// Archivo: errors.rs
// Propósito: definir los errores del controlador de pasos y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;
/// Errores comunes del dominio de flujos por pasos.
///
/// - `InvalidTransition`: avance sin cumplir la compuerta del paso o más allá
///   del paso terminal.
/// - `AtBoundary`: retroceso pedido estando en el primer paso.
/// - `Submitting`: la sesión tiene un envío en curso y no admite cambios.
/// - `EmptyDefinition`: se intentó inicializar sin definiciones de pasos.
/// - `NotFound`: sesión no encontrada.
/// - `Storage`: error al acceder al almacenamiento de sesiones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
  /// Transición no permitida por la compuerta o por los límites del flujo.
  #[error("Transición inválida: {0}")]
  InvalidTransition(String),
  /// Ya se está en el primer paso.
  #[error("Límite alcanzado: {0}")]
  AtBoundary(String),
  /// Envío terminal en curso: navegación y edición deshabilitadas.
  #[error("Envío en curso: {0}")]
  Submitting(String),
  /// La secuencia de definiciones de pasos está vacía.
  #[error("La definición del flujo no contiene pasos")]
  EmptyDefinition,
  /// Entidad no encontrada (por ejemplo, sesión cerrada).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// Error genérico de almacenamiento.
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
}
/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;
