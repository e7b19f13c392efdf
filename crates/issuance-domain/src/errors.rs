// errors.rs
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("No encontrado: {0}")]
  NotFound(String),
  #[error("Error externo: {0}")]
  ExternalError(String),
}

impl From<std::io::Error> for DomainError {
  fn from(e: std::io::Error) -> Self {
    Self::ExternalError(e.to_string())
  }
}

/// Fallo del envío terminal al punto de emisión. Es el único error que
/// cruza una frontera asíncrona; quien llama decide si reintenta.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
  #[error("Envío rechazado por el servidor: {0}")]
  Rejected(String),
  #[error("Error de red: {0}")]
  Network(String),
  #[error("El envío excedió el tiempo límite de {0:?}")]
  Timeout(Duration),
}
