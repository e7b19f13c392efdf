use thiserror::Error;

// Errores comunes del asistente de emisión.
//
// Este enum centraliza los errores que pueden ocurrir durante el
// asistente: transiciones del flujo (`FlowError`), errores del dominio
// (`DomainError`), rechazo del archivo en la admisión, fallos del envío y
// errores de serialización.
#[derive(Error, Debug)]
pub enum WizardError {
  /// Errores originados por el controlador de pasos / registro de sesiones.
  #[error("Error de flujo: {0}")]
  Flow(#[from] flow::FlowError),

  /// Errores originados por los colaboradores del dominio.
  #[error("Error de dominio: {0}")]
  Domain(#[from] issuance_domain::DomainError),

  /// El archivo elegido no es CSV. Recuperable: elegir otro archivo.
  #[error("Tipo de archivo no admitido: {name} ({})", declared_type.as_deref().unwrap_or("tipo desconocido"))]
  UnsupportedArtifactType { name: String, declared_type: Option<String> },

  /// Fallo del envío terminal. Recuperable: se puede reintentar.
  #[error("Error de envío: {0}")]
  Submission(#[from] issuance_domain::SubmissionError),

  /// Se pidió el envío sin estar en el paso terminal con su compuerta abierta.
  #[error("Envío no permitido: {0}")]
  SubmitPrecondition(String),

  /// Errores de serialización JSON (exportación de sesiones).
  #[error("Error de serialización: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Configuración inválida (variables de entorno).
  #[error("Configuración inválida: {0}")]
  Config(String),
}

impl WizardError {
  /// `true` para `FlowError::InvalidTransition`.
  pub fn is_invalid_transition(&self) -> bool {
    matches!(self, WizardError::Flow(flow::FlowError::InvalidTransition(_)))
  }
}
