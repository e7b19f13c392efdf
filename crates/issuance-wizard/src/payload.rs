use flow::WizardSession;
use issuance_domain::{FieldMapping, UploadedArtifact, ValidationSummary};
use serde::{Deserialize, Serialize};

/// Datos acumulados por el asistente a lo largo de los pasos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuancePayload {
  /// Archivo elegido en el paso de carga.
  pub artifact: Option<UploadedArtifact>,
  /// Columnas descubiertas al entrar al paso de asignación.
  pub available_columns: Vec<String>,
  /// Asignación campo destino -> columna origen.
  pub mapping: FieldMapping,
  /// Resumen derivado al entrar al paso de validación.
  pub summary: Option<ValidationSummary>,
}

/// Sesión del asistente de emisión.
pub type IssuanceSession = WizardSession<IssuancePayload>;

impl IssuancePayload {
  /// Sustituye el archivo. Las columnas y el resumen dependen del archivo y
  /// se descartan; la asignación del usuario se conserva.
  pub fn replace_artifact(&mut self, artifact: UploadedArtifact) {
    self.artifact = Some(artifact);
    self.clear_derived();
  }

  pub fn clear_artifact(&mut self) {
    self.artifact = None;
    self.clear_derived();
  }

  fn clear_derived(&mut self) {
    self.available_columns.clear();
    self.summary = None;
  }

  /// Registros que se espera emitir: los aceptados por la vista previa o,
  /// sin vista previa, los que cuente el propio archivo.
  pub fn expected_records(&self) -> Option<usize> {
    self.summary
        .as_ref()
        .map(|s| s.accepted_records())
        .or_else(|| self.artifact.as_ref().and_then(|a| a.record_count()))
  }
}
