// upload_step1.rs
//! Paso 1: elegir el archivo CSV con los registros a emitir.
//! La admisión (tipo MIME / extensión) ocurre en `IssuanceFlow::set_artifact`;
//! aquí sólo se exige que haya un archivo elegido.

use crate::payload::IssuancePayload;
use crate::step::WizardStep;
use crate::step_kind::StepKind;
use flow::StepDefinition;

#[derive(Debug, Default, Clone)]
pub struct UploadStep1;

impl WizardStep for UploadStep1 {
  fn kind(&self) -> StepKind {
    StepKind::Upload
  }

  fn definition(&self) -> StepDefinition {
    StepDefinition::new(StepKind::Upload.as_str(), "Upload CSV", "Select the data file with one row per Smart Doc")
  }

  fn blocking_reason(&self, payload: &IssuancePayload) -> Option<String> {
    if payload.artifact.is_none() {
      return Some("Selecciona un archivo CSV para continuar".into());
    }
    None
  }
}
