// validation_step3.rs
//! Paso 3: revisar la calidad de los datos antes de emitir.
//! Al entrar se pide la vista previa de validación. La compuerta depende de
//! `ValidationGatePolicy`; con la política permisiva nunca bloquea.

use crate::config::ValidationGatePolicy;
use crate::errors::WizardError;
use crate::payload::IssuancePayload;
use crate::step::{StepContext, WizardStep};
use crate::step_kind::StepKind;
use flow::StepDefinition;
use log::debug;

#[derive(Debug, Clone)]
pub struct ValidationStep3 {
  policy: ValidationGatePolicy,
}

impl ValidationStep3 {
  pub fn new(policy: ValidationGatePolicy) -> Self {
    Self { policy }
  }
}

impl WizardStep for ValidationStep3 {
  fn kind(&self) -> StepKind {
    StepKind::Validate
  }

  fn definition(&self) -> StepDefinition {
    StepDefinition::new(StepKind::Validate.as_str(), "Validate", "Review data quality before issuing")
  }

  fn blocking_reason(&self, payload: &IssuancePayload) -> Option<String> {
    if self.policy == ValidationGatePolicy::Permissive {
      return None;
    }
    let Some(summary) = &payload.summary else {
      return Some("No hay resumen de validación".into());
    };
    if summary.has_blocking_errors() {
      return Some(format!("{} registros con errores", summary.errors));
    }
    if self.policy == ValidationGatePolicy::BlockOnWarnings && summary.has_warnings() {
      return Some(format!("{} registros con advertencias", summary.warnings));
    }
    None
  }

  fn on_enter(&self, ctx: &StepContext, payload: &mut IssuancePayload) -> Result<(), WizardError> {
    payload.summary = match &payload.artifact {
      Some(artifact) => Some(ctx.preview.preview(artifact, &payload.mapping)?),
      None => None,
    };
    if let Some(summary) = &payload.summary {
      debug!("vista previa: {} total, {} válidos, {} advertencias, {} errores",
             summary.total,
             summary.valid,
             summary.warnings,
             summary.errors);
    }
    Ok(())
  }
}
