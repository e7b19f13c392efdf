//! Asistente de emisión por CSV: carga, asignación, validación y
//! confirmación, en ese orden.
pub mod steps;

use crate::config::ValidationGatePolicy;
use crate::step::WizardStep;
use issuance_domain::TemplateSchema;
use std::sync::Arc;
use steps::{ConfirmStep4, MappingStep2, UploadStep1, ValidationStep3};

/// Secuencia de pasos del asistente CSV para la plantilla dada.
pub fn csv_issuance_steps(template: &TemplateSchema, policy: ValidationGatePolicy) -> Vec<Arc<dyn WizardStep>> {
  vec![Arc::new(UploadStep1),
       Arc::new(MappingStep2::new(template.fields().to_vec())),
       Arc::new(ValidationStep3::new(policy)),
       Arc::new(ConfirmStep4)]
}
