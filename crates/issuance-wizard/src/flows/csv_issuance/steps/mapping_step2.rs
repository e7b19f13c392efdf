// mapping_step2.rs
//! Paso 2: asignar columnas del archivo a los campos de la plantilla.
//! Al entrar se descubren las columnas del archivo; para salir hacia
//! adelante todos los campos obligatorios deben tener una columna no vacía.

use crate::errors::WizardError;
use crate::payload::IssuancePayload;
use crate::step::{StepContext, WizardStep};
use crate::step_kind::StepKind;
use flow::StepDefinition;
use issuance_domain::DestinationField;
use log::debug;

#[derive(Debug, Clone)]
pub struct MappingStep2 {
  fields: Vec<DestinationField>,
}

impl MappingStep2 {
  /// `fields` son los campos destino de la plantilla activa.
  pub fn new(fields: Vec<DestinationField>) -> Self {
    Self { fields }
  }
}

impl WizardStep for MappingStep2 {
  fn kind(&self) -> StepKind {
    StepKind::Map
  }

  fn definition(&self) -> StepDefinition {
    StepDefinition::new(StepKind::Map.as_str(), "Map Fields", "Match your file's columns to the template fields")
  }

  fn blocking_reason(&self, payload: &IssuancePayload) -> Option<String> {
    let missing = payload.mapping.unmapped_required(&self.fields);
    if missing.is_empty() {
      return None;
    }
    let ids: Vec<&str> = missing.iter().map(|f| f.id.as_str()).collect();
    Some(format!("Campos obligatorios sin asignar: {}", ids.join(", ")))
  }

  fn on_enter(&self, ctx: &StepContext, payload: &mut IssuancePayload) -> Result<(), WizardError> {
    payload.available_columns = match &payload.artifact {
      Some(artifact) => ctx.columns.discover_columns(artifact)?,
      None => Vec::new(),
    };
    debug!("columnas disponibles: {:?}", payload.available_columns);
    Ok(())
  }
}
