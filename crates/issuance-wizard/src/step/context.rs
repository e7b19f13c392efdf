use issuance_domain::{ColumnDiscovery, TemplateSchema, ValidationPreview};
use std::sync::Arc;

/// Contexto pasado a los pasos al entrar en ellos.
///
/// Reúne la plantilla activa y los colaboradores que derivan datos del
/// archivo (columnas, vista previa de validación). Las compuertas no lo
/// reciben: sólo leen el payload.
#[derive(Clone)]
pub struct StepContext {
  /// Plantilla de Smart Doc contra la que se asignan las columnas.
  pub template: TemplateSchema,
  /// Descubre las columnas del archivo al entrar al paso de asignación.
  pub columns: Arc<dyn ColumnDiscovery>,
  /// Calcula el resumen al entrar al paso de validación.
  pub preview: Arc<dyn ValidationPreview>,
}

impl StepContext {
  pub fn new(template: TemplateSchema, columns: Arc<dyn ColumnDiscovery>, preview: Arc<dyn ValidationPreview>) -> Self {
    Self { template, columns, preview }
  }
}
