use crate::config::WizardConfig;
use crate::engine::IssuanceFlow;
use crate::flows::csv_issuance_steps;
use crate::payload::IssuancePayload;
use crate::step::StepContext;
use crate::wizard::IssuanceWizard;
use crate::WizardError;
use flow::InMemorySessionRepository;
use issuance_domain::{ColumnDiscovery, DomainStubs, FixedColumnDiscovery, FixedValidationPreview, SimulatedSubmitter, TemplateCatalog,
                      ValidationPreview};
use log::info;
use std::sync::Arc;

/// Asistente respaldado por el registro de sesiones en memoria.
pub type InMemoryIssuanceWizard = IssuanceWizard<InMemorySessionRepository<IssuancePayload>>;

/// Fábrica para construir el asistente de emisión por CSV.
///
/// Resuelve la plantilla configurada en el catálogo y arma la secuencia de
/// pasos con la política de validación de `WizardConfig`. Los métodos
/// `*_with_stubs` usan los colaboradores simulados de `issuance-domain`
/// para que el asistente sea utilizable de inmediato en ejemplos y pruebas.
pub struct WizardFactory;

impl WizardFactory {
  /// Motor del asistente CSV contra los colaboradores dados.
  pub fn csv_issuance(config: &WizardConfig,
                      catalog: &dyn TemplateCatalog,
                      columns: Arc<dyn ColumnDiscovery>,
                      preview: Arc<dyn ValidationPreview>)
                      -> Result<IssuanceFlow, WizardError> {
    let template = catalog.template_schema(&config.template_id)?;
    let steps = csv_issuance_steps(&template, config.validation_gate);
    info!("asistente CSV para la plantilla '{}' (validación: {})",
          template.template_id(),
          config.validation_gate);
    IssuanceFlow::new(steps, StepContext::new(template, columns, preview))
  }

  /// Motor del asistente CSV con el catálogo, descubrimiento y vista
  /// previa simulados.
  pub fn flow_with_stubs(config: &WizardConfig) -> Result<IssuanceFlow, WizardError> {
    let catalog = DomainStubs::sample_catalog()?;
    Self::csv_issuance(config,
                       &catalog,
                       Arc::new(FixedColumnDiscovery),
                       Arc::new(FixedValidationPreview::default()))
  }

  /// Asistente completo sobre stubs: registro en memoria y punto de
  /// emisión simulado con el retardo configurado.
  pub fn wizard_with_stubs(config: &WizardConfig) -> Result<InMemoryIssuanceWizard, WizardError> {
    let flow = Self::flow_with_stubs(config)?;
    Ok(IssuanceWizard::new(flow,
                           Arc::new(InMemorySessionRepository::new()),
                           Arc::new(SimulatedSubmitter::new(config.simulated_delay)),
                           config.submit_timeout))
  }
}
