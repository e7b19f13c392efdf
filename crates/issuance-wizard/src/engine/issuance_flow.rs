use crate::errors::WizardError;
use crate::payload::{IssuancePayload, IssuanceSession};
use crate::step::{StepContext, WizardStep};
use crate::step_kind::StepKind;
use flow::{FlowError, StepDefinition, StepFlowController};
use issuance_domain::{SubmissionRequest, TemplateSchema, UploadedArtifact};
use log::{debug, warn};
use std::sync::Arc;

/// Motor del asistente de emisión.
///
/// Envuelve un `StepFlowController<IssuancePayload>` cuyas compuertas son
/// las de cada `WizardStep`, y añade lo propio del dominio: ganchos al
/// entrar en un paso, admisión del archivo y la petición de envío. Todas
/// las operaciones son puras: reciben una sesión y devuelven otra.
pub struct IssuanceFlow {
    steps: Vec<Arc<dyn WizardStep>>,
    definitions: Vec<StepDefinition>,
    controller: Arc<StepFlowController<IssuancePayload>>,
    ctx: StepContext,
}

impl IssuanceFlow {
    pub fn new(steps: Vec<Arc<dyn WizardStep>>, ctx: StepContext) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(FlowError::EmptyDefinition.into());
        }
        let definitions: Vec<StepDefinition> = steps.iter().map(|s| s.definition()).collect();
        let mut controller = StepFlowController::<IssuancePayload>::new();
        for step in &steps {
            let gate_step = step.clone();
            let gate = move |payload: &IssuancePayload| gate_step.blocking_reason(payload);
            controller = controller.with_gate(step.kind().as_str(), Arc::new(gate));
        }
        Ok(Self { steps,
                  definitions,
                  controller: Arc::new(controller),
                  ctx })
    }

    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    pub fn controller(&self) -> Arc<StepFlowController<IssuancePayload>> {
        self.controller.clone()
    }

    pub fn template(&self) -> &TemplateSchema {
        &self.ctx.template
    }

    /// Sesión nueva en el paso 1 con payload vacío.
    pub fn initialize(&self) -> Result<IssuanceSession, WizardError> {
        Ok(self.controller.initialize(self.definitions.clone())?)
    }

    /// Tipo del paso actual de `session`.
    pub fn step_kind(&self, session: &IssuanceSession) -> Result<StepKind, WizardError> {
        Ok(self.step_at(session.current_step())?.kind())
    }

    pub fn can_advance(&self, session: &IssuanceSession) -> bool {
        self.controller.can_advance(session)
    }

    pub fn blocking_reason(&self, session: &IssuanceSession) -> Option<String> {
        self.controller.blocking_reason(session)
    }

    /// Avanza un paso y ejecuta el gancho de entrada del paso destino. Si el
    /// gancho falla la sesión original queda intacta.
    pub fn advance(&self, session: &IssuanceSession) -> Result<IssuanceSession, WizardError> {
        let mut next = self.controller.advance(session)?;
        let step = self.step_at(next.current_step())?;
        step.on_enter(&self.ctx, &mut next.payload)?;
        Ok(next)
    }

    pub fn retreat(&self, session: &IssuanceSession) -> Result<IssuanceSession, WizardError> {
        Ok(self.controller.retreat(session)?)
    }

    /// Admite el archivo si es CSV (tipo MIME o extensión). Si no lo es se
    /// rechaza y el payload no cambia.
    pub fn set_artifact(&self, session: &IssuanceSession, artifact: UploadedArtifact) -> Result<IssuanceSession, WizardError> {
        if !artifact.is_csv() {
            warn!("archivo rechazado: {}", artifact);
            return Err(WizardError::UnsupportedArtifactType { name: artifact.name().to_string(),
                                                              declared_type: artifact.declared_type().map(str::to_string) });
        }
        debug!("archivo admitido: {}", artifact);
        Ok(self.controller.update_payload(session, |p| p.replace_artifact(artifact))?)
    }

    pub fn clear_artifact(&self, session: &IssuanceSession) -> Result<IssuanceSession, WizardError> {
        Ok(self.controller.update_payload(session, |p| p.clear_artifact())?)
    }

    /// Sobrescribe la asignación de `field_id`. No valida en escritura: la
    /// compuerta del paso de asignación se evalúa al avanzar.
    pub fn update_mapping(&self, session: &IssuanceSession, field_id: &str, column: &str) -> Result<IssuanceSession, WizardError> {
        Ok(self.controller.update_payload(session, |p| p.mapping.set(field_id, column))?)
    }

    pub fn reset(&self, session: &IssuanceSession) -> IssuanceSession {
        self.controller.reset(session)
    }

    /// Construye la petición de envío. Exige estar en el paso terminal, que
    /// la compuerta de cada paso se cumpla con el payload actual (el archivo
    /// o la asignación pueden haber cambiado después de pasarla) y que haya
    /// un archivo elegido.
    pub fn submission_request(&self, session: &IssuanceSession) -> Result<SubmissionRequest, WizardError> {
        if !session.is_terminal_step() || session.total_steps() != self.steps.len() {
            return Err(WizardError::SubmitPrecondition(format!("paso {} de {} no es el terminal",
                                                               session.current_step(),
                                                               session.total_steps())));
        }
        for step in &self.steps {
            if let Some(reason) = step.blocking_reason(&session.payload) {
                debug!("envío bloqueado por el paso '{}': {}", step.kind(), reason);
                return Err(WizardError::SubmitPrecondition(format!("{}: {}", step.definition().title, reason)));
            }
        }
        let artifact = session.payload
                              .artifact
                              .clone()
                              .ok_or_else(|| WizardError::SubmitPrecondition("no hay archivo elegido".into()))?;
        Ok(SubmissionRequest::new(self.ctx.template.template_id(),
                                  artifact,
                                  session.payload.mapping.clone(),
                                  session.payload.expected_records()))
    }

    fn step_at(&self, step_number: usize) -> Result<&Arc<dyn WizardStep>, WizardError> {
        step_number.checked_sub(1)
                   .and_then(|i| self.steps.get(i))
                   .ok_or_else(|| {
                       FlowError::InvalidTransition(format!("la sesión está en el paso {} y el flujo tiene {}",
                                                            step_number,
                                                            self.steps.len()))
                       .into()
                   })
    }
}
