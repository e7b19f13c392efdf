use crate::errors::WizardError;
use crate::payload::IssuancePayload;
use crate::step::StepContext;
use crate::step_kind::StepKind;
use flow::StepDefinition;

/// Trait que representa un paso del asistente.
pub trait WizardStep: Send + Sync {
    /// Tipo del paso; su `as_str()` es el id de la definición.
    fn kind(&self) -> StepKind;

    /// Título y descripción mostrados en el encabezado del diálogo.
    fn definition(&self) -> StepDefinition;

    /// Compuerta del paso. `None` permite avanzar; `Some(motivo)` lo
    /// impide. Debe ser pura sobre el payload.
    fn blocking_reason(&self, _payload: &IssuancePayload) -> Option<String> {
        None
    }

    /// Se ejecuta al llegar al paso con `advance`. Puede derivar datos del
    /// payload usando los colaboradores del contexto. Si falla, la
    /// transición completa se descarta.
    fn on_enter(&self, _ctx: &StepContext, _payload: &mut IssuancePayload) -> Result<(), WizardError> {
        Ok(())
    }
}
