// Archivo: engine.rs
// Propósito: implementar el `StepFlowController`, que conduce una secuencia
// lineal de pasos navegable hacia adelante y hacia atrás.
//
// Nota: el controlador no guarda estado propio de sesión. Cada transición
// recibe una `WizardSession` y devuelve una nueva; quien llama decide dónde
// vive la sesión (ver `FlowService`).
use crate::domain::{StepDefinition, WizardSession};
use crate::errors::{FlowError, Result};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Compuerta de un paso: predicado que debe cumplirse para salir del paso
/// hacia adelante.
///
/// `blocking_reason` devuelve `None` si el paso puede abandonarse, o un
/// mensaje legible explicando qué falta. Debe ser una función pura del
/// payload.
pub trait StepGate<P>: Send + Sync {
    fn blocking_reason(&self, payload: &P) -> Option<String>;

    fn can_leave(&self, payload: &P) -> bool {
        self.blocking_reason(payload).is_none()
    }
}

impl<P, F> StepGate<P> for F where F: Fn(&P) -> Option<String> + Send + Sync
{
    fn blocking_reason(&self, payload: &P) -> Option<String> {
        self(payload)
    }
}

/// Controlador de flujo por pasos.
///
/// Las compuertas se registran por `StepDefinition::id`; un paso sin
/// compuerta registrada se considera siempre abandonable.
pub struct StepFlowController<P> {
    gates: HashMap<String, Arc<dyn StepGate<P>>>,
}

impl<P> Default for StepFlowController<P> {
    fn default() -> Self {
        Self { gates: HashMap::new() }
    }
}

impl<P> StepFlowController<P> where P: Clone + Default
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) la compuerta del paso `step_id`.
    pub fn with_gate(mut self, step_id: impl Into<String>, gate: Arc<dyn StepGate<P>>) -> Self {
        self.gates.insert(step_id.into(), gate);
        self
    }

    /// Crea una sesión nueva para `step_definitions`.
    pub fn initialize(&self, step_definitions: Vec<StepDefinition>) -> Result<WizardSession<P>> {
        WizardSession::initialize(step_definitions)
    }

    /// Motivo por el que el paso actual no puede abandonarse, si existe.
    pub fn blocking_reason(&self, session: &WizardSession<P>) -> Option<String> {
        let step_id = &session.current_definition().id;
        self.gates.get(step_id).and_then(|gate| gate.blocking_reason(&session.payload))
    }

    /// Predicado puro sobre `current_step` y `payload`.
    pub fn can_advance(&self, session: &WizardSession<P>) -> bool {
        self.blocking_reason(session).is_none()
    }

    /// Avanza un paso. Falla con `InvalidTransition` si la compuerta no se
    /// cumple o si ya se está en el paso terminal.
    pub fn advance(&self, session: &WizardSession<P>) -> Result<WizardSession<P>> {
        ensure_idle(session)?;
        if session.is_terminal_step() {
            return Err(FlowError::InvalidTransition(format!("el paso {} es terminal",
                                                            session.current_definition().id)));
        }
        if let Some(reason) = self.blocking_reason(session) {
            debug!("avance bloqueado en '{}': {}", session.current_definition().id, reason);
            return Err(FlowError::InvalidTransition(reason));
        }
        let next = session.with_step(session.current_step() + 1);
        debug!("paso {} -> {}", session.current_step(), next.current_step());
        Ok(next)
    }

    /// Retrocede un paso sin compuerta. En el paso 1 devuelve `AtBoundary`.
    pub fn retreat(&self, session: &WizardSession<P>) -> Result<WizardSession<P>> {
        ensure_idle(session)?;
        if session.is_first_step() {
            return Err(FlowError::AtBoundary("ya se está en el primer paso".into()));
        }
        Ok(session.with_step(session.current_step() - 1))
    }

    /// Aplica `f` sobre una copia del payload. No valida nada: las
    /// compuertas se evalúan de forma diferida en `can_advance`.
    pub fn update_payload<F>(&self, session: &WizardSession<P>, f: F) -> Result<WizardSession<P>>
        where F: FnOnce(&mut P)
    {
        ensure_idle(session)?;
        let mut next = session.clone();
        f(&mut next.payload);
        Ok(next)
    }

    /// Sesión idéntica a la de `initialize` con las mismas definiciones.
    pub fn reset(&self, session: &WizardSession<P>) -> WizardSession<P> {
        session.restarted()
    }
}

fn ensure_idle<P>(session: &WizardSession<P>) -> Result<()> {
    if session.is_submitting() {
        return Err(FlowError::Submitting(format!("paso {}", session.current_definition().id)));
    }
    Ok(())
}
