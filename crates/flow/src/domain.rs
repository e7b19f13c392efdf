// Archivo: domain.rs
// Propósito: tipos de dominio del flujo por pasos: la definición inmutable
// de cada paso y la sesión viva (`WizardSession`).
use crate::errors::{FlowError, Result};
use serde::{Deserialize, Serialize};

/// Definición de un paso: identificador estable, título y descripción.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: id.into(),
               title: title.into(),
               description: description.into() }
    }
}

/// Estado vivo de una operación multipaso.
///
/// `current_step` es 1-indexado y siempre queda en `[1, total_steps]`. Las
/// definiciones no cambian durante la vida de la sesión. Las transiciones
/// no mutan la sesión recibida: devuelven una copia actualizada (ver
/// `StepFlowController`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWizardSession<P>", bound(deserialize = "P: Deserialize<'de>"))]
pub struct WizardSession<P> {
    current_step: usize,
    step_definitions: Vec<StepDefinition>,
    pub payload: P,
    is_submitting: bool,
}

/// Forma serializada de `WizardSession`, sin validar.
#[derive(Deserialize)]
struct RawWizardSession<P> {
    current_step: usize,
    step_definitions: Vec<StepDefinition>,
    payload: P,
    #[serde(default)]
    is_submitting: bool,
}

impl<P> TryFrom<RawWizardSession<P>> for WizardSession<P> {
    type Error = FlowError;

    /// Una sesión deserializada cumple las mismas invariantes que una
    /// creada con `initialize`: hay pasos y `current_step` está en rango.
    fn try_from(raw: RawWizardSession<P>) -> Result<Self> {
        if raw.step_definitions.is_empty() {
            return Err(FlowError::EmptyDefinition);
        }
        if raw.current_step == 0 || raw.current_step > raw.step_definitions.len() {
            return Err(FlowError::InvalidTransition(format!("paso {} fuera de [1, {}]",
                                                            raw.current_step,
                                                            raw.step_definitions.len())));
        }
        Ok(Self { current_step: raw.current_step,
                  step_definitions: raw.step_definitions,
                  payload: raw.payload,
                  is_submitting: raw.is_submitting })
    }
}

impl<P> WizardSession<P> where P: Default
{
    /// Crea una sesión en el paso 1, con payload vacío y sin envío en curso.
    /// Falla con `EmptyDefinition` si no hay pasos.
    pub fn initialize(step_definitions: Vec<StepDefinition>) -> Result<Self> {
        if step_definitions.is_empty() {
            return Err(FlowError::EmptyDefinition);
        }
        Ok(Self { current_step: 1,
                  step_definitions,
                  payload: P::default(),
                  is_submitting: false })
    }
}

impl<P> WizardSession<P> {
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.step_definitions.len()
    }

    pub fn step_definitions(&self) -> &[StepDefinition] {
        &self.step_definitions
    }

    /// Definición del paso actual.
    pub fn current_definition(&self) -> &StepDefinition {
        // current_step está acotado por construcción y al deserializar
        &self.step_definitions[self.current_step - 1]
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_terminal_step(&self) -> bool {
        self.current_step == self.total_steps()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub(crate) fn with_step(&self, step: usize) -> Self
        where P: Clone
    {
        let mut next = self.clone();
        next.current_step = step.clamp(1, self.total_steps());
        next
    }

    pub(crate) fn restarted(&self) -> Self
        where P: Default
    {
        Self { current_step: 1,
               step_definitions: self.step_definitions.clone(),
               payload: P::default(),
               is_submitting: false }
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }
}
