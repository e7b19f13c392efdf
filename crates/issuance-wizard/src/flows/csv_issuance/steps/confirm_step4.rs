// confirm_step4.rs
//! Paso 4 (terminal): confirmar y emitir. El envío lo hace
//! `IssuanceWizard::submit`.

use crate::step::WizardStep;
use crate::step_kind::StepKind;
use flow::StepDefinition;

#[derive(Debug, Default, Clone)]
pub struct ConfirmStep4;

impl WizardStep for ConfirmStep4 {
  fn kind(&self) -> StepKind {
    StepKind::Confirm
  }

  fn definition(&self) -> StepDefinition {
    StepDefinition::new(StepKind::Confirm.as_str(), "Confirm", "Issue the Smart Docs")
  }
}
