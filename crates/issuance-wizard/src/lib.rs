//! issuance-wizard: asistente de emisión de Smart Docs por CSV
//!
//! Concreta el controlador genérico de `flow` en los cuatro pasos del
//! asistente (carga, asignación, validación y confirmación) usando los
//! valores y colaboradores de `issuance_domain`.
//!
//! ```no_run
//! use issuance_domain::UploadedArtifact;
//! use issuance_wizard::{WizardConfig, WizardFactory};
//!
//! # async fn run() -> Result<(), issuance_wizard::WizardError> {
//! let wizard = WizardFactory::wizard_with_stubs(&WizardConfig::default())?;
//! let id = wizard.open()?;
//! wizard.set_artifact(&id, UploadedArtifact::new("recipients.csv", 2048)?)?;
//! wizard.advance(&id)?;
//! for field in ["recipient_name", "recipient_email", "credential_title", "issue_date"] {
//!   wizard.update_mapping(&id, field, field)?;
//! }
//! wizard.advance(&id)?;
//! wizard.advance(&id)?;
//! let receipt = wizard.submit(&id).await?;
//! println!("trabajo {}", receipt.job_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod flows;
pub mod payload;
pub mod step;
pub mod step_kind;
pub mod wizard;

pub use config::{ValidationGatePolicy, WizardConfig};
pub use engine::IssuanceFlow;
pub use errors::WizardError;
pub use factory::{InMemoryIssuanceWizard, WizardFactory};
pub use payload::{IssuancePayload, IssuanceSession};
pub use step::{StepContext, WizardStep};
pub use step_kind::{StepKind, UnknownStepKind};
pub use wizard::IssuanceWizard;
