// wizard.rs
//! Fachada del asistente direccionada por id de sesión. Es lo que usa el
//! diálogo anfitrión: abre una sesión, la conduce paso a paso y, en el
//! paso terminal, envía el lote al punto de emisión.
use crate::engine::IssuanceFlow;
use crate::errors::WizardError;
use crate::payload::{IssuancePayload, IssuanceSession};
use crate::step_kind::StepKind;
use flow::{FlowService, SessionRepository};
use issuance_domain::{IssuanceSubmitter, SubmissionError, SubmissionReceipt, UploadedArtifact};
use log::{info, warn};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub struct IssuanceWizard<R>
  where R: SessionRepository<IssuancePayload>
{
  flow: Arc<IssuanceFlow>,
  service: FlowService<IssuancePayload, R>,
  submitter: Arc<dyn IssuanceSubmitter>,
  submit_timeout: Duration,
}

impl<R> IssuanceWizard<R> where R: SessionRepository<IssuancePayload> + 'static
{
  pub fn new(flow: IssuanceFlow, repo: Arc<R>, submitter: Arc<dyn IssuanceSubmitter>, submit_timeout: Duration) -> Self {
    let service = FlowService::new(repo, flow.controller());
    Self { flow: Arc::new(flow),
           service,
           submitter,
           submit_timeout }
  }

  pub fn flow(&self) -> &IssuanceFlow {
    &self.flow
  }

  /// Abre una sesión nueva (el diálogo se abre).
  pub fn open(&self) -> Result<Uuid, WizardError> {
    Ok(self.service.open(self.flow.definitions().to_vec())?)
  }

  pub fn session(&self, id: &Uuid) -> Result<IssuanceSession, WizardError> {
    Ok(self.service.session(id)?)
  }

  pub fn step_kind(&self, id: &Uuid) -> Result<StepKind, WizardError> {
    self.flow.step_kind(&self.session(id)?)
  }

  pub fn can_advance(&self, id: &Uuid) -> Result<bool, WizardError> {
    Ok(self.flow.can_advance(&self.session(id)?))
  }

  pub fn blocking_reason(&self, id: &Uuid) -> Result<Option<String>, WizardError> {
    Ok(self.flow.blocking_reason(&self.session(id)?))
  }

  pub fn advance(&self, id: &Uuid) -> Result<IssuanceSession, WizardError> {
    self.service.apply(id, |s| self.flow.advance(s))
  }

  pub fn retreat(&self, id: &Uuid) -> Result<IssuanceSession, WizardError> {
    self.service.apply(id, |s| self.flow.retreat(s))
  }

  pub fn set_artifact(&self, id: &Uuid, artifact: UploadedArtifact) -> Result<IssuanceSession, WizardError> {
    self.service.apply(id, |s| self.flow.set_artifact(s, artifact))
  }

  pub fn clear_artifact(&self, id: &Uuid) -> Result<IssuanceSession, WizardError> {
    self.service.apply(id, |s| self.flow.clear_artifact(s))
  }

  pub fn update_mapping(&self, id: &Uuid, field_id: &str, column: &str) -> Result<IssuanceSession, WizardError> {
    self.service.apply(id, |s| self.flow.update_mapping(s, field_id, column))
  }

  pub fn reset(&self, id: &Uuid) -> Result<IssuanceSession, WizardError> {
    Ok(self.service.reset(id)?)
  }

  /// Cierra el diálogo. Si hay un envío en curso su resultado se entrega
  /// igualmente a quien lo espera, pero no se escribe en ninguna sesión.
  pub fn close(&self, id: &Uuid) -> Result<(), WizardError> {
    Ok(self.service.close(id)?)
  }

  /// Sesión serializada para entregarla a la interfaz.
  pub fn export(&self, id: &Uuid) -> Result<JsonValue, WizardError> {
    let session = self.session(id)?;
    Ok(serde_json::to_value(&session)?)
  }

  /// Envía el lote. Sólo se permite en el paso terminal y con las
  /// compuertas de todos los pasos cumplidas; durante la llamada `is_submitting` es `true` y vuelve a
  /// `false` antes de devolver el resultado, sea cual sea. No hay
  /// reintento automático: quien llama puede volver a invocar `submit`
  /// con la misma sesión y la misma clave de idempotencia.
  pub async fn submit(&self, id: &Uuid) -> Result<SubmissionReceipt, WizardError> {
    // la comprobación y la marca de envío son una sola operación
    let (guard, request) = self.service.begin_submission_with(id, |s| self.flow.submission_request(s))?;
    info!("sesión {}: enviando {} (clave {})", id, request.artifact.name(), request.idempotency_key);

    let outcome = match tokio::time::timeout(self.submit_timeout, self.submitter.submit(request)).await {
      Ok(result) => result,
      Err(_) => Err(SubmissionError::Timeout(self.submit_timeout)),
    };
    drop(guard);

    match &outcome {
      Ok(receipt) => info!("sesión {}: trabajo {} aceptado ({} registros)", id, receipt.job_id, receipt.accepted_records),
      Err(e) => warn!("sesión {}: envío fallido: {}", id, e),
    }
    Ok(outcome?)
  }
}
