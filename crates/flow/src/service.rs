// Archivo: service.rs
// Propósito: implementar `FlowService`, la capa orquestadora que expone las
// transiciones del controlador sobre sesiones direccionadas por id. Es la
// capa que invoca el diálogo anfitrión.
use crate::domain::{StepDefinition, WizardSession};
use crate::engine::StepFlowController;
use crate::errors::{FlowError, Result};
use crate::repository::SessionRepository;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Servicio de alto nivel sobre sesiones abiertas.
///
/// Orquesta el registro y el controlador: lee la sesión, aplica una
/// transición pura y guarda el resultado.
pub struct FlowService<P, R> where R: SessionRepository<P>
{
    repo: Arc<R>,
    controller: Arc<StepFlowController<P>>,
}

impl<P, R> Clone for FlowService<P, R> where R: SessionRepository<P>
{
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone(),
               controller: self.controller.clone() }
    }
}

impl<P, R> FlowService<P, R>
    where P: Clone + Default,
          R: SessionRepository<P> + 'static
{
    pub fn new(repo: Arc<R>, controller: Arc<StepFlowController<P>>) -> Self {
        Self { repo, controller }
    }

    pub fn controller(&self) -> &StepFlowController<P> {
        &self.controller
    }

    /// Abre una sesión nueva (el diálogo se abre).
    pub fn open(&self, step_definitions: Vec<StepDefinition>) -> Result<Uuid> {
        let session = self.controller.initialize(step_definitions)?;
        let id = self.repo.create(session)?;
        info!("sesión {} abierta", id);
        Ok(id)
    }

    pub fn session(&self, id: &Uuid) -> Result<WizardSession<P>> {
        self.repo.get(id)
    }

    pub fn can_advance(&self, id: &Uuid) -> Result<bool> {
        Ok(self.controller.can_advance(&self.repo.get(id)?))
    }

    /// Aplica `f` a la sesión guardada y persiste el resultado de forma
    /// atómica. Si `f` falla la sesión guardada no cambia.
    pub fn apply<F, E>(&self, id: &Uuid, f: F) -> std::result::Result<WizardSession<P>, E>
        where F: FnOnce(&WizardSession<P>) -> std::result::Result<WizardSession<P>, E>,
              E: From<FlowError>
    {
        self.repo.update(id, f)
    }

    pub fn advance(&self, id: &Uuid) -> Result<WizardSession<P>> {
        self.apply(id, |s| self.controller.advance(s))
    }

    pub fn retreat(&self, id: &Uuid) -> Result<WizardSession<P>> {
        self.apply(id, |s| self.controller.retreat(s))
    }

    pub fn update<F>(&self, id: &Uuid, f: F) -> Result<WizardSession<P>>
        where F: FnOnce(&mut P)
    {
        self.apply(id, |s| self.controller.update_payload(s, f))
    }

    /// Reinicia la sesión a su estado inicial. No se permite durante un envío.
    pub fn reset(&self, id: &Uuid) -> Result<WizardSession<P>> {
        self.apply(id, |s| {
                if s.is_submitting() {
                    return Err(FlowError::Submitting("reset".into()));
                }
                Ok(self.controller.reset(s))
            })
    }

    /// Cierra el diálogo y descarta la sesión. Se permite aunque haya un
    /// envío en curso; su resultado ya no se escribe en la sesión.
    pub fn close(&self, id: &Uuid) -> Result<()> {
        let session = self.repo.get(id)?;
        if session.is_submitting() {
            warn!("sesión {} cerrada con un envío en curso", id);
        }
        self.repo.remove(id)?;
        info!("sesión {} cerrada", id);
        Ok(())
    }

    /// Marca la sesión como enviando y devuelve una guarda que restablece
    /// `is_submitting = false` al soltarse, ocurra lo que ocurra con el envío.
    pub fn begin_submission(&self, id: &Uuid) -> Result<SubmissionGuard<P, R>> {
        let (guard, ()) = self.begin_submission_with(id, |_| Ok::<(), FlowError>(()))?;
        Ok(guard)
    }

    /// Como `begin_submission`, pero antes de marcar la sesión ejecuta
    /// `check` sobre ella dentro de la misma operación atómica. Si `check`
    /// falla la sesión no se marca. Devuelve la guarda y el valor de `check`.
    pub fn begin_submission_with<T, F, E>(&self, id: &Uuid, check: F) -> std::result::Result<(SubmissionGuard<P, R>, T), E>
        where F: FnOnce(&WizardSession<P>) -> std::result::Result<T, E>,
              E: From<FlowError>
    {
        let mut checked = None;
        self.repo.update::<_, E>(id, |s| {
                     if s.is_submitting() {
                         return Err(FlowError::Submitting("ya hay un envío en curso".into()).into());
                     }
                     checked = Some(check(s)?);
                     let mut next = s.clone();
                     next.set_submitting(true);
                     Ok(next)
                 })?;
        debug!("sesión {}: envío iniciado", id);
        let guard = SubmissionGuard { repo: self.repo.clone(),
                                      id: *id,
                                      _payload: std::marker::PhantomData };
        let value = checked.ok_or_else(|| FlowError::Storage("comprobación de envío no ejecutada".into()))?;
        Ok((guard, value))
    }
}

/// Guarda RAII de un envío en curso.
pub struct SubmissionGuard<P, R>
    where P: Clone,
          R: SessionRepository<P>
{
    repo: Arc<R>,
    id: Uuid,
    _payload: std::marker::PhantomData<fn() -> P>,
}

impl<P, R> Drop for SubmissionGuard<P, R>
    where P: Clone,
          R: SessionRepository<P>
{
    fn drop(&mut self) {
        let restored = self.repo.update(&self.id, |session| {
                                    let mut next = session.clone();
                                    next.set_submitting(false);
                                    Ok::<_, FlowError>(next)
                                });
        match restored {
            Ok(_) => debug!("sesión {}: envío finalizado", self.id),
            Err(FlowError::NotFound(_)) => {
                warn!("sesión {} cerrada durante el envío; el resultado no se guarda", self.id)
            }
            Err(e) => warn!("sesión {}: no se pudo restablecer el envío: {}", self.id, e),
        }
    }
}
