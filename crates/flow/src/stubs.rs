// Archivo: stubs.rs
// Propósito: implementaciones en memoria para pruebas y wiring rápido.
//
// Incluye un registro de sesiones en memoria (`InMemorySessionRepository`)
// y una compuerta trivial (`OpenGate`). No son durables.
use crate::domain::WizardSession;
use crate::engine::StepGate;
use crate::errors::{FlowError, Result};
use crate::repository::SessionRepository;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Compuerta que nunca bloquea (pasos terminales o informativos).
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGate;

impl<P> StepGate<P> for OpenGate {
    fn blocking_reason(&self, _payload: &P) -> Option<String> {
        None
    }
}

// Registro mínimo en memoria (no durable)
pub struct InMemorySessionRepository<P> {
    /// Sesiones abiertas indexadas por id.
    sessions: Mutex<HashMap<Uuid, WizardSession<P>>>,
}

impl<P> InMemorySessionRepository<P> {
    /// Crea un registro vacío.
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `FlowError::Storage`.
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, WizardSession<P>>>> {
        self.sessions.lock().map_err(|_| FlowError::Storage("mutex poisoned".into()))
    }
}

impl<P> Default for InMemorySessionRepository<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SessionRepository<P> for InMemorySessionRepository<P> where P: Clone + Send
{
    fn create(&self, session: WizardSession<P>) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.lock()?.insert(id, session);
        Ok(id)
    }

    fn get(&self, id: &Uuid) -> Result<WizardSession<P>> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| FlowError::NotFound(format!("sesión {}", id)))
    }

    fn put(&self, id: &Uuid, session: WizardSession<P>) -> Result<()> {
        let mut sessions = self.lock()?;
        let slot = sessions.get_mut(id)
                           .ok_or_else(|| FlowError::NotFound(format!("sesión {}", id)))?;
        *slot = session;
        Ok(())
    }

    fn update<F, E>(&self, id: &Uuid, f: F) -> std::result::Result<WizardSession<P>, E>
        where F: FnOnce(&WizardSession<P>) -> std::result::Result<WizardSession<P>, E>,
              E: From<FlowError>
    {
        // el candado se mantiene durante `f`
        let mut sessions = self.lock()?;
        let slot = sessions.get_mut(id)
                           .ok_or_else(|| FlowError::NotFound(format!("sesión {}", id)))?;
        let next = f(&*slot)?;
        *slot = next.clone();
        Ok(next)
    }

    fn remove(&self, id: &Uuid) -> Result<()> {
        self.lock()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FlowError::NotFound(format!("sesión {}", id)))
    }

    fn exists(&self, id: &Uuid) -> Result<bool> {
        Ok(self.lock()?.contains_key(id))
    }

    fn list_ids(&self) -> Result<Vec<Uuid>> {
        Ok(self.lock()?.keys().copied().collect())
    }
}
