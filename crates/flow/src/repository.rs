// Archivo: repository.rs
// Propósito: definir el trait `SessionRepository`, el contrato del registro
// donde viven las sesiones abiertas mientras dura su diálogo.
use crate::domain::WizardSession;
use crate::errors::{FlowError, Result};
use uuid::Uuid;

/// Contrato mínimo del registro de sesiones.
///
/// No hay durabilidad: una sesión existe desde que su diálogo se abre hasta
/// que se cierra (`remove`). No se guardan borradores.
pub trait SessionRepository<P>: Send + Sync {
    /// Registra una sesión nueva y devuelve el id generado.
    fn create(&self, session: WizardSession<P>) -> Result<Uuid>;

    /// Devuelve una copia de la sesión. `NotFound` si no existe.
    fn get(&self, id: &Uuid) -> Result<WizardSession<P>>;

    /// Sustituye la sesión existente. `NotFound` si fue cerrada.
    fn put(&self, id: &Uuid, session: WizardSession<P>) -> Result<()>;

    /// Lee, transforma y guarda la sesión como una sola operación: nadie
    /// más puede leerla ni escribirla mientras corre `f`. Si `f` falla la
    /// sesión guardada no cambia.
    fn update<F, E>(&self, id: &Uuid, f: F) -> std::result::Result<WizardSession<P>, E>
        where F: FnOnce(&WizardSession<P>) -> std::result::Result<WizardSession<P>, E>,
              E: From<FlowError>;

    /// Descarta la sesión. `NotFound` si no existe.
    fn remove(&self, id: &Uuid) -> Result<()>;

    /// Verifica si existe una sesión con el id dado.
    fn exists(&self, id: &Uuid) -> Result<bool>;

    /// Ids de las sesiones abiertas.
    fn list_ids(&self) -> Result<Vec<Uuid>>;
}
