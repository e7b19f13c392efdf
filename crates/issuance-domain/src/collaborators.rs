use crate::{
  DomainError, FieldMapping, SubmissionError, SubmissionReceipt, SubmissionRequest, TemplateSchema, UploadedArtifact,
  ValidationSummary,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Proveedor del esquema de campos destino de una plantilla.
pub trait TemplateCatalog: Send + Sync {
    /// Devuelve el esquema ordenado de la plantilla o `NotFound`.
    fn template_schema(&self, template_id: &str) -> Result<TemplateSchema, DomainError>;

    /// Ids de plantillas disponibles.
    fn list_templates(&self) -> Result<Vec<String>, DomainError>;
}

/// Servicio de descubrimiento de columnas de un archivo cargado.
pub trait ColumnDiscovery: Send + Sync {
    fn discover_columns(&self, artifact: &UploadedArtifact) -> Result<Vec<String>, DomainError>;
}

/// Servicio de vista previa: estado por registro y conteos agregados.
pub trait ValidationPreview: Send + Sync {
    fn preview(&self, artifact: &UploadedArtifact, mapping: &FieldMapping) -> Result<ValidationSummary, DomainError>;
}

/// Punto de emisión: acepta el lote y devuelve un id de trabajo.
///
/// Es la única frontera asíncrona del asistente; puede fallar.
#[async_trait]
pub trait IssuanceSubmitter: Send + Sync {
    async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Catálogo en memoria para tests y desarrollo.
pub struct InMemoryTemplateCatalog {
    templates: Arc<Mutex<HashMap<String, TemplateSchema>>>,
}

impl InMemoryTemplateCatalog {
    pub fn new() -> Self {
        Self { templates: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Registra (o reemplaza) una plantilla.
    pub fn register(&self, schema: TemplateSchema) -> Result<(), DomainError> {
        let mut map = self.templates
                          .lock()
                          .map_err(|_| DomainError::ExternalError("mutex poisoned".into()))?;
        map.insert(schema.template_id().to_string(), schema);
        Ok(())
    }
}

impl Default for InMemoryTemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn template_schema(&self, template_id: &str) -> Result<TemplateSchema, DomainError> {
        let map = self.templates
                      .lock()
                      .map_err(|_| DomainError::ExternalError("mutex poisoned".into()))?;
        map.get(template_id)
           .cloned()
           .ok_or_else(|| DomainError::NotFound(format!("plantilla {}", template_id)))
    }

    fn list_templates(&self) -> Result<Vec<String>, DomainError> {
        let map = self.templates
                      .lock()
                      .map_err(|_| DomainError::ExternalError("mutex poisoned".into()))?;
        let mut ids: Vec<String> = map.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
