use crate::collaborators::{ColumnDiscovery, InMemoryTemplateCatalog, IssuanceSubmitter, ValidationPreview};
use crate::{
  DestinationField, DomainError, FieldMapping, RecordIssue, RecordStatus, SubmissionError, SubmissionReceipt,
  SubmissionRequest, TemplateSchema, UploadedArtifact, ValidationSummary,
};
use async_trait::async_trait;
use log::info;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Plantilla por defecto del asistente de carga.
pub const DEFAULT_TEMPLATE_ID: &str = "smart-doc-certificate";

/// Columnas que el descubrimiento simulado devuelve cuando el archivo no
/// trae contenido legible.
static SAMPLE_COLUMNS: Lazy<Vec<String>> = Lazy::new(|| {
  ["Full Name", "Email Address", "Course Name", "Completion Date", "Final Grade", "Expiration Date", "Student ID"]
    .iter()
    .map(|c| c.to_string())
    .collect()
});

pub struct DomainStubs;

impl DomainStubs {
  /// Catálogo en memoria con las plantillas de ejemplo.
  pub fn sample_catalog() -> Result<InMemoryTemplateCatalog, DomainError> {
    let catalog = InMemoryTemplateCatalog::new();
    catalog.register(TemplateSchema::new(DEFAULT_TEMPLATE_ID, "Certificate of Completion", Self::certificate_fields())?)?;
    catalog.register(TemplateSchema::new("smart-doc-badge",
                                         "Achievement Badge",
                                         vec![DestinationField::required("recipient_name", "Recipient Name"),
                                              DestinationField::required("recipient_email", "Recipient Email"),
                                              DestinationField::optional("badge_level", "Badge Level")])?)?;
    Ok(catalog)
  }

  pub fn certificate_fields() -> Vec<DestinationField> {
    vec![DestinationField::required("recipient_name", "Recipient Name"),
         DestinationField::required("recipient_email", "Recipient Email"),
         DestinationField::required("credential_title", "Credential Title"),
         DestinationField::required("issue_date", "Issue Date"),
         DestinationField::optional("grade", "Grade"),
         DestinationField::optional("expiry_date", "Expiry Date")]
  }

  pub fn sample_columns() -> Vec<String> {
    SAMPLE_COLUMNS.clone()
  }

  /// Resumen fijo: 250 registros, 3 con advertencias y 2 con errores.
  pub fn sample_summary() -> ValidationSummary {
    let issue = |row: usize, field: &str, status: RecordStatus, message: &str| RecordIssue { row,
                                                                                           field_id: Some(field.to_string()),
                                                                                           status,
                                                                                           message: message.to_string() };
    ValidationSummary::from_issues(250,
                                   vec![issue(12, "grade", RecordStatus::Warning, "Grade fuera de escala"),
                                        issue(47, "expiry_date", RecordStatus::Warning, "Fecha de expiración en el pasado"),
                                        issue(88, "recipient_email", RecordStatus::Warning, "Dominio de correo poco común"),
                                        issue(103, "recipient_email", RecordStatus::Error, "Correo inválido"),
                                        issue(219, "recipient_name", RecordStatus::Error, "Nombre vacío")])
  }
}

/// Descubrimiento simulado: cabecera del archivo si hay contenido, o la
/// lista fija de columnas.
#[derive(Debug, Default, Clone)]
pub struct FixedColumnDiscovery;

impl ColumnDiscovery for FixedColumnDiscovery {
  fn discover_columns(&self, artifact: &UploadedArtifact) -> Result<Vec<String>, DomainError> {
    Ok(artifact.header_columns().unwrap_or_else(DomainStubs::sample_columns))
  }
}

/// Vista previa simulada que siempre devuelve el mismo resumen.
#[derive(Debug, Clone)]
pub struct FixedValidationPreview {
  summary: ValidationSummary,
}

impl FixedValidationPreview {
  pub fn new(summary: ValidationSummary) -> Self {
    Self { summary }
  }
}

impl Default for FixedValidationPreview {
  fn default() -> Self {
    Self::new(DomainStubs::sample_summary())
  }
}

impl ValidationPreview for FixedValidationPreview {
  fn preview(&self, _artifact: &UploadedArtifact, _mapping: &FieldMapping) -> Result<ValidationSummary, DomainError> {
    Ok(self.summary.clone())
  }
}

/// Punto de emisión simulado: espera un retardo fijo y acepta el lote.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
  delay: Duration,
}

impl SimulatedSubmitter {
  pub fn new(delay: Duration) -> Self {
    Self { delay }
  }
}

#[async_trait]
impl IssuanceSubmitter for SimulatedSubmitter {
  async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt, SubmissionError> {
    tokio::time::sleep(self.delay).await;
    let receipt = SubmissionReceipt::new(request.expected_records.unwrap_or(0));
    info!("lote {} aceptado como trabajo {} ({} registros)",
          request.artifact.name(),
          receipt.job_id,
          receipt.accepted_records);
    Ok(receipt)
  }
}
