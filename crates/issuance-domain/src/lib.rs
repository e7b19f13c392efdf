//! issuance-domain: valores y colaboradores de la emisión de Smart Docs
//!
//! Define el archivo cargado (`UploadedArtifact`), los campos destino de una
//! plantilla, la asignación de columnas, el resumen de validación y el
//! comprobante de envío, junto con los puertos que el asistente consulta
//! (`TemplateCatalog`, `ColumnDiscovery`, `ValidationPreview`,
//! `IssuanceSubmitter`) y sus implementaciones simuladas.
mod artifact;
pub mod collaborators;
mod domain_stubs;
mod errors;
mod field_mapping;
mod submission;
mod validation_summary;

pub use artifact::{UploadedArtifact, ACCEPTED_EXTENSION, ACCEPTED_MIME};
pub use collaborators::{ColumnDiscovery, InMemoryTemplateCatalog, IssuanceSubmitter, TemplateCatalog, ValidationPreview};
pub use domain_stubs::{DomainStubs, FixedColumnDiscovery, FixedValidationPreview, SimulatedSubmitter, DEFAULT_TEMPLATE_ID};
pub use errors::{DomainError, SubmissionError};
pub use field_mapping::{DestinationField, FieldMapping, TemplateSchema};
pub use submission::{SubmissionReceipt, SubmissionRequest};
pub use validation_summary::{RecordIssue, RecordStatus, ValidationSummary};
