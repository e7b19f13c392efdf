// submission.rs
use crate::{FieldMapping, UploadedArtifact};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Petición de emisión de un lote: plantilla, archivo y asignación.
///
/// `idempotency_key` depende sólo del contenido de la petición, de modo
/// que un reintento tras un timeout no emite el lote dos veces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
  pub template_id: String,
  pub artifact: UploadedArtifact,
  pub mapping: FieldMapping,
  pub expected_records: Option<usize>,
  pub idempotency_key: String,
}

impl SubmissionRequest {
  pub fn new(template_id: &str,
             artifact: UploadedArtifact,
             mapping: FieldMapping,
             expected_records: Option<usize>)
             -> Self {
    let idempotency_key = Self::compute_key(template_id, &artifact, &mapping);
    Self { template_id: template_id.to_string(), artifact, mapping, expected_records, idempotency_key }
  }

  fn compute_key(template_id: &str, artifact: &UploadedArtifact, mapping: &FieldMapping) -> String {
    let mut hasher = Sha256::new();
    hasher.update(template_id.as_bytes());
    hasher.update(artifact.fingerprint().as_bytes());
    // orden canónico, independiente del orden de edición
    let mut pairs: Vec<(&str, &str)> = mapping.iter().collect();
    pairs.sort();
    for (field, column) in pairs {
      hasher.update(field.as_bytes());
      hasher.update([0u8]);
      hasher.update(column.as_bytes());
      hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
  }
}

/// Comprobante de un trabajo de emisión aceptado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
  pub job_id: Uuid,
  pub accepted_records: usize,
  pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
  pub fn new(accepted_records: usize) -> Self {
    Self { job_id: Uuid::new_v4(), accepted_records, submitted_at: Utc::now() }
  }
}
