// validation_summary.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de un registro tras la vista previa de validación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
  Valid,
  Warning,
  Error,
}

impl fmt::Display for RecordStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      RecordStatus::Valid => "valid",
      RecordStatus::Warning => "warning",
      RecordStatus::Error => "error",
    };
    write!(f, "{}", s)
  }
}

/// Observación sobre un registro concreto (fila 1-indexada sin cabecera).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIssue {
  pub row: usize,
  pub field_id: Option<String>,
  pub status: RecordStatus,
  pub message: String,
}

/// Resumen agregado de la vista previa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
  pub total: usize,
  pub valid: usize,
  pub warnings: usize,
  pub errors: usize,
  pub issues: Vec<RecordIssue>,
}

impl ValidationSummary {
  /// Construye el resumen a partir del total y de las observaciones; los
  /// registros sin observación cuentan como válidos.
  pub fn from_issues(total: usize, issues: Vec<RecordIssue>) -> Self {
    let mut warning_rows = std::collections::BTreeSet::new();
    let mut error_rows = std::collections::BTreeSet::new();
    for issue in &issues {
      match issue.status {
        RecordStatus::Error => {
          error_rows.insert(issue.row);
        }
        RecordStatus::Warning => {
          warning_rows.insert(issue.row);
        }
        RecordStatus::Valid => {}
      }
    }
    // una fila con error no cuenta además como advertencia
    let warnings = warning_rows.difference(&error_rows).count();
    let errors = error_rows.len();
    let valid = total.saturating_sub(warnings + errors);
    Self { total, valid, warnings, errors, issues }
  }

  pub fn has_blocking_errors(&self) -> bool {
    self.errors > 0
  }

  pub fn has_warnings(&self) -> bool {
    self.warnings > 0
  }

  /// Registros que el envío acepta: válidos y con advertencias.
  pub fn accepted_records(&self) -> usize {
    self.valid + self.warnings
  }
}
