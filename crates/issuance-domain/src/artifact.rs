// artifact.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// Tipo MIME aceptado en la carga de lotes.
pub const ACCEPTED_MIME: &str = "text/csv";
/// Extensión aceptada cuando el tipo declarado no es concluyente.
pub const ACCEPTED_EXTENSION: &str = ".csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Archivo seleccionado por el usuario en el paso de carga.
///
/// Sólo nombre, tamaño y tipo participan en la admisión. El contenido es
/// opcional y no se serializa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedArtifact {
  name: String,
  size_bytes: u64,
  declared_type: Option<String>,
  #[serde(skip)]
  content: Option<Vec<u8>>,
  selected_at: DateTime<Utc>,
}

impl UploadedArtifact {
  /// Crea la referencia a partir de nombre y tamaño. El tipo se deduce de la
  /// extensión; `with_declared_type` lo sustituye por el que reporte el
  /// cliente.
  pub fn new(name: &str, size_bytes: u64) -> Result<Self, DomainError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(DomainError::ValidationError("El nombre del archivo no puede estar vacío".to_string()));
    }
    let declared_type = mime_guess::from_path(name).first_raw().map(str::to_string);
    Ok(Self { name: name.to_string(), size_bytes, declared_type, content: None, selected_at: Utc::now() })
  }

  /// Lee un archivo del disco (nombre, tamaño y contenido).
  pub fn from_path(path: &Path) -> Result<Self, DomainError> {
    let name = path.file_name()
                   .and_then(|n| n.to_str())
                   .ok_or_else(|| DomainError::ValidationError(format!("Ruta sin nombre de archivo: {}", path.display())))?;
    let bytes = std::fs::read(path)?;
    Ok(Self::new(name, bytes.len() as u64)?.with_content(bytes))
  }

  pub fn with_declared_type(mut self, mime: impl Into<String>) -> Self {
    self.declared_type = Some(mime.into());
    self
  }

  pub fn with_content(mut self, content: Vec<u8>) -> Self {
    self.size_bytes = content.len() as u64;
    self.content = Some(content);
    self
  }

  /// `true` si el tipo declarado es `text/csv` o el nombre termina en `.csv`.
  pub fn is_csv(&self) -> bool {
    let by_type = self.declared_type
                      .as_deref()
                      .and_then(|t| t.split(';').next())
                      .map_or(false, |essence| essence.trim().eq_ignore_ascii_case(ACCEPTED_MIME));
    by_type || self.name.to_lowercase().ends_with(ACCEPTED_EXTENSION)
  }

  /// Columnas de la cabecera del contenido, si hay contenido. Respeta
  /// comillas: `"Name, Full"` es una sola columna.
  pub fn header_columns(&self) -> Option<Vec<String>> {
    let mut reader = self.csv_reader()?;
    let header = reader.headers().ok()?;
    let columns: Vec<String> = header.iter()
                                     .map(|c| c.trim().to_string())
                                     .filter(|c| !c.is_empty())
                                     .collect();
    if columns.is_empty() {
      None
    } else {
      Some(columns)
    }
  }

  /// Número de registros tras la cabecera. Un campo entre comillas con
  /// saltos de línea cuenta como un solo registro y las filas vacías no
  /// cuentan. `None` si no hay contenido o no es CSV legible.
  pub fn record_count(&self) -> Option<usize> {
    let mut reader = self.csv_reader()?;
    let mut count = 0;
    for record in reader.byte_records() {
      let record = record.ok()?;
      if record.iter().any(|field| !field.iter().all(u8::is_ascii_whitespace)) {
        count += 1;
      }
    }
    Some(count)
  }

  fn csv_reader(&self) -> Option<csv::Reader<&[u8]>> {
    let content = self.content.as_deref()?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    Some(csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(content))
  }

  /// Huella SHA-256 de nombre, tamaño y contenido.
  pub fn fingerprint(&self) -> String {
    let mut hasher = Sha256::new();
    hasher.update(self.name.as_bytes());
    hasher.update(self.size_bytes.to_le_bytes());
    if let Some(content) = &self.content {
      hasher.update(content);
    }
    format!("{:x}", hasher.finalize())
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn size_bytes(&self) -> u64 {
    self.size_bytes
  }

  pub fn declared_type(&self) -> Option<&str> {
    self.declared_type.as_deref()
  }

  pub fn content(&self) -> Option<&[u8]> {
    self.content.as_deref()
  }

  pub fn selected_at(&self) -> DateTime<Utc> {
    self.selected_at
  }
}

impl fmt::Display for UploadedArtifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "{} ({} bytes, {})",
           self.name,
           self.size_bytes,
           self.declared_type.as_deref().unwrap_or("tipo desconocido"))
  }
}
