// field_mapping.rs
use crate::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Campo destino de una plantilla de Smart Doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationField {
  pub id: String,
  pub display_name: String,
  pub required: bool,
}

impl DestinationField {
  pub fn required(id: &str, display_name: &str) -> Self {
    Self { id: id.to_string(), display_name: display_name.to_string(), required: true }
  }

  pub fn optional(id: &str, display_name: &str) -> Self {
    Self { id: id.to_string(), display_name: display_name.to_string(), required: false }
  }
}

/// Esquema de campos destino de una plantilla, en orden de presentación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSchema {
  template_id: String,
  name: String,
  fields: Vec<DestinationField>,
}

impl TemplateSchema {
  pub fn new(template_id: &str, name: &str, fields: Vec<DestinationField>) -> Result<Self, DomainError> {
    if template_id.trim().is_empty() {
      return Err(DomainError::ValidationError("El id de plantilla no puede estar vacío".to_string()));
    }
    let mut seen = HashSet::new();
    for f in &fields {
      if f.id.trim().is_empty() {
        return Err(DomainError::ValidationError("Campo destino con id vacío".to_string()));
      }
      if !seen.insert(f.id.as_str()) {
        return Err(DomainError::ValidationError(format!("Campo destino duplicado: {}", f.id)));
      }
    }
    Ok(Self { template_id: template_id.to_string(), name: name.to_string(), fields })
  }

  pub fn template_id(&self) -> &str {
    &self.template_id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn fields(&self) -> &[DestinationField] {
    &self.fields
  }

  pub fn required_fields(&self) -> impl Iterator<Item = &DestinationField> {
    self.fields.iter().filter(|f| f.required)
  }

  pub fn field(&self, id: &str) -> Option<&DestinationField> {
    self.fields.iter().find(|f| f.id == id)
  }
}

/// Asignación campo destino -> columna origen.
///
/// Conserva el orden de inserción para presentarla de forma estable. No se
/// valida al escribir: la completitud se comprueba al salir del paso.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(IndexMap<String, String>);

impl FieldMapping {
  pub fn new() -> Self {
    Self::default()
  }

  /// Asigna `column` a `field_id`, sobrescribiendo la asignación previa.
  pub fn set(&mut self, field_id: impl Into<String>, column: impl Into<String>) {
    self.0.insert(field_id.into(), column.into());
  }

  pub fn get(&self, field_id: &str) -> Option<&str> {
    self.0.get(field_id).map(String::as_str)
  }

  pub fn remove(&mut self, field_id: &str) -> Option<String> {
    self.0.shift_remove(field_id)
  }

  /// `true` si el campo tiene una columna no vacía.
  pub fn is_mapped(&self, field_id: &str) -> bool {
    self.get(field_id).map_or(false, |c| !c.trim().is_empty())
  }

  /// Campos obligatorios sin columna asignada, en orden del esquema.
  pub fn unmapped_required<'a>(&self, fields: &'a [DestinationField]) -> Vec<&'a DestinationField> {
    fields.iter().filter(|f| f.required && !self.is_mapped(&f.id)).collect()
  }

  pub fn is_complete_for(&self, fields: &[DestinationField]) -> bool {
    self.unmapped_required(fields).is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
