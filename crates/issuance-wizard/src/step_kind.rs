use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Enum para identificar los pasos del asistente de carga CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Upload,
    Map,
    Validate,
    Confirm,
}

impl StepKind {
    /// Identificador estable usado como `StepDefinition::id`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Upload => "upload",
            StepKind::Map => "map",
            StepKind::Validate => "validate",
            StepKind::Confirm => "confirm",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Tipo de paso desconocido: {0}")]
pub struct UnknownStepKind(pub String);

impl FromStr for StepKind {
    type Err = UnknownStepKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upload" => Ok(StepKind::Upload),
            "map" => Ok(StepKind::Map),
            "validate" => Ok(StepKind::Validate),
            "confirm" => Ok(StepKind::Confirm),
            other => Err(UnknownStepKind(other.to_string())),
        }
    }
}
