// config.rs
//! Configuración del asistente leída del entorno (con `.env` opcional).
use crate::errors::WizardError;
use issuance_domain::DEFAULT_TEMPLATE_ID;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_TEMPLATE_ID: &str = "PRUUF_TEMPLATE_ID";
pub const ENV_VALIDATION_GATE: &str = "PRUUF_VALIDATION_GATE";
pub const ENV_SUBMIT_TIMEOUT_MS: &str = "PRUUF_SUBMIT_TIMEOUT_MS";
pub const ENV_SIMULATED_DELAY_MS: &str = "PRUUF_SIMULATED_DELAY_MS";

const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_SIMULATED_DELAY_MS: u64 = 1_500;

/// Qué debe cumplir el resumen de validación para poder confirmar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationGatePolicy {
  /// Siempre se puede avanzar; los errores sólo se informan.
  #[default]
  Permissive,
  /// Bloquea si algún registro tiene errores.
  BlockOnErrors,
  /// Bloquea si hay errores o advertencias.
  BlockOnWarnings,
}

impl fmt::Display for ValidationGatePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ValidationGatePolicy::Permissive => "permissive",
      ValidationGatePolicy::BlockOnErrors => "block_on_errors",
      ValidationGatePolicy::BlockOnWarnings => "block_on_warnings",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for ValidationGatePolicy {
  type Err = WizardError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "permissive" => Ok(ValidationGatePolicy::Permissive),
      "block_on_errors" => Ok(ValidationGatePolicy::BlockOnErrors),
      "block_on_warnings" => Ok(ValidationGatePolicy::BlockOnWarnings),
      other => Err(WizardError::Config(format!("{}: política desconocida '{}'", ENV_VALIDATION_GATE, other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
  pub template_id: String,
  pub validation_gate: ValidationGatePolicy,
  /// Límite de espera del envío terminal.
  pub submit_timeout: Duration,
  /// Retardo del punto de emisión simulado.
  pub simulated_delay: Duration,
}

impl Default for WizardConfig {
  fn default() -> Self {
    Self { template_id: DEFAULT_TEMPLATE_ID.to_string(),
           validation_gate: ValidationGatePolicy::Permissive,
           submit_timeout: Duration::from_millis(DEFAULT_SUBMIT_TIMEOUT_MS),
           simulated_delay: Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS) }
  }
}

impl WizardConfig {
  /// Carga `.env` si existe y lee las variables `PRUUF_*`.
  pub fn from_env() -> Result<Self, WizardError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Igual que `from_env` pero leyendo de `lookup`; las variables ausentes
  /// o vacías toman su valor por defecto.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, WizardError>
    where F: Fn(&str) -> Option<String>
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let defaults = Self::default();

    let template_id = get(ENV_TEMPLATE_ID).unwrap_or(defaults.template_id);
    let validation_gate = match get(ENV_VALIDATION_GATE) {
      Some(v) => v.parse()?,
      None => defaults.validation_gate,
    };
    let submit_timeout = match get(ENV_SUBMIT_TIMEOUT_MS) {
      Some(v) => match parse_millis(ENV_SUBMIT_TIMEOUT_MS, &v)? {
        d if d.is_zero() => return Err(WizardError::Config(format!("{} debe ser mayor que cero", ENV_SUBMIT_TIMEOUT_MS))),
        d => d,
      },
      None => defaults.submit_timeout,
    };
    let simulated_delay = match get(ENV_SIMULATED_DELAY_MS) {
      Some(v) => parse_millis(ENV_SIMULATED_DELAY_MS, &v)?,
      None => defaults.simulated_delay,
    };

    Ok(Self { template_id,
              validation_gate,
              submit_timeout,
              simulated_delay })
  }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, WizardError> {
  let ms: u64 = value.parse()
                     .map_err(|_| WizardError::Config(format!("{}: se esperaban milisegundos, se obtuvo '{}'", key, value)))?;
  Ok(Duration::from_millis(ms))
}
