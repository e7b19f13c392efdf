//! Crate `flow`: controlador genérico de flujos por pasos
//!
//! Este crate define los tipos de dominio (`StepDefinition`, `WizardSession`),
//! el controlador `StepFlowController` con compuertas por paso (`StepGate`),
//! el contrato de registro de sesiones `SessionRepository` con una
//! implementación en memoria (`InMemorySessionRepository`) y un servicio
//! `FlowService` que aplica transiciones sobre sesiones direccionadas por id.
//!
//! Diseño resumido:
//! - Cadena lineal de pasos: `advance` (con compuerta) y `retreat` (sin
//!   compuerta), nunca se salta un paso.
//! - Transiciones puras: cada operación recibe una sesión y devuelve otra.
//! - Envío terminal: `FlowService::begin_submission` marca la sesión y la
//!   guarda devuelta la restablece siempre.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::{StepDefinition, StepFlowController};
//! let controller = StepFlowController::<()>::new();
//! let session = controller.initialize(vec![StepDefinition::new("a", "A", ""),
//!                                          StepDefinition::new("b", "B", "")])
//!                         .unwrap();
//! let session = controller.advance(&session).unwrap();
//! assert_eq!(session.current_step(), 2);
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod repository;
pub mod service;
pub mod stubs;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use service::*;
pub use stubs::*;
