use flow::stubs::InMemorySessionRepository;
use flow::{FlowError, FlowService, StepDefinition, StepFlowController, StepGate};
use std::sync::Arc;

fn main() -> Result<(), FlowError> {
    // Controlador con una compuerta en el primer paso
    let gate: Arc<dyn StepGate<Vec<String>>> =
        Arc::new(|items: &Vec<String>| if items.is_empty() { Some("lista vacía".to_string()) } else { None });
    let controller = Arc::new(StepFlowController::new().with_gate("collect", gate));
    let repo = Arc::new(InMemorySessionRepository::new());
    let service = FlowService::new(repo, controller);

    let id = service.open(vec![StepDefinition::new("collect", "Recolectar", "añade elementos"),
                               StepDefinition::new("confirm", "Confirmar", "revisa y confirma")])?;
    println!("sesión abierta {}", id);

    // El primer avance falla: la compuerta está cerrada
    if let Err(e) = service.advance(&id) {
        println!("avance rechazado: {}", e);
    }

    service.update(&id, |items| items.push("uno".into()))?;
    let session = service.advance(&id)?;
    println!("paso actual: {} / {}", session.current_step(), session.total_steps());

    service.close(&id)?;
    Ok(())
}
