use issuance_domain::UploadedArtifact;
use issuance_wizard::{InMemoryIssuanceWizard, StepKind, WizardConfig, WizardFactory};
use log::info;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use uuid::Uuid;

/// Menú interactivo que conduce el asistente de emisión de Smart Docs por
/// CSV contra los colaboradores simulados.
///
/// Opciones soportadas:
/// 1) Ver estado de la sesión (JSON)
/// 2) Elegir archivo CSV
/// 3) Quitar archivo
/// 4) Asignar columna a un campo
/// 5) Siguiente paso
/// 6) Paso anterior
/// 7) Emitir (sólo en el paso de confirmación)
/// 8) Reiniciar
/// 9) Salir
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();
    let config = WizardConfig::from_env()?;
    info!("plantilla '{}', validación {}, timeout {:?}",
          config.template_id,
          config.validation_gate,
          config.submit_timeout);
    let wizard = WizardFactory::wizard_with_stubs(&config)?;
    let mut id = wizard.open()?;

    loop {
        print_header(&wizard, &id)?;
        println!("1) Ver estado de la sesión");
        println!("2) Elegir archivo CSV");
        println!("3) Quitar archivo");
        println!("4) Asignar columna a un campo");
        println!("5) Siguiente");
        println!("6) Anterior");
        println!("7) Emitir Smart Docs");
        println!("8) Reiniciar");
        println!("9) Salir");
        let choice = prompt("Elige una opción: ")?;

        match choice.trim() {
            "1" => match wizard.export(&id) {
                Ok(v) => println!("{}", serde_json::to_string_pretty(&v)?),
                Err(e) => eprintln!("Error leyendo la sesión: {}", e),
            },
            "2" => {
                let path = prompt("Ruta del archivo: ")?;
                let artifact = match UploadedArtifact::from_path(Path::new(path.trim())) {
                    Ok(a) => a,
                    Err(e) => { eprintln!("No se pudo leer el archivo: {}", e); continue; }
                };
                match wizard.set_artifact(&id, artifact) {
                    Ok(s) => {
                        if let Some(a) = s.payload.artifact {
                            println!("Archivo elegido: {} a las {}", a, a.selected_at().format("%H:%M:%S"));
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            "3" => {
                if let Err(e) = wizard.clear_artifact(&id) {
                    eprintln!("{}", e);
                }
            }
            "4" => {
                print_mapping(&wizard, &id)?;
                let field = prompt("Campo destino (id): ")?;
                let column = prompt("Columna del archivo (enter para vaciar): ")?;
                if let Err(e) = wizard.update_mapping(&id, field.trim(), column.trim()) {
                    eprintln!("{}", e);
                }
            }
            "5" => {
                if let Err(e) = wizard.advance(&id) {
                    eprintln!("No se puede avanzar: {}", e);
                }
            }
            "6" => {
                if let Err(e) = wizard.retreat(&id) {
                    eprintln!("No se puede retroceder: {}", e);
                }
            }
            "7" => {
                println!("Enviando...");
                match wizard.submit(&id).await {
                    Ok(receipt) => {
                        println!("Trabajo {} aceptado: {} registros ({})",
                                 receipt.job_id, receipt.accepted_records, receipt.submitted_at);
                        // tras confirmar la sesión se descarta
                        wizard.close(&id)?;
                        id = wizard.open()?;
                    }
                    Err(e) => eprintln!("Error al emitir: {}", e),
                }
            }
            "8" => {
                if let Err(e) = wizard.reset(&id) {
                    eprintln!("{}", e);
                }
            }
            "9" => {
                wizard.close(&id)?;
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

fn setup_logging() {
    // RUST_LOG manda; por defecto sólo advertencias para no ensuciar el menú
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn print_header(wizard: &InMemoryIssuanceWizard, id: &Uuid) -> Result<(), Box<dyn Error>> {
    let session = wizard.session(id)?;
    let def = session.current_definition();
    println!("\n== PRUUF Studio: {} ==", wizard.flow().template().name());
    println!("Paso {} de {}: {} ({})", session.current_step(), session.total_steps(), def.title, def.description);
    if let Some(reason) = wizard.blocking_reason(id)? {
        println!("  bloqueado: {}", reason);
    }
    Ok(())
}

fn print_mapping(wizard: &InMemoryIssuanceWizard, id: &Uuid) -> Result<(), Box<dyn Error>> {
    let session = wizard.session(id)?;
    if wizard.step_kind(id)? != StepKind::Map {
        println!("(la asignación se revisa en el paso de asignación)");
    }
    if !session.payload.available_columns.is_empty() {
        println!("Columnas disponibles: {}", session.payload.available_columns.join(", "));
    }
    for field in wizard.flow().template().fields() {
        let marker = if field.required { "*" } else { " " };
        let column = session.payload.mapping.get(&field.id).unwrap_or("-");
        println!("  {}{} ({}) <- {}", marker, field.id, field.display_name, column);
    }
    Ok(())
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
