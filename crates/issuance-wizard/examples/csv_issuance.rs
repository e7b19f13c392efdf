use issuance_domain::UploadedArtifact;
use issuance_wizard::{WizardConfig, WizardError, WizardFactory};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), WizardError> {
    let config = WizardConfig { simulated_delay: Duration::from_millis(200),
                                ..WizardConfig::default() };
    let wizard = WizardFactory::wizard_with_stubs(&config)?;
    let id = wizard.open()?;

    // Un PDF no pasa la admisión
    if let Err(e) = wizard.set_artifact(&id, UploadedArtifact::new("report.pdf", 1024)?) {
        println!("{}", e);
    }

    let csv = b"Full Name,Email Address,Course Name,Completion Date\nAda Lovelace,ada@example.com,Rust 101,2024-05-01\n";
    wizard.set_artifact(&id, UploadedArtifact::new("recipients.csv", 0)?.with_content(csv.to_vec()))?;
    let session = wizard.advance(&id)?;
    println!("columnas: {:?}", session.payload.available_columns);

    for (field, column) in [("recipient_name", "Full Name"),
                            ("recipient_email", "Email Address"),
                            ("credential_title", "Course Name"),
                            ("issue_date", "Completion Date")]
    {
        wizard.update_mapping(&id, field, column)?;
    }
    let session = wizard.advance(&id)?;
    if let Some(summary) = &session.payload.summary {
        println!("{} registros: {} válidos, {} advertencias, {} errores",
                 summary.total, summary.valid, summary.warnings, summary.errors);
    }

    wizard.advance(&id)?;
    let receipt = wizard.submit(&id).await?;
    println!("trabajo {} con {} registros", receipt.job_id, receipt.accepted_records);

    wizard.close(&id)?;
    Ok(())
}
