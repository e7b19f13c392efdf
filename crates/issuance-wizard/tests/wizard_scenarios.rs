use flow::FlowError;
use issuance_domain::{
  DestinationField, DomainStubs, FixedColumnDiscovery, FixedValidationPreview, InMemoryTemplateCatalog, RecordIssue,
  RecordStatus, TemplateSchema, UploadedArtifact, ValidationSummary,
};
use issuance_wizard::{IssuanceFlow, IssuanceSession, StepKind, ValidationGatePolicy, WizardConfig, WizardError, WizardFactory};
use std::sync::Arc;

fn scenario_fields() -> Vec<DestinationField> {
  vec![DestinationField::required("recipient_name", "Recipient Name"), DestinationField::optional("grade", "Grade")]
}

fn flow_with(policy: ValidationGatePolicy, preview: FixedValidationPreview) -> IssuanceFlow {
  let catalog = InMemoryTemplateCatalog::new();
  catalog.register(TemplateSchema::new("test-template", "Test", scenario_fields()).unwrap()).unwrap();
  let config = WizardConfig { template_id: "test-template".into(),
                              validation_gate: policy,
                              ..WizardConfig::default() };
  WizardFactory::csv_issuance(&config, &catalog, Arc::new(FixedColumnDiscovery), Arc::new(preview)).unwrap()
}

fn permissive_flow() -> IssuanceFlow {
  flow_with(ValidationGatePolicy::Permissive, FixedValidationPreview::default())
}

fn csv(name: &str) -> UploadedArtifact {
  UploadedArtifact::new(name, 120).unwrap()
}

/// Sesión en el paso de validación con archivo y asignación completos.
fn at_validation(flow: &IssuanceFlow) -> IssuanceSession {
  let s = flow.initialize().unwrap();
  let s = flow.set_artifact(&s, csv("data.csv")).unwrap();
  let s = flow.advance(&s).unwrap();
  let s = flow.update_mapping(&s, "recipient_name", "Full Name").unwrap();
  flow.advance(&s).unwrap()
}

#[test]
fn scenario_a_cannot_leave_upload_without_artifact() {
  let flow = permissive_flow();
  let s = flow.initialize().unwrap();
  assert_eq!(s.current_step(), 1);
  assert_eq!(s.total_steps(), 4);
  assert_eq!(flow.step_kind(&s).unwrap(), StepKind::Upload);
  assert!(!flow.can_advance(&s));

  let err = flow.advance(&s).unwrap_err();
  assert!(err.is_invalid_transition());
  assert_eq!(s.current_step(), 1);
}

#[test]
fn scenario_b_csv_artifact_opens_upload_gate() {
  let flow = permissive_flow();
  let s = flow.set_artifact(&flow.initialize().unwrap(), csv("data.csv")).unwrap();
  assert!(flow.can_advance(&s));
  let s = flow.advance(&s).unwrap();
  assert_eq!(s.current_step(), 2);
  assert_eq!(flow.step_kind(&s).unwrap(), StepKind::Map);
  // sin contenido el descubrimiento simulado devuelve las columnas de ejemplo
  assert_eq!(s.payload.available_columns, DomainStubs::sample_columns());
}

#[test]
fn scenario_c_required_field_gates_mapping_step() {
  let flow = permissive_flow();
  let s = flow.set_artifact(&flow.initialize().unwrap(), csv("data.csv")).unwrap();
  let s = flow.advance(&s).unwrap();
  assert!(s.payload.mapping.is_empty());

  match flow.advance(&s) {
    Err(WizardError::Flow(FlowError::InvalidTransition(reason))) => assert!(reason.contains("recipient_name")),
    other => panic!("se esperaba InvalidTransition, se obtuvo {:?}", other),
  }

  let s = flow.update_mapping(&s, "recipient_name", "Full Name").unwrap();
  let s = flow.advance(&s).unwrap();
  assert_eq!(s.current_step(), 3);
}

#[test]
fn scenario_d_non_csv_artifact_is_rejected_and_left_unset() {
  let flow = permissive_flow();
  let s = flow.initialize().unwrap();
  match flow.set_artifact(&s, csv("report.pdf")) {
    Err(WizardError::UnsupportedArtifactType { name, declared_type }) => {
      assert_eq!(name, "report.pdf");
      assert_eq!(declared_type.as_deref(), Some("application/pdf"));
    }
    other => panic!("se esperaba UnsupportedArtifactType, se obtuvo {:?}", other),
  }
  assert!(s.payload.artifact.is_none());
  assert!(!flow.can_advance(&s));
}

#[test]
fn declared_csv_type_is_accepted_without_extension() {
  let flow = permissive_flow();
  let artifact = UploadedArtifact::new("export", 64).unwrap().with_declared_type("text/csv");
  let s = flow.set_artifact(&flow.initialize().unwrap(), artifact).unwrap();
  assert!(flow.can_advance(&s));
}

#[test]
fn entering_map_discovers_header_columns() {
  let flow = permissive_flow();
  let artifact = csv("people.csv").with_content(b"Full Name,Email\nAda,ada@example.com\n".to_vec());
  let s = flow.set_artifact(&flow.initialize().unwrap(), artifact).unwrap();
  let s = flow.advance(&s).unwrap();
  assert_eq!(s.payload.available_columns, vec!["Full Name".to_string(), "Email".to_string()]);
}

#[test]
fn replacing_artifact_clears_derived_data_but_keeps_mapping() {
  let flow = permissive_flow();
  let s = at_validation(&flow);
  assert!(s.payload.summary.is_some());
  assert!(!s.payload.available_columns.is_empty());

  let s = flow.set_artifact(&s, csv("other.csv")).unwrap();
  assert_eq!(s.payload.artifact.as_ref().map(|a| a.name()), Some("other.csv"));
  assert!(s.payload.summary.is_none());
  assert!(s.payload.available_columns.is_empty());
  assert_eq!(s.payload.mapping.get("recipient_name"), Some("Full Name"));

  let s = flow.clear_artifact(&s).unwrap();
  assert!(s.payload.artifact.is_none());
  assert_eq!(s.payload.mapping.len(), 1);
}

#[test]
fn entering_validate_fills_summary_and_permissive_gate_allows_errors() {
  let flow = permissive_flow();
  let s = at_validation(&flow);
  assert_eq!(flow.step_kind(&s).unwrap(), StepKind::Validate);
  let summary = s.payload.summary.clone().unwrap();
  assert_eq!(summary, DomainStubs::sample_summary());
  assert!(summary.has_blocking_errors());
  assert!(flow.can_advance(&s));
  let s = flow.advance(&s).unwrap();
  assert!(s.is_terminal_step());
}

#[test]
fn blocking_policies_consult_summary() {
  let flow = flow_with(ValidationGatePolicy::BlockOnErrors, FixedValidationPreview::default());
  let s = at_validation(&flow);
  assert!(!flow.can_advance(&s));
  assert!(flow.blocking_reason(&s).unwrap().contains("errores"));

  let warnings_only = ValidationSummary::from_issues(10,
                                                     vec![RecordIssue { row: 3,
                                                                        field_id: Some("grade".into()),
                                                                        status: RecordStatus::Warning,
                                                                        message: "fuera de escala".into() }]);
  let flow = flow_with(ValidationGatePolicy::BlockOnErrors, FixedValidationPreview::new(warnings_only.clone()));
  assert!(flow.can_advance(&at_validation(&flow)));

  let flow = flow_with(ValidationGatePolicy::BlockOnWarnings, FixedValidationPreview::new(warnings_only));
  let s = at_validation(&flow);
  assert!(!flow.can_advance(&s));
  assert!(flow.blocking_reason(&s).unwrap().contains("advertencias"));
}

#[test]
fn blocking_policy_without_summary_blocks() {
  let flow = flow_with(ValidationGatePolicy::BlockOnErrors, FixedValidationPreview::default());
  let s = at_validation(&flow);
  let s = flow.clear_artifact(&s).unwrap();
  assert!(s.payload.summary.is_none());
  assert!(!flow.can_advance(&s));
}

#[test]
fn retreat_at_first_step_reports_boundary() {
  let flow = permissive_flow();
  let s = flow.initialize().unwrap();
  assert!(matches!(flow.retreat(&s), Err(WizardError::Flow(FlowError::AtBoundary(_)))));
}

#[test]
fn retreat_is_ungated_and_retreat_then_advance_is_idempotent() {
  let flow = permissive_flow();
  let s = at_validation(&flow);
  let back = flow.retreat(&s).unwrap();
  assert_eq!(back.current_step(), 2);
  assert_eq!(back.payload, s.payload);

  // compuerta de asignación cerrada: retroceder sigue permitido
  let unmapped = flow.update_mapping(&back, "recipient_name", "").unwrap();
  assert!(!flow.can_advance(&unmapped));
  assert_eq!(flow.retreat(&unmapped).unwrap().current_step(), 1);

  let again = flow.advance(&back).unwrap();
  assert_eq!(again, s);
}

#[test]
fn advance_past_terminal_step_is_invalid() {
  let flow = permissive_flow();
  let s = flow.advance(&at_validation(&flow)).unwrap();
  assert_eq!(flow.step_kind(&s).unwrap(), StepKind::Confirm);
  assert!(flow.advance(&s).unwrap_err().is_invalid_transition());
}

#[test]
fn reset_matches_fresh_session() {
  let flow = permissive_flow();
  let s = flow.advance(&at_validation(&flow)).unwrap();
  assert_eq!(flow.reset(&s), flow.initialize().unwrap());
}

#[test]
fn submission_request_requires_terminal_step() {
  let flow = permissive_flow();
  let s = at_validation(&flow);
  assert!(matches!(flow.submission_request(&s), Err(WizardError::SubmitPrecondition(_))));

  let s = flow.advance(&s).unwrap();
  let request = flow.submission_request(&s).unwrap();
  assert_eq!(request.template_id, "test-template");
  assert_eq!(request.expected_records, Some(DomainStubs::sample_summary().accepted_records()));
  assert_eq!(request.idempotency_key, flow.submission_request(&s).unwrap().idempotency_key);
}

#[test]
fn replacing_artifact_on_confirm_needs_a_fresh_preview() {
  let clean = ValidationSummary::from_issues(10, vec![]);
  let flow = flow_with(ValidationGatePolicy::BlockOnErrors, FixedValidationPreview::new(clean));
  let s = flow.advance(&at_validation(&flow)).unwrap();
  assert!(flow.submission_request(&s).is_ok());

  let s = flow.set_artifact(&s, csv("other.csv")).unwrap();
  match flow.submission_request(&s) {
    Err(WizardError::SubmitPrecondition(reason)) => assert!(reason.starts_with("Validate"), "{}", reason),
    other => panic!("se esperaba SubmitPrecondition, se obtuvo {:?}", other),
  }

  // volver a entrar en validación vuelve a pedir la vista previa
  let s = flow.retreat(&flow.retreat(&s).unwrap()).unwrap();
  let s = flow.advance(&flow.advance(&s).unwrap()).unwrap();
  assert!(s.is_terminal_step());
  assert_eq!(flow.submission_request(&s).unwrap().artifact.name(), "other.csv");
}

#[test]
fn session_from_a_longer_flow_is_rejected_without_panicking() {
  let flow = permissive_flow();
  let s = flow.advance(&at_validation(&flow)).unwrap();
  let mut value = serde_json::to_value(&s).unwrap();
  value["step_definitions"].as_array_mut().unwrap().push(serde_json::json!({
    "id": "publish", "title": "Publish", "description": ""
  }));
  value["current_step"] = serde_json::json!(5);
  let foreign: IssuanceSession = serde_json::from_value(value).unwrap();

  assert!(flow.step_kind(&foreign).unwrap_err().is_invalid_transition());
  assert!(matches!(flow.submission_request(&foreign), Err(WizardError::SubmitPrecondition(_))));
}

#[test]
fn step_definitions_follow_step_kinds() {
  let flow = permissive_flow();
  let ids: Vec<&str> = flow.definitions().iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, vec!["upload", "map", "validate", "confirm"]);
  for id in ids {
    assert_eq!(id.parse::<StepKind>().unwrap().as_str(), id);
  }
  assert!("summary".parse::<StepKind>().is_err());
}
