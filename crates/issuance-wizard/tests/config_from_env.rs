use issuance_domain::DEFAULT_TEMPLATE_ID;
use issuance_wizard::config::{ENV_SIMULATED_DELAY_MS, ENV_SUBMIT_TIMEOUT_MS, ENV_TEMPLATE_ID, ENV_VALIDATION_GATE};
use issuance_wizard::{ValidationGatePolicy, WizardConfig, WizardError, WizardFactory};
use std::collections::HashMap;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> Result<WizardConfig, WizardError> {
  let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  WizardConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn missing_variables_fall_back_to_defaults() {
  let cfg = config_from(&[]).unwrap();
  assert_eq!(cfg, WizardConfig::default());
  assert_eq!(cfg.template_id, DEFAULT_TEMPLATE_ID);
  assert_eq!(cfg.validation_gate, ValidationGatePolicy::Permissive);
  assert_eq!(cfg.submit_timeout, Duration::from_millis(30_000));
  assert_eq!(cfg.simulated_delay, Duration::from_millis(1_500));
}

#[test]
fn variables_override_defaults() {
  let cfg = config_from(&[(ENV_TEMPLATE_ID, "smart-doc-badge"),
                          (ENV_VALIDATION_GATE, " Block_On_Warnings "),
                          (ENV_SUBMIT_TIMEOUT_MS, "250"),
                          (ENV_SIMULATED_DELAY_MS, "0")]).unwrap();
  assert_eq!(cfg.template_id, "smart-doc-badge");
  assert_eq!(cfg.validation_gate, ValidationGatePolicy::BlockOnWarnings);
  assert_eq!(cfg.submit_timeout, Duration::from_millis(250));
  assert_eq!(cfg.simulated_delay, Duration::ZERO);
}

#[test]
fn blank_values_count_as_missing() {
  let cfg = config_from(&[(ENV_TEMPLATE_ID, "  "), (ENV_VALIDATION_GATE, "")]).unwrap();
  assert_eq!(cfg.template_id, DEFAULT_TEMPLATE_ID);
  assert_eq!(cfg.validation_gate, ValidationGatePolicy::Permissive);
}

#[test]
fn bad_values_are_config_errors() {
  assert!(matches!(config_from(&[(ENV_VALIDATION_GATE, "strict")]), Err(WizardError::Config(_))));
  assert!(matches!(config_from(&[(ENV_SUBMIT_TIMEOUT_MS, "soon")]), Err(WizardError::Config(_))));
  assert!(matches!(config_from(&[(ENV_SUBMIT_TIMEOUT_MS, "0")]), Err(WizardError::Config(_))));
  assert!(matches!(config_from(&[(ENV_SIMULATED_DELAY_MS, "-5")]), Err(WizardError::Config(_))));
}

#[test]
fn policy_round_trips_through_display() {
  for policy in [ValidationGatePolicy::Permissive, ValidationGatePolicy::BlockOnErrors, ValidationGatePolicy::BlockOnWarnings] {
    assert_eq!(policy.to_string().parse::<ValidationGatePolicy>().unwrap(), policy);
  }
}

#[test]
fn unknown_template_fails_when_building_the_wizard() {
  let cfg = config_from(&[(ENV_TEMPLATE_ID, "smart-doc-diploma")]).unwrap();
  assert!(matches!(WizardFactory::flow_with_stubs(&cfg), Err(WizardError::Domain(_))));
}

#[test]
fn badge_template_drives_mapping_gate() {
  let cfg = config_from(&[(ENV_TEMPLATE_ID, "smart-doc-badge")]).unwrap();
  let flow = WizardFactory::flow_with_stubs(&cfg).unwrap();
  assert_eq!(flow.template().template_id(), "smart-doc-badge");
  let s = flow.initialize().unwrap();
  let s = flow.set_artifact(&s, issuance_domain::UploadedArtifact::new("badges.csv", 10).unwrap()).unwrap();
  let s = flow.advance(&s).unwrap();
  let s = flow.update_mapping(&s, "recipient_name", "Full Name").unwrap();
  assert!(flow.blocking_reason(&s).unwrap().contains("recipient_email"));
  let s = flow.update_mapping(&s, "recipient_email", "Email Address").unwrap();
  assert!(flow.can_advance(&s));
}
