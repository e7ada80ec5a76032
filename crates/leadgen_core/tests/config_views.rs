use chrono::NaiveDate;
use leadgen_core::{
    AppConfig, AssignedView, ConfigAuthProvider, ConfigError, FilterQuery, JsonFileLeadSource,
    LeadSession, Role, SampleLeadSource, SessionError, SourceError, UserDirectory,
};
use std::io::Write;
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
credentials:
  usernames:
    mmanager:
      name: Mia Manager
      password: "$2b$12$abcdefghijklmnopqrstuv"
      role: Manager
    rrep:
      name: Rolf Rep
      role: Representative
    sseller:
      name: Sara Seller
      role: Representative
cookie:
  name: leadgen_cookie
  key: not-a-secret
  expiry_days: 30
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn open_as(config: &AppConfig, username: &str) -> LeadSession<AppConfig> {
    let auth = ConfigAuthProvider::new(config, Some(username.to_string()));
    LeadSession::open(&auth, &SampleLeadSource, config.clone()).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

#[test]
fn config_file_drives_identity_and_directory() {
    let file = write_temp(CONFIG_YAML);
    let config = AppConfig::load(file.path()).unwrap();

    let session = open_as(&config, "mmanager");
    assert_eq!(session.identity().role, Role::Manager);
    assert_eq!(session.identity().welcome_message(), "Welcome *Mia Manager*");

    let candidates = session.assignee_candidates().unwrap();
    let ids: Vec<&str> = candidates.iter().map(|rep| rep.user_id.as_str()).collect();
    assert_eq!(ids, vec!["rrep", "sseller"]);
    assert_eq!(config.display_name("rrep").as_deref(), Some("Rolf Rep"));
}

#[test]
fn malformed_config_is_reported_not_swallowed() {
    let file = write_temp("credentials: [this, is, not, a, map]\n");
    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_config_user_cannot_open_a_session() {
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let auth = ConfigAuthProvider::new(&config, Some("intruder".to_string()));
    let result = LeadSession::open(&auth, &SampleLeadSource, config.clone());
    assert!(matches!(result, Err(SessionError::NotAuthenticated(_))));
}

#[test]
fn manager_and_representative_see_role_scoped_views() {
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let mut manager = open_as(&config, "mmanager");
    manager.toggle_lead("lead_1", true);
    manager.toggle_lead("lead_2", true);
    manager.move_selected(day(), Some("rrep")).unwrap();
    manager.toggle_lead("lead_3", true);
    manager.move_selected(day(), Some("sseller")).unwrap();

    let view = manager.assigned_view();
    assert!(matches!(view, AssignedView::Manager(_)));
    assert_eq!(view.heading(), "Manager View: All Assigned Leads");
    let table = view.table();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.cell(0, "assigned_to_name"), Some("Rolf Rep"));
    assert_eq!(table.cell(2, "assigned_to_name"), Some("Sara Seller"));
    assert_eq!(table.cell(0, "selection_date"), Some("2024-05-17"));

    let selected = manager.selected_view();
    assert_eq!(selected.cell(1, "lead_id"), Some("lead_2"));
    assert_eq!(selected.cell(1, "assigned_to"), Some("rrep"));
}

#[test]
fn representative_view_only_lists_own_assignments() {
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let mut rep = open_as(&config, "rrep");
    rep.toggle_lead("lead_4", true);
    rep.move_selected(day(), None).unwrap();

    let view = rep.assigned_view();
    assert_eq!(view.heading(), "Leads Assigned To You");
    assert!(view.rows().is_empty());
    assert!(!view.table().columns.contains(&"assigned_to_name".to_string()));
    assert_eq!(rep.selected_view().rows.len(), 1);
    assert!(rep.visible_leads(&FilterQuery::new()).unwrap().len() == 7);
}

#[test]
fn json_lead_source_feeds_the_session() {
    let file = write_temp(
        r#"[
            {"name": "Nord AG", "ort": "Hamburg", "bonität": "A"},
            {"name": "Süd GmbH", "ort": "München", "bonität": "B"}
        ]"#,
    );
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let auth = ConfigAuthProvider::new(&config, Some("rrep".to_string()));
    let session =
        LeadSession::open(&auth, &JsonFileLeadSource::new(file.path()), config.clone()).unwrap();

    let query = FilterQuery::from_parts(Some("bonität"), &["B".to_string()], None, None).unwrap();
    let visible = session.visible_leads(&query).unwrap().ids();
    assert_eq!(visible, vec!["lead_2".to_string()]);
}

#[test]
fn missing_json_source_fails_session_open() {
    let config = AppConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let auth = ConfigAuthProvider::new(&config, Some("rrep".to_string()));
    let source = JsonFileLeadSource::new("/nonexistent/leadgen/leads.json");
    let result = LeadSession::open(&auth, &source, config.clone());
    assert!(matches!(
        result,
        Err(SessionError::Source(SourceError::Io { .. }))
    ));
}
