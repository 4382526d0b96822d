use census_fields::categories::default_categories;
use census_fields::commands::{execute_plan, init_config, load_config, validate_config, PlanArgs};

#[test]
fn test_init_config_round_trips_builtin_set() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config/census_fields.toml");

    init_config(path.clone(), false).unwrap();

    let loaded = load_config(Some(path.as_path())).unwrap();
    assert_eq!(loaded, default_categories().unwrap());
    assert!(validate_config(Some(path)).is_ok());
}

#[test]
fn test_init_config_refuses_overwrite() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("census_fields.toml");
    std::fs::write(&path, "# mine").unwrap();

    assert!(init_config(path.clone(), false).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

    init_config(path.clone(), true).unwrap();
    assert!(load_config(Some(path.as_path())).is_ok());
}

#[test]
fn test_validate_config_rejects_bad_source() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"jobs": {"source": "lehd", "fields": {"total": "C000"}, "fields_universe": {"default": "DENSITY_ONLY"}}}"#,
    )
    .unwrap();

    assert!(validate_config(Some(path)).is_err());
}

#[test]
fn test_load_config_missing_file() {
    assert!(load_config(Some(std::path::Path::new("/nonexistent/census.toml"))).is_err());
}

#[test]
fn test_plan_builtin_categories() {
    let args = PlanArgs {
        state: "Massachusetts".to_string(),
        level: "block groups".to_string(),
        ..Default::default()
    };
    assert!(execute_plan(args).is_ok());

    let args = PlanArgs {
        state: "MA".to_string(),
        json: true,
        ..Default::default()
    };
    assert!(execute_plan(args).is_ok());
}

#[test]
fn test_plan_unknown_state() {
    let args = PlanArgs {
        state: "Gondor".to_string(),
        ..Default::default()
    };
    assert!(execute_plan(args).is_err());
}
