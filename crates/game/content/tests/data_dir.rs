use std::fs;
use std::path::PathBuf;

use battle_content::{ContentFactory, builtin};
use battle_core::CombatConfig;

fn shipped_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_data_matches_builtin_roster() {
    let bundle = ContentFactory::new(shipped_data()).load_all().unwrap();
    assert_eq!(bundle, ContentFactory::builtin());
}

#[test]
fn loads_from_temp_dir_without_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("companions.ron"),
        r#"[("pip", (name: "Pip", role: GUARDIAN, max_health: 60, ability_name: "Cover", ability_shield: 8))]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("encounters.ron"),
        r#"[("duel", [(template_id: "rat", name: "Rat", max_health: 12, attack: 2)])]"#,
    )
    .unwrap();

    let bundle = ContentFactory::new(dir.path()).load_all().unwrap();

    assert_eq!(bundle.config, CombatConfig::default());
    assert_eq!(bundle.companion_ids().collect::<Vec<_>>(), vec!["pip"]);
    assert_eq!(bundle.encounter("duel").map(|m| m.len()), Some(1));
    assert!(bundle.encounter(builtin::DEFAULT_ENCOUNTER).is_none());
}

#[test]
fn broken_catalog_reports_context() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("companions.ron"), "[(").unwrap();
    fs::write(dir.path().join("encounters.ron"), "[]").unwrap();

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(format!("{err:#}").contains("loading companions"));
}
