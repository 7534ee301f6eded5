mod support;

use datasource_core::{
    load_repository, select_data_source, DataSourceConfig, DataSourceKind, Record,
    RecordRepository, SelectedRepository,
};
use std::path::Path;
use support::{capture_logs, info_messages, messages_for, SELECT_TARGET};
use uuid::Uuid;

const FILESYSTEM_MESSAGE: &str = "Loading filesystem as data source at runtime";
const MARIADB_MESSAGE: &str = "Loading mariaDb data source at runtime";

fn config_in(root: &Path) -> DataSourceConfig {
    DataSourceConfig::default()
        .with_db_path(root.join("records.db"))
        .with_data_dir(root.join("records"))
}

#[test]
fn unset_db_type_loads_filesystem() {
    capture_logs();
    let dir = tempfile::tempdir().unwrap();

    let repo = load_repository(&config_in(dir.path())).unwrap();

    assert!(matches!(repo, SelectedRepository::Filesystem(_)));
    assert_eq!(repo.kind().as_str(), "filesystem");
    assert!(repo.find_all().unwrap().is_empty());
    assert_eq!(messages_for(SELECT_TARGET), vec![FILESYSTEM_MESSAGE]);
    assert_eq!(info_messages(), vec![FILESYSTEM_MESSAGE]);
}

#[test]
fn unknown_db_type_loads_filesystem() {
    capture_logs();
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path()).with_db_type("unknownDb");

    let repo = load_repository(&config).unwrap();

    assert_eq!(repo.kind().as_str(), "filesystem");
    assert!(dir.path().join("records").is_dir());
    assert!(!dir.path().join("records.db").exists());
    assert_eq!(messages_for(SELECT_TARGET), vec![FILESYSTEM_MESSAGE]);
    assert_eq!(info_messages(), vec![FILESYSTEM_MESSAGE]);
}

#[test]
fn mariadb_db_type_loads_database() {
    capture_logs();
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path()).with_db_type("mariaDb");

    let repo = load_repository(&config).unwrap();

    assert!(matches!(repo, SelectedRepository::Database(_)));
    assert_eq!(repo.kind().as_str(), "mariaDb");
    assert!(dir.path().join("records.db").exists());
    assert_eq!(messages_for(SELECT_TARGET), vec![MARIADB_MESSAGE]);
    assert_eq!(info_messages(), vec![MARIADB_MESSAGE]);
}

#[test]
fn near_miss_values_fall_back_to_filesystem() {
    capture_logs();
    for value in ["MariaDb", "mariadb", "mariaDb ", "", "mysql"] {
        let config = DataSourceConfig::default().with_db_type(value);
        assert_eq!(
            select_data_source(&config),
            DataSourceKind::Filesystem,
            "{value:?} must not select the database"
        );
    }
    assert_eq!(messages_for(SELECT_TARGET), vec![FILESYSTEM_MESSAGE; 5]);
}

#[test]
fn reselecting_with_new_value_switches_backend() {
    capture_logs();
    let dir = tempfile::tempdir().unwrap();
    let base = config_in(dir.path());

    let first = load_repository(&base).unwrap();
    let second = load_repository(&base.clone().with_db_type("mariaDb")).unwrap();
    let third = load_repository(&base).unwrap();

    assert_eq!(first.kind(), DataSourceKind::Filesystem);
    assert_eq!(second.kind(), DataSourceKind::MariaDb);
    assert_eq!(third.kind(), DataSourceKind::Filesystem);
    assert_eq!(
        messages_for(SELECT_TARGET),
        vec![FILESYSTEM_MESSAGE, MARIADB_MESSAGE, FILESYSTEM_MESSAGE]
    );
    assert_eq!(
        info_messages(),
        vec![FILESYSTEM_MESSAGE, MARIADB_MESSAGE, FILESYSTEM_MESSAGE]
    );
}

#[test]
fn selected_repository_exposes_backend_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let record = Record::with_id(Uuid::new_v4(), "stored on disk", 42);

    let fs_repo = load_repository(&config).unwrap();
    fs_repo.insert(&record).unwrap();
    let db_repo = load_repository(&config.clone().with_db_type("mariaDb")).unwrap();

    assert_eq!(fs_repo.find_all().unwrap(), vec![record.clone()]);
    assert_eq!(fs_repo.find_by_id(record.uuid).unwrap(), Some(record.clone()));
    assert_eq!(fs_repo.count().unwrap(), 1);
    assert!(db_repo.find_all().unwrap().is_empty());
}

#[test]
fn backend_open_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let config = DataSourceConfig::default().with_data_dir(blocker.join("records"));
    assert!(load_repository(&config).is_err());
}
