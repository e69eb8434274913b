use kellokortti_core::db::migrations::latest_version;
use kellokortti_core::db::{open_db, open_db_in_memory};
use kellokortti_core::{
    AddOutcome, ProjectRepository, RepoError, SqliteProjectStore,
};
use rusqlite::Connection;

fn new_repo() -> ProjectRepository<SqliteProjectStore> {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(conn).unwrap();
    ProjectRepository::new(store).unwrap()
}

#[test]
fn add_project_assigns_identifier_and_appears_in_active_set() {
    let mut repo = new_repo();

    assert_eq!(repo.add_project("Alpha").unwrap(), AddOutcome::Created);

    let projects = repo.get_projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Alpha");
    assert!(projects[0].id > 0);
    assert_eq!(projects[0].timer_seconds, 0);
}

#[test]
fn case_insensitive_duplicate_is_rejected() {
    let mut repo = new_repo();

    assert_eq!(repo.add_project("Alpha").unwrap(), AddOutcome::Created);
    assert_eq!(repo.add_project("alpha").unwrap(), AddOutcome::Rejected);
    assert_eq!(repo.get_projects().len(), 1);
}

#[test]
fn validate_name_enforces_charset_and_active_uniqueness() {
    let mut repo = new_repo();
    repo.add_project("Varattu").unwrap();

    assert!(!repo.validate_name(""));
    assert!(!repo.validate_name("two words"));
    assert!(!repo.validate_name("name;drop"));
    assert!(!repo.validate_name("Varattu"));
    assert!(!repo.validate_name("VARATTU"));

    assert!(repo.validate_name("Vapaa"));
    assert!(repo.validate_name("Työ"));
    assert!(repo.validate_name("projekti9"));
}

#[test]
fn validate_name_frees_up_after_soft_delete() {
    let mut repo = new_repo();
    repo.add_project("Hetki").unwrap();

    assert!(!repo.validate_name("hetki"));
    assert!(repo.delete_project("Hetki").unwrap());
    assert!(repo.validate_name("hetki"));
}

#[test]
fn invalid_name_is_rejected_without_touching_the_store() {
    let mut repo = new_repo();

    assert_eq!(repo.add_project("bad name!").unwrap(), AddOutcome::Rejected);
    assert_eq!(repo.add_project("").unwrap(), AddOutcome::Rejected);
    assert!(repo.get_projects().is_empty());
}

#[test]
fn delete_unknown_project_returns_false_and_keeps_active_set() {
    let mut repo = new_repo();
    repo.add_project("Pysyvä").unwrap();

    assert!(!repo.delete_project("Unknown").unwrap());
    // Deletion matches the exact stored case only.
    assert!(!repo.delete_project("pysyvä").unwrap());
    assert_eq!(repo.get_projects().len(), 1);
}

#[test]
fn reactivation_reuses_the_original_identifier() {
    let mut repo = new_repo();

    assert_eq!(repo.add_project("Beta").unwrap(), AddOutcome::Created);
    let original_id = repo.get_projects()[0].id;

    assert!(repo.delete_project("Beta").unwrap());
    assert!(repo.get_projects().is_empty());

    assert_eq!(repo.add_project("Beta").unwrap(), AddOutcome::Reactivated);
    let projects = repo.get_projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, original_id);
    assert_eq!(projects[0].name, "Beta");
}

#[test]
fn reactivation_by_different_case_keeps_the_stored_name() {
    let mut repo = new_repo();

    repo.add_project("Beta").unwrap();
    repo.delete_project("Beta").unwrap();

    assert_eq!(repo.add_project("BETA").unwrap(), AddOutcome::Reactivated);
    assert_eq!(repo.get_projects()[0].name, "Beta");
}

#[test]
fn log_time_rejects_names_outside_the_active_set() {
    let mut repo = new_repo();
    repo.add_project("Gamma").unwrap();

    assert!(repo.log_time("Gamma", "2024-01-01", 60).unwrap());
    assert!(!repo.log_time("Missing", "2024-01-01", 60).unwrap());

    repo.delete_project("Gamma").unwrap();
    assert!(!repo.log_time("Gamma", "2024-01-02", 60).unwrap());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteProjectStore::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProjectStore::try_new(conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("projects"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE projects (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );
        CREATE TABLE project_data (
            id         INTEGER PRIMARY KEY,
            project_id INTEGER NOT NULL,
            date       TEXT NOT NULL,
            time       INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProjectStore::try_new(conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "projects",
            column: "active"
        })
    ));
}

#[test]
fn restart_reloads_the_same_active_set_with_stable_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kellokortti.db");

    let first_snapshot: Vec<(i64, String)> = {
        let store = SqliteProjectStore::try_new(open_db(&path).unwrap()).unwrap();
        let mut repo = ProjectRepository::new(store).unwrap();
        for name in ["Koodaus", "Lukeminen", "Treeni"] {
            assert_eq!(repo.add_project(name).unwrap(), AddOutcome::Created);
        }
        assert!(repo.delete_project("Lukeminen").unwrap());

        repo.get_projects()
            .iter()
            .map(|project| (project.id, project.name.clone()))
            .collect()
    };

    let store = SqliteProjectStore::try_new(open_db(&path).unwrap()).unwrap();
    let repo = ProjectRepository::new(store).unwrap();
    let reloaded: Vec<(i64, String)> = repo
        .get_projects()
        .iter()
        .map(|project| (project.id, project.name.clone()))
        .collect();

    assert_eq!(reloaded, first_snapshot);
    assert!(!reloaded.iter().any(|(_, name)| name == "Lukeminen"));
}
