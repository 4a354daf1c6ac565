//! Tests for catalog files and container wiring

use std::fs;

use tempfile::TempDir;

use compws::cli::CliError;
use compws::config::Settings;
use compws::domain::TreeNode;
use compws::exitcode;
use compws::infrastructure::catalog::InMemoryDataSource;
use compws::infrastructure::di::ServiceContainer;
use compws::infrastructure::InfraError;

const CATALOG: &str = r#"
[[competitions]]
name = "Spaceship Titanic"

[[competitions.experiments]]
name = "exp-001-catboost"
score = 0.80126

[[competitions.experiments]]
name = "exp-002-pending"

[[competitions]]
name = "Store Sales"
"#;

#[test]
fn given_catalog_file_when_building_container_then_tree_uses_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG).unwrap();
    let settings = Settings {
        data_file: Some(path),
        ..Settings::default()
    };

    let container = ServiceContainer::new(settings).unwrap();
    let tree = container.tree();

    let roots: Vec<String> = tree.roots().iter().map(|n| n.label().to_string()).collect();
    assert_eq!(roots, vec!["Spaceship Titanic", "Store Sales"]);

    let children = tree.children(&TreeNode::competition("Spaceship Titanic"));
    assert_eq!(children[0].description(), Some("Score: 0.8013".to_string()));
    assert_eq!(children[1].description(), None);
    assert!(tree
        .children(&TreeNode::competition("Store Sales"))
        .is_empty());
}

#[test]
fn given_no_data_file_when_building_container_then_sample_data() {
    let container = ServiceContainer::new(Settings::default()).unwrap();

    assert_eq!(container.tree().roots().len(), 3);
    assert_eq!(container.runner().schedule().steps, 6);
}

#[test]
fn given_missing_catalog_when_loading_then_io_error() {
    let dir = TempDir::new().unwrap();

    let err = InMemoryDataSource::load(&dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, InfraError::Io { .. }));
    assert_eq!(CliError::from(err).exit_code(), exitcode::IOERR);
}

#[test]
fn given_malformed_catalog_when_loading_then_catalog_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[competitions]]\nscore = 1\n").unwrap();

    let err = InMemoryDataSource::load(&path).unwrap_err();

    assert!(matches!(err, InfraError::Catalog { .. }));
    assert_eq!(CliError::from(err).exit_code(), exitcode::DATAERR);
}
