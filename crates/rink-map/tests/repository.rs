use rink_map::{MappingRepository, RepositoryError, SavedMapping, auto_map};
use rink_model::{AttributeKey, FieldMapping};
use tempfile::TempDir;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path().join("mappings")).unwrap();

    let result = auto_map(&headers(&["Prénom", "Nom", "Numéro"]));
    let saved = SavedMapping::new("club-registration", result.mappings.clone());
    let path = repo.save(&saved).unwrap();
    assert!(path.ends_with("club-registration.json"));

    let loaded = repo.load("club-registration").unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.version, "1.0");
    assert!(loaded.saved_at.is_some());
}

#[test]
fn load_missing_returns_none() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path()).unwrap();
    assert!(repo.load("nothing").unwrap().is_none());
    assert!(!repo.delete("nothing").unwrap());
}

#[test]
fn list_and_delete() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path()).unwrap();
    repo.save(&SavedMapping::new("u11", vec![])).unwrap();
    repo.save(&SavedMapping::new("atome_b", vec![])).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    assert_eq!(repo.list().unwrap(), vec!["atome_b", "u11"]);
    assert!(repo.delete("u11").unwrap());
    assert_eq!(repo.list().unwrap(), vec!["atome_b"]);
}

#[test]
fn rejects_unsafe_names() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path()).unwrap();
    for name in ["", "../escape", "a b", "with.dot"] {
        let err = repo.save(&SavedMapping::new(name, vec![])).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidName { .. }), "{name}");
    }
}

#[test]
fn loads_file_without_optional_metadata() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path()).unwrap();
    std::fs::write(
        dir.path().join("legacy.json"),
        r#"{"name":"legacy","mappings":[{"source_column":"Nom","target_attribute":"last_name","confidence":1.0,"match_kind":"manual"}]}"#,
    )
    .unwrap();

    let loaded = repo.load("legacy").unwrap().unwrap();
    assert_eq!(loaded.version, "1.0");
    assert_eq!(loaded.saved_at, None);
    assert_eq!(loaded.mappings[0].target_attribute, AttributeKey::LastName);
}

#[test]
fn corrupt_file_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let repo = MappingRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    assert!(matches!(
        repo.load("broken"),
        Err(RepositoryError::Json { .. })
    ));
}

#[test]
fn apply_to_new_headers() {
    let saved = SavedMapping::new(
        "club",
        vec![
            FieldMapping::manual("Joueur", AttributeKey::FirstName),
            FieldMapping::manual("Famille", AttributeKey::LastName),
            FieldMapping::manual("Chandail", AttributeKey::JerseyNumber),
        ],
    );
    let result = saved.apply_to(&headers(&["Joueur", "Famille", "Équipe"]));

    assert_eq!(result.mappings.len(), 2);
    assert_eq!(result.unmapped_columns, vec!["Équipe"]);
    assert!(result.is_complete());
    assert_eq!(result.attribute_for("Famille"), Some(AttributeKey::LastName));
}
