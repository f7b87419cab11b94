use worktrack_core::db::open_db_in_memory;
use worktrack_core::{
    Client, ClientService, RepoError, SqliteClientRepository, ValidationError,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let client = service.create(" Acme Corp ", "sales@acme.example").unwrap();
    let id = client.id().expect("saved client must carry its id");

    let loaded = service.get(id).unwrap().unwrap();
    assert_eq!(loaded.name(), "Acme Corp");
    assert_eq!(loaded.contact(), "sales@acme.example");
    assert_eq!(loaded.id(), Some(id));
}

#[test]
fn save_rejects_duplicate_contact_naming_the_owner() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let first = service.create("Acme Corp", "shared@acme.example").unwrap();

    let mut duplicate = Client::new("Other Corp", "shared@acme.example").unwrap();
    let err = service.save(&mut duplicate).unwrap_err();

    match err {
        RepoError::Validation(ValidationError::Uniqueness { field, message }) => {
            assert_eq!(field, "contact");
            assert!(message.contains("Acme Corp"));
            assert!(message.contains(&first.id().unwrap().to_string()));
        }
        other => panic!("expected uniqueness violation, got {other}"),
    }

    // Failed save leaves the record unsaved and writes nothing.
    assert_eq!(duplicate.id(), None);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn edit_does_not_conflict_with_own_contact() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let client = service.create("Acme Corp", "sales@acme.example").unwrap();
    let id = client.id().unwrap();

    // Keeping the same contact while renaming must pass the uniqueness check.
    service.update(id, "Acme Corporation", "sales@acme.example").unwrap();

    let loaded = service.get(id).unwrap().unwrap();
    assert_eq!(loaded.name(), "Acme Corporation");
}

#[test]
fn update_surfaces_format_errors_before_uniqueness() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    service.create("Acme Corp", "sales@acme.example").unwrap();
    let other = service.create("Globex", "info@globex.example").unwrap();

    // Name is malformed and the contact collides with Acme's; the field
    // validators run first, so the format error wins.
    let err = service
        .update(other.id().unwrap(), "Globex 2", "sales@acme.example")
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidFormat { field: "client name", .. })
    ));

    let loaded = service.get(other.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.contact(), "info@globex.example");
}

#[test]
fn saving_an_already_persisted_record_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let mut client = Client::new("Acme Corp", "sales@acme.example").unwrap();
    service.save(&mut client).unwrap();
    let id = client.id().unwrap();

    let err = service.save(&mut client).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyPersisted { table: "clients", id: got } if got == id
    ));

    // No duplicate row was written and the id is unchanged.
    assert_eq!(service.list().unwrap().len(), 1);
    assert_eq!(client.id(), Some(id));
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let err = service.update(999, "Ghost", "ghost@acme.example").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "clients", id: 999 }));
}

#[test]
fn invalid_input_is_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let err = service.create("Acme Corp", "not-an-email").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidEmail { .. })
    ));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn search_matches_name_and_contact() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    service.create("Acme Corp", "sales@acme.example").unwrap();
    service.create("Globex", "info@globex.example").unwrap();

    let by_name = service.search("acme").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name(), "Acme Corp");

    let by_contact = service.search("globex.example").unwrap();
    assert_eq!(by_contact.len(), 1);
    assert_eq!(by_contact[0].name(), "Globex");

    // LIKE wildcards in user input are treated literally.
    assert!(service.search("%").unwrap().is_empty());
}
