use contacts_core::db::open_db_in_memory;
use contacts_core::{
    ensure_sample_contacts, Birthday, ContactRepository, NewContact, SqliteContactRepository,
};

#[test]
fn empty_store_is_seeded_with_exactly_two_contacts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let inserted = ensure_sample_contacts(&repo).unwrap();
    assert_eq!(inserted, 2);

    let listed = repo.list_contacts().unwrap();
    assert_eq!(listed.len(), 2);

    assert_eq!(listed[0].first_name, "Happiness");
    assert_eq!(listed[0].last_name, "Ncube");
    assert_eq!(listed[0].email, "happiness@gmail.com");
    assert_eq!(listed[0].favorite_color.as_deref(), Some("Blue"));
    assert_eq!(
        listed[0].birthday.as_ref().map(Birthday::as_str),
        Some("2000-01-01")
    );

    assert_eq!(listed[1].first_name, "Thando");
    assert_eq!(listed[1].last_name, "Ncube");
    assert_eq!(listed[1].email, "thando@gmail.com");
    assert_eq!(listed[1].favorite_color.as_deref(), Some("Pink"));
    assert_eq!(
        listed[1].birthday.as_ref().map(Birthday::as_str),
        Some("2014-03-07")
    );
}

#[test]
fn seeding_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    assert_eq!(ensure_sample_contacts(&repo).unwrap(), 2);
    assert_eq!(ensure_sample_contacts(&repo).unwrap(), 0);
    assert_eq!(repo.list_contacts().unwrap().len(), 2);
}

#[test]
fn non_empty_store_is_left_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let input = NewContact {
        first_name: Some("Existing".to_string()),
        last_name: Some("Record".to_string()),
        email: Some("existing@example.com".to_string()),
        favorite_color: None,
        birthday: None,
    };
    repo.create_contact(&input.into_draft().unwrap()).unwrap();

    assert_eq!(ensure_sample_contacts(&repo).unwrap(), 0);

    let listed = repo.list_contacts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "existing@example.com");
}
