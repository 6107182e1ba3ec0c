use contacts_core::{
    Birthday, Contact, ContactPatch, ContactValidationError, NewContact,
};
use uuid::Uuid;

fn stored_contact() -> Contact {
    Contact {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        favorite_color: Some("Green".to_string()),
        birthday: Some(Birthday::parse("1815-12-10").unwrap()),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    }
}

#[test]
fn into_draft_normalizes_fields() {
    let input = NewContact {
        first_name: Some("  Ada ".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some(" Ada@Example.COM ".to_string()),
        favorite_color: Some("   ".to_string()),
        birthday: Some("1815-12-10".to_string()),
    };

    let draft = input.into_draft().unwrap();
    assert_eq!(draft.first_name, "Ada");
    assert_eq!(draft.last_name, "Lovelace");
    assert_eq!(draft.email, "ada@example.com");
    assert_eq!(draft.favorite_color, None);
    assert_eq!(draft.birthday.as_ref().map(Birthday::as_str), Some("1815-12-10"));
}

#[test]
fn into_draft_reports_all_missing_fields_at_once() {
    let input = NewContact {
        first_name: None,
        last_name: Some("  ".to_string()),
        email: None,
        favorite_color: Some("Blue".to_string()),
        birthday: None,
    };

    let err = input.into_draft().unwrap_err();
    assert_eq!(
        err,
        ContactValidationError::MissingRequiredFields(vec!["firstName", "lastName", "email"])
    );
}

#[test]
fn into_draft_rejects_unparsable_birthday() {
    let input = NewContact {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        favorite_color: None,
        birthday: Some("tenth of december".to_string()),
    };

    let err = input.into_draft().unwrap_err();
    assert!(matches!(err, ContactValidationError::InvalidBirthday(_)));
}

#[test]
fn birthday_validates_calendar_rules() {
    assert!(Birthday::parse("2000-01-01").is_ok());
    assert!(Birthday::parse("2024-02-29").is_ok());

    for invalid in [
        "2023-02-29",
        "1900-02-29",
        "2023-13-01",
        "2023-00-10",
        "2023-04-31",
        "2023-01-00",
        "01-01-2023",
        "2023/01/01",
        "",
    ] {
        assert!(
            Birthday::parse(invalid).is_err(),
            "`{invalid}` should be rejected"
        );
    }
}

#[test]
fn contact_serialization_uses_camel_case_wire_fields() {
    let contact = stored_contact();

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], contact.id.to_string());
    assert_eq!(json["firstName"], "Ada");
    assert_eq!(json["lastName"], "Lovelace");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["favoriteColor"], "Green");
    assert_eq!(json["birthday"], "1815-12-10");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_000_000_i64);

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn validate_rejects_nil_id_and_blank_required_fields() {
    let mut contact = stored_contact();
    contact.id = Uuid::nil();
    assert_eq!(
        contact.validate().unwrap_err(),
        ContactValidationError::NilContactId
    );

    let mut contact = stored_contact();
    contact.email = "  ".to_string();
    assert_eq!(
        contact.validate().unwrap_err(),
        ContactValidationError::MissingRequiredFields(vec!["email"])
    );
}

#[test]
fn patch_distinguishes_omitted_from_explicit_null() {
    let patch: ContactPatch =
        serde_json::from_str(r#"{"favoriteColor": null, "birthday": "2001-06-15"}"#).unwrap();

    assert!(patch.first_name.is_none());
    assert_eq!(patch.favorite_color, Some(None));
    assert_eq!(patch.birthday, Some(Some("2001-06-15".to_string())));

    let merged = patch.apply_to(stored_contact()).unwrap();
    assert_eq!(merged.first_name, "Ada");
    assert_eq!(merged.favorite_color, None);
    assert_eq!(merged.birthday.as_ref().map(Birthday::as_str), Some("2001-06-15"));
}

#[test]
fn empty_patch_leaves_contact_unchanged() {
    let patch: ContactPatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());

    let original = stored_contact();
    let merged = patch.apply_to(original.clone()).unwrap();
    assert_eq!(merged, original);
}

#[test]
fn patch_rejects_clearing_required_fields() {
    let null_email: ContactPatch = serde_json::from_str(r#"{"email": null}"#).unwrap();
    let err = null_email.apply_to(stored_contact()).unwrap_err();
    assert_eq!(
        err,
        ContactValidationError::MissingRequiredFields(vec!["email"])
    );

    let blank_name: ContactPatch =
        serde_json::from_str(r#"{"firstName": "   ", "lastName": null}"#).unwrap();
    let err = blank_name.apply_to(stored_contact()).unwrap_err();
    assert_eq!(
        err,
        ContactValidationError::MissingRequiredFields(vec!["firstName", "lastName"])
    );
}

#[test]
fn patch_lowercases_updated_email() {
    let patch: ContactPatch = serde_json::from_str(r#"{"email": "ADA@New.Org"}"#).unwrap();
    let merged = patch.apply_to(stored_contact()).unwrap();
    assert_eq!(merged.email, "ada@new.org");
}

#[test]
fn patch_rejects_unparsable_birthday() {
    let patch: ContactPatch = serde_json::from_str(r#"{"birthday": "soon"}"#).unwrap();
    let err = patch.apply_to(stored_contact()).unwrap_err();
    assert!(matches!(err, ContactValidationError::InvalidBirthday(_)));
}
