use booking_fanout::codec::{decode, encode};
use booking_fanout::domain::booking::Guest;

fn guest(number: u32, surname: &str, name: &str) -> Guest {
    Guest {
        number,
        surname: surname.to_string(),
        name: name.to_string(),
        gender: "M".to_string(),
        birth_date: "1990-04-12".to_string(),
        age: 35,
        nationality: "Italia".to_string(),
        birthplace: "Roma".to_string(),
        municipality: "Roma".to_string(),
        province: "RM".to_string(),
        document_type: None,
        document_number: None,
        issue_place: None,
        is_responsible: false,
    }
}

#[test]
fn round_trip_preserves_carried_fields() {
    let guests = vec![guest(2, "Bianchi", "Luca"), guest(3, "Verdi", "Anna")];
    assert_eq!(decode(&encode(&guests)), guests);
}

#[test]
fn document_fields_are_dropped() {
    let mut with_doc = guest(2, "Bianchi", "Luca");
    with_doc.document_type = Some("IDENT".to_string());
    with_doc.document_number = Some("CA12345XY".to_string());
    with_doc.issue_place = Some("Roma".to_string());

    let decoded = decode(&encode(&[with_doc]));
    assert_eq!(decoded.len(), 1);
    assert!(decoded[0].document_type.is_none());
    assert!(decoded[0].document_number.is_none());
    assert!(decoded[0].issue_place.is_none());
}

#[test]
fn decoded_guests_are_never_responsible() {
    let mut primary_like = guest(1, "Rossi", "Mario");
    primary_like.is_responsible = true;

    let decoded = decode(&encode(&[primary_like]));
    assert!(!decoded[0].is_responsible);
}

#[test]
fn uses_single_letter_keys() {
    let encoded = encode(&[guest(2, "Bianchi", "Luca")]);
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    let obj = value[0].as_object().unwrap();
    for key in ["n", "c", "no", "g", "na", "e", "ci", "ln", "co", "p"] {
        assert!(obj.contains_key(key), "missing key {}", key);
    }
    assert_eq!(obj.len(), 10);
}

#[test]
fn malformed_input_decodes_to_empty() {
    assert!(decode("").is_empty());
    assert!(decode("not json").is_empty());
    assert!(decode("{\"n\":1}").is_empty());
    assert!(decode("[{\"unexpected\":true}]").is_empty());
}

#[test]
fn empty_list_round_trips() {
    assert_eq!(encode(&[]), "[]");
    assert!(decode("[]").is_empty());
}
