use crate::domain::booking::Guest;
use serde::{Deserialize, Serialize};

/// Single-letter-keyed rendition of a guest, sized to fit the provider's
/// per-event metadata cap. Document fields are not carried for additional
/// guests; that loss is accepted.
#[derive(Debug, Serialize, Deserialize)]
struct CompactGuest {
    n: u32,
    c: String,
    no: String,
    g: String,
    na: String,
    e: u32,
    ci: String,
    ln: String,
    co: String,
    p: String,
}

impl From<&Guest> for CompactGuest {
    fn from(guest: &Guest) -> Self {
        Self {
            n: guest.number,
            c: guest.surname.clone(),
            no: guest.name.clone(),
            g: guest.gender.clone(),
            na: guest.birth_date.clone(),
            e: guest.age,
            ci: guest.nationality.clone(),
            ln: guest.birthplace.clone(),
            co: guest.municipality.clone(),
            p: guest.province.clone(),
        }
    }
}

impl From<CompactGuest> for Guest {
    fn from(compact: CompactGuest) -> Self {
        Self {
            number: compact.n,
            surname: compact.c,
            name: compact.no,
            gender: compact.g,
            birth_date: compact.na,
            age: compact.e,
            nationality: compact.ci,
            birthplace: compact.ln,
            municipality: compact.co,
            province: compact.p,
            document_type: None,
            document_number: None,
            issue_place: None,
            is_responsible: false,
        }
    }
}

pub fn encode(guests: &[Guest]) -> String {
    let compact: Vec<CompactGuest> = guests.iter().map(CompactGuest::from).collect();
    serde_json::to_string(&compact).unwrap_or_else(|_| "[]".to_string())
}

/// Best-effort decode: malformed or empty input yields an empty list,
/// never an error, since this runs inside the fallback path.
pub fn decode(encoded: &str) -> Vec<Guest> {
    serde_json::from_str::<Vec<CompactGuest>>(encoded)
        .map(|compact| compact.into_iter().map(Guest::from).collect())
        .unwrap_or_default()
}
