use crate::codec;
use crate::domain::event::PaymentEvent;
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub number: u32,
    pub surname: String,
    pub name: String,
    pub gender: String,
    pub birth_date: String,
    pub age: u32,
    pub nationality: String,
    pub birthplace: String,
    pub municipality: String,
    pub province: String,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub issue_place: Option<String>,
    pub is_responsible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: String,
}

/// The canonical reconstructed booking, handed to every sink.
///
/// `documents` is only populated when the record came out of the temp
/// store; metadata reconstruction never carries attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub checkin_date: String,
    pub apartment: String,
    pub guest_count: u32,
    pub night_count: u32,
    pub group_type: Option<String>,
    pub total_amount: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub primary_guest: Guest,
    pub other_guests: Vec<Guest>,
    pub documents: Vec<DocumentRef>,
}

impl BookingRecord {
    /// Degraded reconstruction from provider metadata alone. Fails only
    /// when the check-in date or apartment identifier is absent.
    pub fn from_metadata(event: &PaymentEvent) -> Result<Self, PipelineError> {
        let meta = &event.metadata;
        let checkin_date = meta
            .get("dataCheckin")
            .filter(|v| !v.is_empty())
            .ok_or(PipelineError::RecordIncomplete("dataCheckin"))?
            .clone();
        let apartment = meta
            .get("appartamento")
            .filter(|v| !v.is_empty())
            .ok_or(PipelineError::RecordIncomplete("appartamento"))?
            .clone();

        let other_guests = meta
            .get("ospiti_compact")
            .map(|s| codec::decode(s))
            .unwrap_or_default();

        let primary_guest = Guest {
            number: 1,
            surname: meta.get("resp_cognome").cloned().unwrap_or_default(),
            name: meta.get("resp_nome").cloned().unwrap_or_default(),
            gender: meta.get("resp_genere").cloned().unwrap_or_default(),
            birth_date: meta.get("resp_nascita").cloned().unwrap_or_default(),
            age: parse_u32(meta.get("resp_eta")),
            nationality: meta.get("resp_cittadinanza").cloned().unwrap_or_default(),
            birthplace: meta.get("resp_luogoNascita").cloned().unwrap_or_default(),
            municipality: meta.get("resp_luogoComune").cloned().unwrap_or_default(),
            province: meta.get("resp_luogoProvincia").cloned().unwrap_or_default(),
            document_type: meta.get("resp_docTipo").cloned(),
            document_number: meta.get("resp_docNumero").cloned(),
            issue_place: meta.get("resp_docRilascio").cloned(),
            is_responsible: true,
        };

        let guest_count = match parse_u32(meta.get("numeroOspiti")) {
            0 => 1 + other_guests.len() as u32,
            n => n,
        };

        Ok(Self {
            checkin_date,
            apartment,
            guest_count,
            night_count: parse_u32(meta.get("numeroNotti")).max(1),
            group_type: meta.get("tipoGruppo").filter(|v| !v.is_empty()).cloned(),
            total_amount: meta
                .get("totale")
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or_else(|| event.amount_total as f64 / 100.0),
            timestamp: chrono::Utc::now(),
            primary_guest,
            other_guests,
            documents: Vec::new(),
        })
    }
}

fn parse_u32(value: Option<&String>) -> u32 {
    value.and_then(|v| v.parse::<u32>().ok()).unwrap_or(0)
}
