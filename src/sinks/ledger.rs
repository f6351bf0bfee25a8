use crate::domain::booking::{BookingRecord, Guest};
use crate::domain::event::PaymentEvent;
use crate::sinks::LedgerSink;
use anyhow::Result;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgLedger {
    pub pool: PgPool,
}

impl PgLedger {
    async fn insert_row(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event: &PaymentEvent,
        record: &BookingRecord,
        guest: &Guest,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO ledger_entries (
                session_id, apartment, checkin_date, night_count, total_amount,
                guest_number, surname, name, gender, birth_date, age,
                nationality, birthplace, municipality, province,
                document_type, document_number, issue_place, is_responsible
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19)",
        )
        .bind(&event.session_id)
        .bind(&record.apartment)
        .bind(&record.checkin_date)
        .bind(record.night_count as i32)
        .bind(record.total_amount)
        .bind(guest.number as i32)
        .bind(&guest.surname)
        .bind(&guest.name)
        .bind(&guest.gender)
        .bind(&guest.birth_date)
        .bind(guest.age as i32)
        .bind(&guest.nationality)
        .bind(&guest.birthplace)
        .bind(&guest.municipality)
        .bind(&guest.province)
        .bind(&guest.document_type)
        .bind(&guest.document_number)
        .bind(&guest.issue_place)
        .bind(guest.is_responsible)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl LedgerSink for PgLedger {
    async fn append(&self, event: &PaymentEvent, record: &BookingRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_row(&mut tx, event, record, &record.primary_guest).await?;
        for guest in &record.other_guests {
            Self::insert_row(&mut tx, event, record, guest).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
