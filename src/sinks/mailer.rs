use crate::config::AppConfig;
use crate::domain::booking::BookingRecord;
use crate::sinks::Mailer;
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_header: String,
}

impl SmtpMailer {
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)
            .context("smtp relay setup failed")?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(
                cfg.smtp_username.clone(),
                cfg.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from_header: format!("{} <{}>", cfg.from_name, cfg.from_email),
        })
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<()> {
        let email = Message::builder()
            .from(self.from_header.parse().context("invalid from address")?)
            .to(to.parse().context("invalid to address")?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .context("failed to build email")?;

        self.transport.send(email).await.context("smtp send failed")?;
        Ok(())
    }
}

/// Booking summary sent to the operator: full guest table plus totals.
pub fn owner_summary_html(record: &BookingRecord) -> String {
    let mut guest_rows = String::new();
    for guest in std::iter::once(&record.primary_guest).chain(record.other_guests.iter()) {
        guest_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            guest.number, guest.surname, guest.name, guest.birth_date, guest.nationality,
            if guest.is_responsible { "yes" } else { "" },
        ));
    }

    format!(
        r#"<html><body style="font-family: Arial, sans-serif; color: #333;">
<h2>New confirmed booking</h2>
<p><b>Apartment:</b> {apartment}<br>
<b>Check-in:</b> {checkin}<br>
<b>Nights:</b> {nights}<br>
<b>Guests:</b> {guests}<br>
<b>Total:</b> {total:.2} EUR</p>
<table border="1" cellpadding="4" cellspacing="0">
<tr><th>#</th><th>Surname</th><th>Name</th><th>Born</th><th>Nationality</th><th>Responsible</th></tr>
{guest_rows}
</table>
<p style="color: #666; font-size: 12px;">Attached documents on file: {documents}</p>
</body></html>"#,
        apartment = record.apartment,
        checkin = record.checkin_date,
        nights = record.night_count,
        guests = record.guest_count,
        total = record.total_amount,
        guest_rows = guest_rows,
        documents = record.documents.len(),
    )
}

/// Confirmation sent to the paying guest.
pub fn guest_confirmation_html(record: &BookingRecord) -> String {
    format!(
        r#"<html><body style="font-family: Arial, sans-serif; color: #333;">
<h2>Your booking is confirmed</h2>
<p>Dear {name} {surname},</p>
<p>We have received your payment of <b>{total:.2} EUR</b>.</p>
<p><b>Apartment:</b> {apartment}<br>
<b>Check-in:</b> {checkin}<br>
<b>Nights:</b> {nights}</p>
<p>We look forward to welcoming you.</p>
</body></html>"#,
        name = record.primary_guest.name,
        surname = record.primary_guest.surname,
        total = record.total_amount,
        apartment = record.apartment,
        checkin = record.checkin_date,
        nights = record.night_count,
    )
}
