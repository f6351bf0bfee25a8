use booking_fanout::domain::booking::{BookingRecord, Guest};
use booking_fanout::domain::event::{EventType, PaymentEvent};
use booking_fanout::domain::report::SinkStatus;
use booking_fanout::error::PipelineError;
use booking_fanout::service::dispatcher::FanOutDispatcher;
use booking_fanout::sinks::{LedgerSink, Mailer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct MockLedger {
    fail: bool,
    appends: AtomicUsize,
}

#[async_trait::async_trait]
impl LedgerSink for MockLedger {
    async fn append(&self, _: &PaymentEvent, _: &BookingRecord) -> anyhow::Result<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

struct MockMailer {
    fail_recipients: Vec<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockMailer {
    fn new(fail_recipients: &[&str]) -> Self {
        Self {
            fail_recipients: fail_recipients.iter().map(|s| s.to_string()).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: String) -> anyhow::Result<()> {
        if self.fail_recipients.iter().any(|r| r == to) {
            anyhow::bail!("smtp send failed");
        }
        self.sent.lock().unwrap().push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

fn record() -> BookingRecord {
    BookingRecord {
        checkin_date: "2025-09-01".to_string(),
        apartment: "Trilocale A".to_string(),
        guest_count: 2,
        night_count: 3,
        group_type: None,
        total_amount: 250.0,
        timestamp: chrono::Utc::now(),
        primary_guest: Guest {
            number: 1,
            surname: "Rossi".to_string(),
            name: "Mario".to_string(),
            is_responsible: true,
            ..Guest::default()
        },
        other_guests: vec![Guest {
            number: 2,
            surname: "Rossi".to_string(),
            name: "Lucia".to_string(),
            ..Guest::default()
        }],
        documents: Vec::new(),
    }
}

fn event(customer_email: Option<&str>) -> PaymentEvent {
    PaymentEvent {
        id: "evt_1".to_string(),
        event_type: EventType::CheckoutSessionCompleted,
        session_id: "cs_abc123".to_string(),
        payment_status: "paid".to_string(),
        customer_email: customer_email.map(|s| s.to_string()),
        amount_total: 25000,
        metadata: HashMap::new(),
    }
}

fn dispatcher(ledger: Arc<MockLedger>, mailer: Arc<MockMailer>) -> FanOutDispatcher {
    FanOutDispatcher {
        ledger,
        mailer,
        owner_email: "owner@example.com".to_string(),
        ledger_timeout: Duration::from_secs(1),
        notify_timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn all_sinks_succeed() {
    let ledger = Arc::new(MockLedger { fail: false, appends: AtomicUsize::new(0) });
    let mailer = Arc::new(MockMailer::new(&[]));
    let d = dispatcher(ledger.clone(), mailer.clone());

    let report = d.dispatch(&event(Some("guest@example.com")), &record()).await.unwrap();
    assert_eq!(report.ledger, SinkStatus::Success);
    assert_eq!(report.owner_notification, SinkStatus::Success);
    assert_eq!(report.guest_notification, SinkStatus::Success);
    assert_eq!(ledger.appends.load(Ordering::SeqCst), 1);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "owner@example.com");
    assert_eq!(sent[1].0, "guest@example.com");
}

#[tokio::test]
async fn ledger_failure_aborts_before_notifications() {
    let ledger = Arc::new(MockLedger { fail: true, appends: AtomicUsize::new(0) });
    let mailer = Arc::new(MockMailer::new(&[]));
    let d = dispatcher(ledger, mailer.clone());

    let result = d.dispatch(&event(Some("guest@example.com")), &record()).await;
    assert!(matches!(result, Err(PipelineError::Ledger(_))));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn owner_failure_is_isolated() {
    let ledger = Arc::new(MockLedger { fail: false, appends: AtomicUsize::new(0) });
    let mailer = Arc::new(MockMailer::new(&["owner@example.com"]));
    let d = dispatcher(ledger, mailer.clone());

    let report = d.dispatch(&event(Some("guest@example.com")), &record()).await.unwrap();
    assert_eq!(report.ledger, SinkStatus::Success);
    assert!(matches!(report.owner_notification, SinkStatus::Failed(_)));
    assert_eq!(report.guest_notification, SinkStatus::Success);
}

#[tokio::test]
async fn guest_sink_skipped_without_recipient() {
    let ledger = Arc::new(MockLedger { fail: false, appends: AtomicUsize::new(0) });
    let mailer = Arc::new(MockMailer::new(&[]));
    let d = dispatcher(ledger, mailer.clone());

    let report = d.dispatch(&event(None), &record()).await.unwrap();
    assert_eq!(report.guest_notification, SinkStatus::Skipped("no recipient".to_string()));
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn hung_mailer_counts_as_failed() {
    struct HangingMailer;

    #[async_trait::async_trait]
    impl Mailer for HangingMailer {
        async fn send(&self, _: &str, _: &str, _: String) -> anyhow::Result<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    let d = FanOutDispatcher {
        ledger: Arc::new(MockLedger { fail: false, appends: AtomicUsize::new(0) }),
        mailer: Arc::new(HangingMailer),
        owner_email: "owner@example.com".to_string(),
        ledger_timeout: Duration::from_secs(1),
        notify_timeout: Duration::from_millis(20),
    };

    let report = d.dispatch(&event(None), &record()).await.unwrap();
    assert_eq!(report.owner_notification, SinkStatus::Failed("timed out".to_string()));
}

#[tokio::test]
async fn hung_ledger_counts_as_fatal() {
    struct HangingLedger;

    #[async_trait::async_trait]
    impl LedgerSink for HangingLedger {
        async fn append(&self, _: &PaymentEvent, _: &BookingRecord) -> anyhow::Result<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    let mailer = Arc::new(MockMailer::new(&[]));
    let d = FanOutDispatcher {
        ledger: Arc::new(HangingLedger),
        mailer: mailer.clone(),
        owner_email: "owner@example.com".to_string(),
        ledger_timeout: Duration::from_millis(20),
        notify_timeout: Duration::from_secs(1),
    };

    let started = std::time::Instant::now();
    let result = d.dispatch(&event(Some("guest@example.com")), &record()).await;
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(result, Err(PipelineError::Ledger(_))));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn notification_only_dispatch_never_touches_ledger() {
    let ledger = Arc::new(MockLedger { fail: false, appends: AtomicUsize::new(0) });
    let mailer = Arc::new(MockMailer::new(&[]));
    let d = dispatcher(ledger.clone(), mailer);

    let report = d.dispatch_notifications(&event(Some("guest@example.com")), &record()).await;
    assert_eq!(report.ledger, SinkStatus::Skipped("retry path".to_string()));
    assert_eq!(report.owner_notification, SinkStatus::Success);
    assert_eq!(ledger.appends.load(Ordering::SeqCst), 0);
}
