use super::*;
use crate::error::MailmateError;
use crate::gateway::{DeleteOutcome, ReplyDraft};
use crate::intent::EmailIndex;
use crate::session::Identity;
use crate::transcript::Author;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;

// Mock EmailGateway for testing
#[derive(Default)]
struct MockGateway {
    listing: Mutex<Option<Result<Value>>>,
    reply: Mutex<Option<Result<ReplyDraft>>>,
    delete: Mutex<Option<Result<DeleteOutcome>>>,
    hang: bool,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    fn with_listing(listing: Result<Value>) -> Self {
        Self {
            listing: Mutex::new(Some(listing)),
            ..Default::default()
        }
    }

    fn with_reply(reply: Result<ReplyDraft>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            ..Default::default()
        }
    }

    fn with_delete(delete: Result<DeleteOutcome>) -> Self {
        Self {
            delete: Mutex::new(Some(delete)),
            ..Default::default()
        }
    }

    fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take<T: Clone>(slot: &Mutex<Option<Result<T>>>) -> Result<T> {
        slot.lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(MailmateError::internal("no canned response")))
    }
}

#[async_trait::async_trait]
impl EmailGateway for MockGateway {
    async fn identify(&self) -> Result<Identity> {
        self.record("identify".to_string());
        Ok(Identity::Authenticated(Session::new("Ann")))
    }

    async fn list_recent(&self) -> Result<Value> {
        self.record("list_recent".to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        Self::take(&self.listing)
    }

    async fn reply(&self, index: EmailIndex) -> Result<ReplyDraft> {
        self.record(format!("reply({index})"));
        Self::take(&self.reply)
    }

    async fn delete(&self, index: EmailIndex) -> Result<DeleteOutcome> {
        self.record(format!("delete({index})"));
        Self::take(&self.delete)
    }

    async fn logout(&self) -> Result<String> {
        self.record("logout".to_string());
        Ok("http://localhost:3000".to_string())
    }

    fn login_url(&self) -> String {
        "http://localhost:8000/auth/google/login".to_string()
    }
}

// Sink that records every notification as a short string
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl TranscriptSink for RecordingSink {
    fn entry_appended(&self, entry: &ChatEntry, pending: bool) {
        let kind = if pending { "pending" } else { "append" };
        self.events
            .lock()
            .unwrap()
            .push(format!("{kind}:{:?}:{}", entry.author, entry.text));
    }

    fn last_replaced(&self, entry: &ChatEntry) {
        self.events
            .lock()
            .unwrap()
            .push(format!("replace:{:?}:{}", entry.author, entry.text));
    }
}

fn controller_with(gateway: Arc<MockGateway>) -> (ConversationController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let controller =
        ConversationController::start(gateway, Session::new("Ann"), sink.clone()).unwrap();
    (controller, sink)
}

fn texts(controller: &ConversationController) -> Vec<String> {
    controller
        .transcript()
        .snapshot()
        .into_iter()
        .map(|entry| entry.text)
        .collect()
}

#[test]
fn test_start_seeds_single_welcome() {
    let (controller, sink) = controller_with(Arc::new(MockGateway::default()));

    let entries = controller.transcript().snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].author, Author::Bot);
    assert!(entries[0].text.starts_with("Hi Ann!"));
    assert!(!controller.is_awaiting());
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let gateway = Arc::new(MockGateway::default());
    let (mut controller, _sink) = controller_with(gateway.clone());

    assert_eq!(controller.submit("").await.unwrap(), TurnOutcome::Empty);
    assert_eq!(controller.submit("   \t").await.unwrap(), TurnOutcome::Empty);

    assert_eq!(controller.transcript().len(), 1);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_show_emails_renders_listing() {
    let gateway = Arc::new(MockGateway::with_listing(Ok(json!([
        { "sender": "Ann", "subject": "Hi", "summary": "short note" }
    ]))));
    let (mut controller, sink) = controller_with(gateway.clone());

    let outcome = controller.submit("show emails").await.unwrap();

    assert_eq!(outcome, TurnOutcome::Resolved(Intent::ListRecent));
    assert_eq!(gateway.calls(), vec!["list_recent"]);
    assert_eq!(
        texts(&controller)[1..],
        [
            "show emails".to_string(),
            "Here's what you have:\n\n1. Ann\n   Hi\n   short note\n\n".to_string(),
        ]
    );
    assert!(!controller.is_awaiting());

    let events = sink.events();
    assert_eq!(events[1], "append:User:show emails");
    assert_eq!(events[2], "pending:Bot:📧 Fetching your latest emails...");
    assert!(events[3].starts_with("replace:Bot:Here's what you have:"));
}

#[tokio::test]
async fn test_delete_renders_status_verbatim() {
    let gateway = Arc::new(MockGateway::with_delete(Ok(DeleteOutcome {
        status: "Email not found".to_string(),
    })));
    let (mut controller, _sink) = controller_with(gateway.clone());

    let outcome = controller.submit("delete 9").await.unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Resolved(Intent::Delete {
            index: EmailIndex::new(9)
        })
    );
    assert_eq!(gateway.calls(), vec!["delete(9)"]);
    assert_eq!(texts(&controller).last().unwrap(), "Email not found");
}

#[tokio::test]
async fn test_reply_renders_draft() {
    let gateway = Arc::new(MockGateway::with_reply(Ok(ReplyDraft {
        reply: "Sounds good.".to_string(),
    })));
    let (mut controller, _sink) = controller_with(gateway.clone());

    controller.submit("Reply 2").await.unwrap();

    assert_eq!(gateway.calls(), vec!["reply(2)"]);
    assert_eq!(
        texts(&controller).last().unwrap(),
        "✅ Reply generated:\n\nSounds good.\n\nWould you like to send this?"
    );
}

#[tokio::test]
async fn test_reply_without_index_forwards_nan() {
    let gateway = Arc::new(MockGateway::with_reply(Err(MailmateError::status(
        400,
        "Invalid index",
    ))));
    let (mut controller, sink) = controller_with(gateway.clone());

    let outcome = controller.submit("reply").await.unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Failed(Intent::Reply {
            index: EmailIndex::NAN
        })
    );
    assert_eq!(gateway.calls(), vec!["reply(NaN)"]);
    assert!(
        sink.events()
            .contains(&"pending:Bot:✍️ Generating reply for email #NaN...".to_string())
    );
    assert_eq!(texts(&controller).last().unwrap(), format::GENERIC_FAILURE);
}

#[tokio::test]
async fn test_gateway_failure_recovers_for_next_turn() {
    let gateway = Arc::new(MockGateway::with_listing(Err(MailmateError::transport(
        "connection refused",
    ))));
    let (mut controller, _sink) = controller_with(gateway.clone());

    let outcome = controller.submit("read emails").await.unwrap();
    assert_eq!(outcome, TurnOutcome::Failed(Intent::ListRecent));
    assert_eq!(texts(&controller).last().unwrap(), format::GENERIC_FAILURE);
    assert!(!controller.is_awaiting());
    assert_eq!(controller.transcript().len(), 3);

    let outcome = controller.submit("hello").await.unwrap();
    assert_eq!(outcome, TurnOutcome::Guided);
    assert_eq!(controller.transcript().len(), 5);
}

#[tokio::test]
async fn test_unknown_input_needs_no_gateway() {
    let gateway = Arc::new(MockGateway::default());
    let (mut controller, sink) = controller_with(gateway.clone());

    let outcome = controller.submit("hello there").await.unwrap();

    assert_eq!(outcome, TurnOutcome::Guided);
    assert!(gateway.calls().is_empty());
    assert_eq!(texts(&controller).last().unwrap(), format::UNKNOWN_COMMAND);
    assert!(!controller.is_awaiting());
    assert!(!sink.events().iter().any(|e| e.starts_with("pending:")));
}

#[tokio::test]
async fn test_repeated_listing_is_not_merged() {
    let gateway = Arc::new(MockGateway::with_listing(Ok(json!([
        { "sender": "Ann", "subject": "Hi", "summary": "short note" }
    ]))));
    let (mut controller, _sink) = controller_with(gateway.clone());

    controller.submit("show emails").await.unwrap();
    controller.submit("show emails").await.unwrap();

    let all = texts(&controller);
    assert_eq!(all.len(), 5);
    assert_eq!(all[2], all[4]);
    assert_eq!(gateway.calls(), vec!["list_recent", "list_recent"]);
}

#[tokio::test]
async fn test_each_turn_adds_two_entries() {
    let gateway = Arc::new(MockGateway::with_listing(Ok(json!([]))));
    let (mut controller, _sink) = controller_with(gateway);

    let turns = 4;
    for _ in 0..turns {
        controller.submit("last 5").await.unwrap();
        assert!(!controller.is_awaiting());
    }

    assert_eq!(controller.transcript().len(), 1 + 2 * turns);
}

#[tokio::test]
async fn test_abandoned_request_keeps_controller_busy() {
    let gateway = Arc::new(MockGateway::hanging());
    let (mut controller, _sink) = controller_with(gateway.clone());

    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), controller.submit("show emails")).await;
    assert!(abandoned.is_err());

    assert!(controller.is_awaiting());
    assert_eq!(
        controller.transcript().pending_entry().unwrap().text,
        "📧 Fetching your latest emails..."
    );

    assert_eq!(controller.submit("delete 1").await.unwrap(), TurnOutcome::Busy);
    assert_eq!(controller.transcript().len(), 3);
    assert_eq!(gateway.calls(), vec!["list_recent"]);
}

#[tokio::test]
async fn test_logout_returns_redirect_target() {
    let gateway = Arc::new(MockGateway::default());
    let (controller, _sink) = controller_with(gateway.clone());

    let target = controller.logout().await.unwrap();

    assert_eq!(target, "http://localhost:3000");
    assert_eq!(gateway.calls(), vec!["logout"]);
}
