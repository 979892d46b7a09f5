use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use tokio::sync::Notify;

use super::*;
use crate::types::BridgeError;

// =========================================================================
// Mocks
// =========================================================================

/// Replays scripted results in order; counts calls.
struct MockInterpreter {
    results: Mutex<Vec<Result<String, BridgeError>>>,
    calls: AtomicUsize,
}

impl MockInterpreter {
    fn new(results: Vec<Result<String, BridgeError>>) -> Self {
        Self { results: Mutex::new(results), calls: AtomicUsize::new(0) }
    }
}

#[async_trait::async_trait]
impl Interpret for MockInterpreter {
    async fn interpret(&self, _snapshot: &Snapshot) -> Result<String, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut results = self.results.lock().unwrap();
        if results.is_empty() { Ok("done".into()) } else { results.remove(0) }
    }
}

/// Blocks until released, so tests can observe the pending state.
struct GatedInterpreter {
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl Interpret for GatedInterpreter {
    async fn interpret(&self, _snapshot: &Snapshot) -> Result<String, BridgeError> {
        self.gate.notified().await;
        Ok("a house".into())
    }
}

fn snapshot() -> Snapshot {
    Snapshot::from_data_uri(1, 1, "data:image/png;base64,AAAA".into())
}

// =========================================================================
// Status transitions
// =========================================================================

#[test]
fn starts_idle() {
    let submitter = Submitter::new(Arc::new(MockInterpreter::new(vec![])));
    assert_eq!(submitter.status(), SubmissionStatus::Idle);
    assert_eq!(*submitter.subscribe().borrow(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn success_publishes_text() {
    let submitter = Submitter::new(Arc::new(MockInterpreter::new(vec![Ok("a cat".into())])));
    let status = submitter.submit(snapshot()).await.unwrap();
    assert_eq!(status, SubmissionStatus::Succeeded("a cat".into()));
    assert_eq!(submitter.status().display_text(), "a cat");
}

#[tokio::test]
async fn every_error_collapses_to_failed() {
    let errors = vec![
        Err(BridgeError::Request("connection refused".into())),
        Err(BridgeError::Response { status: 500, body: "boom".into() }),
        Err(BridgeError::Parse("expected value".into())),
    ];
    let submitter = Submitter::new(Arc::new(MockInterpreter::new(errors)));
    for _ in 0..3 {
        assert_eq!(submitter.submit(snapshot()).await.unwrap(), SubmissionStatus::Failed);
        assert_eq!(submitter.status().display_text(), "Something went wrong while analyzing your drawing.");
    }
}

#[tokio::test]
async fn resubmission_replaces_previous_outcome() {
    let mock = Arc::new(MockInterpreter::new(vec![Err(BridgeError::Request("down".into())), Ok("a dog".into())]));
    let submitter = Submitter::new(mock.clone());
    assert_eq!(submitter.submit(snapshot()).await.unwrap(), SubmissionStatus::Failed);
    assert_eq!(submitter.submit(snapshot()).await.unwrap(), SubmissionStatus::Succeeded("a dog".into()));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pending_is_published_before_the_endpoint_answers() {
    let gate = Arc::new(Notify::new());
    let submitter = Arc::new(Submitter::new(Arc::new(GatedInterpreter { gate: gate.clone() })));
    let mut rx = submitter.subscribe();

    let task = {
        let submitter = submitter.clone();
        tokio::spawn(async move { submitter.submit(snapshot()).await })
    };

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), SubmissionStatus::Pending);

    gate.notify_one();
    let status = task.await.unwrap().unwrap();
    assert_eq!(status, SubmissionStatus::Succeeded("a house".into()));

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), SubmissionStatus::Succeeded("a house".into()));
}

#[tokio::test]
async fn every_submission_reenters_pending() {
    let gate = Arc::new(Notify::new());
    let submitter = Arc::new(Submitter::new(Arc::new(GatedInterpreter { gate: gate.clone() })));
    let mut rx = submitter.subscribe();

    for _ in 0..2 {
        let task = {
            let submitter = submitter.clone();
            tokio::spawn(async move { submitter.submit(snapshot()).await })
        };
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SubmissionStatus::Pending);

        gate.notify_one();
        task.await.unwrap().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SubmissionStatus::Succeeded("a house".into()));
    }
}

// =========================================================================
// Overlap
// =========================================================================

#[tokio::test]
async fn overlapping_submission_is_rejected() {
    let gate = Arc::new(Notify::new());
    let submitter = Arc::new(Submitter::new(Arc::new(GatedInterpreter { gate: gate.clone() })));
    let mut rx = submitter.subscribe();

    let first = {
        let submitter = submitter.clone();
        tokio::spawn(async move { submitter.submit(snapshot()).await })
    };
    rx.changed().await.unwrap();

    assert_eq!(submitter.submit(snapshot()).await, Err(SubmitError::InFlight));
    assert_eq!(submitter.status(), SubmissionStatus::Pending);

    gate.notify_one();
    first.await.unwrap().unwrap();

    // The slot is free again once the first one finished.
    gate.notify_one();
    assert_eq!(submitter.submit(snapshot()).await, Ok(SubmissionStatus::Succeeded("a house".into())));
}

#[tokio::test]
async fn dropped_submission_fails_and_frees_the_slot() {
    let gate = Arc::new(Notify::new());
    let submitter = Submitter::new(Arc::new(GatedInterpreter { gate: gate.clone() }));
    let mut rx = submitter.subscribe();
    let abandoned = tokio::time::timeout(std::time::Duration::from_millis(20), submitter.submit(snapshot())).await;
    assert!(abandoned.is_err());

    // Pending was published, then the abandoned submission settled as failed.
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SubmissionStatus::Failed);
    assert_eq!(submitter.status().display_text(), "Something went wrong while analyzing your drawing.");

    gate.notify_one();
    assert_eq!(submitter.submit(snapshot()).await, Ok(SubmissionStatus::Succeeded("a house".into())));
}
