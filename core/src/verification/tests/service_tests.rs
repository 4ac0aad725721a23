//! Unit tests for the verification code service

use std::sync::Arc;

use crate::errors::DomainError;
use crate::verification::{CodeService, CodeServiceConfig};

use super::mocks::{MockCodeStore, RecordingSmsSender, SenderMode};

fn service(
    store: Arc<MockCodeStore>,
    sender: Arc<RecordingSmsSender>,
) -> CodeService<MockCodeStore, RecordingSmsSender> {
    CodeService::new(store, sender, CodeServiceConfig::default())
}

#[tokio::test]
async fn send_stores_and_delivers_the_same_code() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(store.clone(), sender.clone());

    service.send("login", "17812345678").await.unwrap();

    let stored = store.stored_code("login", "17812345678").unwrap();
    assert_eq!(stored.len(), 6);
    assert!(stored.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(sender.sent_code(), Some(stored));

    let (template_id, _, recipients) = sender.last.lock().unwrap().clone().unwrap();
    assert_eq!(template_id, "1932694");
    assert_eq!(recipients, vec!["17812345678".to_string()]);
}

#[tokio::test]
async fn send_too_frequent_propagates_unchanged() {
    let mut store = MockCodeStore::new();
    store.reject_too_frequent = true;
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(Arc::new(store), sender.clone());

    let err = service.send("login", "17812345678").await.unwrap_err();

    assert!(matches!(err, DomainError::SendTooFrequent));
    assert!(sender.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn storage_outage_becomes_internal_error() {
    let mut store = MockCodeStore::new();
    store.fail_storage = true;
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(Arc::new(store), sender);

    let err = service.send("login", "17812345678").await.unwrap_err();

    assert!(matches!(err, DomainError::Internal { .. }));
}

#[tokio::test]
async fn rate_limited_delivery_propagates_as_rate_limited() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::RateLimited));
    let service = service(store, sender);

    let err = service.send("login", "17812345678").await.unwrap_err();

    assert!(matches!(err, DomainError::RateLimited));
}

#[tokio::test]
async fn provider_failure_becomes_internal_error() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::ProviderDown));
    let service = service(store, sender);

    let err = service.send("login", "17812345678").await.unwrap_err();

    assert!(matches!(err, DomainError::Internal { .. }));
}

#[tokio::test]
async fn sent_code_verifies_immediately() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(store, sender.clone());

    service.send("login", "17812345678").await.unwrap();
    let code = sender.sent_code().unwrap();

    let verified = service.verify("login", "17812345678", &code).await.unwrap();
    assert!(verified);
}

#[tokio::test]
async fn wrong_guesses_consume_attempts_until_exhausted() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(store, sender.clone());

    service.send("login", "17812345678").await.unwrap();
    let code = sender.sent_code().unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..3 {
        let verified = service
            .verify("login", "17812345678", wrong)
            .await
            .unwrap();
        assert!(!verified);
    }

    // Even the correct code fails once the attempt budget is spent.
    let err = service
        .verify("login", "17812345678", &code)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TooManyAttempts));
}

#[tokio::test]
async fn verify_unknown_key_reports_not_found() {
    let store = Arc::new(MockCodeStore::new());
    let sender = Arc::new(RecordingSmsSender::new(SenderMode::Succeed));
    let service = service(store, sender);

    let err = service
        .verify("login", "17812345678", "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::CodeNotFound));
}
