//! Unit tests for synchronous-to-asynchronous dispatch.

use std::sync::Arc;

use crate::delivery::{AlwaysQueue, DispatchPolicy, QueuedSender, SmsSender};
use crate::domain::DeliveryStatus;
use crate::errors::{QueueError, SendError};

use super::mocks::{FailingQueue, InMemoryQueue, RecordingSender};

struct NeverQueue;

impl DispatchPolicy for NeverQueue {
    fn should_queue(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn always_queue_policy_parks_the_message() {
    let queue = Arc::new(InMemoryQueue::new(60));
    let direct = Arc::new(RecordingSender::succeeding());
    let sender = QueuedSender::new(queue.clone(), direct.clone(), AlwaysQueue, 3);

    sender
        .send(
            "1932694",
            &["123456".to_string()],
            &["17812345678".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(direct.calls(), 0);
    let items = queue.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].template_id, "1932694");
    assert_eq!(items[0].args, vec!["123456".to_string()]);
    assert_eq!(items[0].recipients, vec!["17812345678".to_string()]);
    assert_eq!(items[0].max_retries, 3);
    assert_eq!(items[0].status, DeliveryStatus::Waiting);
}

#[tokio::test]
async fn direct_policy_bypasses_the_queue() {
    let queue = Arc::new(InMemoryQueue::new(60));
    let direct = Arc::new(RecordingSender::succeeding());
    let sender = QueuedSender::new(queue.clone(), direct.clone(), NeverQueue, 3);

    sender.send("tpl", &[], &[]).await.unwrap();

    assert_eq!(direct.calls(), 1);
    assert!(queue.snapshot().is_empty());
}

#[tokio::test]
async fn enqueue_failure_surfaces_as_queue_error() {
    let queue = Arc::new(FailingQueue);
    let direct = Arc::new(RecordingSender::succeeding());
    let sender = QueuedSender::new(queue, direct, AlwaysQueue, 3);

    let err = sender.send("tpl", &[], &[]).await.unwrap_err();

    assert!(matches!(err, SendError::Queue(QueueError::Unavailable(_))));
}
