//! End-to-end demo of the verification flow against in-process backings.
//!
//! Run with: cargo run -p vr_infra --example verification_demo

use std::sync::Arc;

use chrono::Duration;

use vr_core::verification::{CodeService, CodeServiceConfig};
use vr_infra::cache::LocalCodeStore;
use vr_infra::sms::MockSmsSender;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let store = Arc::new(LocalCodeStore::new(1024, Duration::minutes(10)));
    let sender = Arc::new(MockSmsSender::new());
    let service = CodeService::new(store, sender.clone(), CodeServiceConfig::default());

    let scope = "login";
    let recipient = "17812345678";

    service.send(scope, recipient).await.expect("send failed");
    println!("code issued, {} message(s) delivered", sender.sent_count());

    // An immediate resend trips the quota.
    match service.send(scope, recipient).await {
        Err(err) => println!("immediate resend rejected: {err}"),
        Ok(()) => println!("unexpected: resend admitted"),
    }

    let verified = service
        .verify(scope, recipient, "000000")
        .await
        .expect("verify failed");
    println!("wrong guess accepted: {verified}");
}
