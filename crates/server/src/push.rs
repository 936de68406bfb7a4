//! Best-effort push notification dispatch.
//!
//! Delivery runs on a detached task after the ledger transaction has
//! committed. A failed or missing gateway never fails the request and is
//! never retried; the notification row in the store is the durable record.

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl Notifier {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Fire-and-forget delivery of `message` to the user's devices.
    pub fn dispatch(&self, user_id: &str, message: &str) {
        let Some(endpoint) = self.endpoint.clone() else {
            tracing::debug!("push gateway not configured, skipping dispatch");
            return;
        };

        let client = self.client.clone();
        let payload = serde_json::json!({
            "user_id": user_id,
            "message": message,
        });

        tokio::spawn(async move {
            match client.post(&endpoint).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("push gateway returned {}", response.status());
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("push dispatch failed: {err}"),
            }
        });
    }
}
