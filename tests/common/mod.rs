#![allow(dead_code)]

use crmgate::actions::ActionDispatcher;
use crmgate::intents::IntentBackend;
use crmgate::services::config::VendorConfig;
use crmgate::services::logger::Logger;
use crmgate::services::validation::Validation;
use crmgate::vendor::{
    OutboundRequest, TransportFailure, TransportReply, VendorClient, VendorTransport,
};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

/// Serializes tests that mutate process environment variables.
pub static ENV_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Transport double: replays a scripted reply sequence and records every
/// outbound request. Once the script runs out, the last reply repeats.
pub struct SpyTransport {
    script: Mutex<VecDeque<Result<TransportReply, TransportFailure>>>,
    fallback: Result<TransportReply, TransportFailure>,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl SpyTransport {
    pub fn replying(status: u16, body: Value) -> Arc<Self> {
        Self::sequence(vec![(status, body)])
    }

    pub fn sequence(replies: Vec<(u16, Value)>) -> Arc<Self> {
        let script: VecDeque<_> = replies
            .into_iter()
            .map(|(status, body)| {
                Ok(TransportReply {
                    status,
                    body: Some(body),
                })
            })
            .collect();
        let fallback = script
            .back()
            .cloned()
            .unwrap_or(Ok(TransportReply {
                status: 200,
                body: Some(serde_json::json!({"success": true, "data": null})),
            }));
        Arc::new(Self {
            script: Mutex::new(script),
            fallback,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(timed_out: bool) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(TransportFailure {
                message: "connection refused".to_string(),
                timed_out,
            }),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl VendorTransport for SpyTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportReply, TransportFailure> {
        self.seen.lock().unwrap().push(request);
        let mut script = self.script.lock().unwrap();
        script.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

pub fn dispatcher(transport: Arc<SpyTransport>) -> ActionDispatcher {
    let config = VendorConfig::new(
        Url::parse("https://vendor.test/v1").unwrap(),
        "test-token",
    );
    let client = Arc::new(VendorClient::with_transport(
        Logger::new("test"),
        Some(config),
        transport,
    ));
    ActionDispatcher::new(Logger::new("test"), Validation::new(), client)
}

pub fn intent_backend(
    transport: Arc<SpyTransport>,
    require_confirmation: bool,
) -> IntentBackend {
    IntentBackend::new(
        Logger::new("test"),
        Arc::new(dispatcher(transport)),
        require_confirmation,
    )
}

/// One vendor-shaped deals page.
pub fn deals_page(ids: &[u64], more: bool, next_start: u64, total: u64) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "title": format!("Deal {}", id), "stage_id": 1}))
        .collect();
    serde_json::json!({
        "success": true,
        "data": items,
        "additional_data": {
            "pagination": {
                "start": 0,
                "limit": ids.len(),
                "more_items_in_collection": more,
                "next_start": next_start,
                "total_items": total,
            }
        }
    })
}
