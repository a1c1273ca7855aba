//! Id assignment under concurrent calls on one shared client
//!
//! Uses an in-memory transport that yields before answering, so calls from
//! many tasks interleave while their requests are in flight.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use turul_json_rpc_client::prelude::*;

/// Answers every request with its own id as the result
#[derive(Default)]
struct EchoIdTransport {
    delivered: AtomicUsize,
}

#[async_trait]
impl Transport for EchoIdTransport {
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError> {
        let parsed: Value = serde_json::from_slice(&request.body)
            .map_err(|e| TransportError::Other(e.to_string()))?;
        tokio::task::yield_now().await;
        self.delivered.fetch_add(1, Ordering::SeqCst);

        let id = parsed["id"].clone();
        serde_json::to_vec(&json!({"jsonrpc": "2.0", "result": id, "id": id}))
            .map_err(|e| TransportError::Other(e.to_string()))
    }
}

fn shared_client() -> (Arc<RpcClient>, Arc<EchoIdTransport>) {
    let transport = Arc::new(EchoIdTransport::default());
    let client = RpcClient::builder()
        .with_shared_transport(transport.clone())
        .build()
        .expect("client builds with a transport");
    (Arc::new(client), transport)
}

async fn run_concurrently(client: &Arc<RpcClient>, tasks: usize, calls: usize) -> Result<Vec<i64>> {
    let handles: Vec<_> = (0..tasks)
        .map(|task| {
            let client = client.clone();
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(calls);
                for call in 0..calls {
                    let response = client.call("work", (task, call)).await?;
                    ids.push(response.get_int()?);
                }
                Ok::<_, RpcClientError>(ids)
            })
        })
        .collect();

    let mut all = Vec::new();
    for result in futures::future::join_all(handles).await {
        all.extend(result??);
    }
    Ok(all)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ids_are_unique_and_contiguous() -> Result<()> {
    let (client, transport) = shared_client();
    let tasks = 16;
    let calls = 50;

    let ids = run_concurrently(&client, tasks, calls).await?;
    let unique: HashSet<i64> = ids.iter().copied().collect();

    assert_eq!(ids.len(), tasks * calls);
    assert_eq!(unique.len(), tasks * calls, "duplicate ids were assigned");
    assert_eq!(unique, (0..(tasks * calls) as i64).collect::<HashSet<_>>());
    assert_eq!(transport.delivered.load(Ordering::SeqCst), tasks * calls);
    assert_eq!(client.next_id(), RequestId::Number((tasks * calls) as i64));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_run_starts_at_manual_id() -> Result<()> {
    let (client, _) = shared_client();
    client.set_next_id(1_000);

    let ids = run_concurrently(&client, 8, 25).await?;
    let unique: HashSet<i64> = ids.into_iter().collect();

    assert_eq!(unique, (1_000..1_200).collect::<HashSet<_>>());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_frozen_id_is_shared_by_concurrent_calls() -> Result<()> {
    let (client, _) = shared_client();
    client.set_next_id(42);
    client.set_auto_increment_id(false);

    let ids = run_concurrently(&client, 8, 10).await?;

    assert_eq!(ids.len(), 80);
    assert!(ids.iter().all(|id| *id == 42));
    assert_eq!(client.next_id(), RequestId::Number(42));
    Ok(())
}
