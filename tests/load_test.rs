//! Load testing for the relay.

use std::time::{Duration, Instant};

use serde_json::json;

mod common;

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    // 1. Upstream and relay
    let upstream = common::start_upstream(200, r#"{"pong":true}"#).await;
    let relay = common::start_default_relay().await;

    // 2. Mix of good and bad requests from many tasks at once
    let concurrency = 20;
    let requests_per_task = 10;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let relay_url = relay.url("/");
        let good = json!({ "url": upstream.url("/"), "data": { "task": task_id } }).to_string();
        tasks.push(tokio::spawn(async move {
            let mut latencies: Vec<Duration> = Vec::new();
            let mut rejected = 0;
            for i in 0..requests_per_task {
                let body = if i % 2 == 0 { good.clone() } else { "{}".to_string() };
                let req_start = Instant::now();
                let res = client.post(&relay_url).body(body).send().await.unwrap();
                match res.status().as_u16() {
                    200 => {
                        assert_eq!(res.text().await.unwrap(), r#"{"pong":true}"#);
                        latencies.push(req_start.elapsed());
                    }
                    400 => rejected += 1,
                    other => panic!("unexpected status {}", other),
                }
            }
            (latencies, rejected)
        }));
    }

    let mut all_latencies = Vec::new();
    let mut all_rejected = 0;
    for task in tasks {
        let (latencies, rejected) = task.await.unwrap();
        all_latencies.extend(latencies);
        all_rejected += rejected;
    }

    // 3. Exactly one outbound call per valid request, none for invalid ones
    assert_eq!(all_latencies.len(), total_requests / 2);
    assert_eq!(all_rejected, total_requests / 2);
    assert_eq!(upstream.calls().len(), total_requests / 2);

    let duration = start.elapsed();
    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p95 = all_latencies[(all_latencies.len() as f64 * 0.95) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P95 Latency:    {:?}", p95);
    println!("-------------------------\n");
}
