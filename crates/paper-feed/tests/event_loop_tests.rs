//! Event loop tests: independent chains, draining and overlapping loads.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_feed::app::SAVE_SUCCESS_MESSAGE;
use paper_feed::page::lock;
use paper_feed::render::ControlKind;
use paper_feed::{EventLoop, LoadOutcome, UiEvent};

mod common;
use common::{sample_paper_json, setup_app};

#[tokio::test]
async fn test_ready_loads_and_loop_drains_on_close() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00001v1", "Ready", 1.0)]))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let t = setup_app(&mock_server);
    let (events, event_loop) = EventLoop::channel(t.app.clone(), 8);
    let running = tokio::spawn(event_loop.run());

    events.send(UiEvent::Ready).await.unwrap();
    drop(events);

    // The loop only returns after the delayed load has finished.
    assert_eq!(running.await.unwrap(), 1);
    assert!(lock(t.app.page()).papers_html().contains("Ready"));
}

#[tokio::test]
async fn test_save_does_not_wait_for_slow_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00001v1", "Slow", 1.0)]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/save_paper"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let t = setup_app(&mock_server);
    lock(t.app.page()).save_form_mut().set_paper_id("abs/1234");

    let (events, event_loop) = EventLoop::channel(t.app.clone(), 8);
    let running = tokio::spawn(event_loop.run());

    events.send(UiEvent::Ready).await.unwrap();
    events.send(UiEvent::submit_save_form(t.app.page())).await.unwrap();

    // The save chain finishes while the list request is still outstanding.
    let mut saved = false;
    for _ in 0..40 {
        if !t.notifier.messages().is_empty() {
            saved = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(saved, "save should complete before the slow load");
    assert_eq!(lock(t.app.page()).generation(), 0);

    drop(events);
    assert_eq!(running.await.unwrap(), 2);
    assert_eq!(t.notifier.messages(), vec![SAVE_SUCCESS_MESSAGE]);
    assert_eq!(lock(t.app.page()).generation(), 1);
}

#[tokio::test]
async fn test_overlapping_loads_last_response_wins() {
    let mock_server = MockServer::start().await;

    // First request: slow answer.
    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00001v1", "Slow answer", 1.0)]))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    // Second request: fast answer.
    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00002v1", "Fast answer", 2.0)])),
        )
        .mount(&mock_server)
        .await;

    let t = setup_app(&mock_server);

    let first = tokio::spawn({
        let app = t.app.clone();
        async move { app.load_papers().await }
    });

    // Make sure the slow request is the one that reached the server first.
    for _ in 0..100 {
        if mock_server.received_requests().await.is_some_and(|r| !r.is_empty()) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert_eq!(t.app.load_papers().await, LoadOutcome::Rendered(1));
    assert!(lock(t.app.page()).papers_html().contains("Fast answer"));

    assert_eq!(first.await.unwrap(), LoadOutcome::Rendered(1));

    let page = lock(t.app.page());
    assert!(page.papers_html().contains("Slow answer"));
    assert!(!page.papers_html().contains("Fast answer"));
    assert_eq!(page.generation(), 2);
}

#[tokio::test]
async fn test_concurrent_clicks_all_complete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_paper_json("2410.00001v1", "One", 1.0),
            sample_paper_json("2410.00002v1", "Two", 0.5),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/save_paper"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let t = setup_app(&mock_server);
    t.app.load_papers().await;

    // Save buttons sit at even indices.
    let results = futures::future::join_all([t.app.click(1, 0), t.app.click(1, 2)]).await;

    assert!(results.iter().all(|r| matches!(r, Some(Ok(())))));
    assert_eq!(t.notifier.messages().len(), 2);
}

#[tokio::test]
async fn test_each_submit_sends_its_own_form_value() {
    let mock_server = MockServer::start().await;

    for paper_id in ["abs/AAAA", "abs/BBBB"] {
        Mock::given(method("POST"))
            .and(path("/save_paper"))
            .and(body_json(json!({ "paper_id": paper_id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let t = setup_app(&mock_server);
    let (events, event_loop) = EventLoop::channel(t.app.clone(), 8);

    // Both submits are queued before the loop starts handling either.
    lock(t.app.page()).save_form_mut().set_paper_id("abs/AAAA");
    events.send(UiEvent::submit_save_form(t.app.page())).await.unwrap();
    lock(t.app.page()).save_form_mut().set_paper_id("abs/BBBB");
    events.send(UiEvent::submit_save_form(t.app.page())).await.unwrap();
    drop(events);

    assert_eq!(event_loop.run().await, 2);

    let mut bodies: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect();
    bodies.sort();
    assert_eq!(bodies, vec![r#"{"paper_id":"abs/AAAA"}"#, r#"{"paper_id":"abs/BBBB"}"#]);
}

#[tokio::test]
async fn test_click_queued_before_reload_does_not_hit_new_render() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00001v1", "Old", 1.0)])),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_paper_json("2410.00002v1", "New", 1.0)])),
        )
        .mount(&mock_server)
        .await;

    let t = setup_app(&mock_server);
    t.app.load_papers().await;
    let click = UiEvent::click(t.app.page(), 0, ControlKind::CopyLink).unwrap();

    t.app.load_papers().await;

    let (events, event_loop) = EventLoop::channel(t.app.clone(), 8);
    events.send(click).await.unwrap();
    drop(events);
    assert_eq!(event_loop.run().await, 1);

    assert_eq!(t.clipboard.contents(), None);
    assert!(lock(t.app.page()).papers_html().contains("New"));
}
