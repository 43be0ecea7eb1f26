//! Integration tests for route-planner
//!
//! Drive the built binary and the library against a mock Kakao server, so no
//! real API key or network access is needed.

use std::process::{Output, Stdio};

use route_planner::{
    Error, KakaoClient, ProviderConfig, RetryPolicy, RouteKind, RoutePlanner, SceneRenderer,
};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BINARY: &str = env!("CARGO_BIN_EXE_route-planner");

/// Run the binary with a clean environment for the provider settings
async fn run_planner(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = tokio::process::Command::new(BINARY);
    cmd.args(args)
        .env_remove("KAKAO_REST_API_KEY")
        .env_remove("ROUTE_PLANNER_BASE_URL")
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().await.expect("Failed to run route-planner")
}

/// Run the binary at its prompt, feeding `input` on stdin
async fn run_prompt(args: &[&str], envs: &[(&str, &str)], input: &str) -> Output {
    let mut cmd = tokio::process::Command::new(BINARY);
    cmd.args(args)
        .env_remove("KAKAO_REST_API_KEY")
        .env_remove("ROUTE_PLANNER_BASE_URL")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("Failed to spawn route-planner");
    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);
    child.wait_with_output().await.expect("Failed to run route-planner")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Mount keyword search results for the given places
async fn mount_places(server: &MockServer, places: &[(&str, f64, f64)]) {
    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(server)
        .await;

    for (name, lat, lng) in places {
        Mock::given(method("GET"))
            .and(path("/v2/local/search/keyword.json"))
            .and(query_param("query", *name))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [{ "place_name": name, "x": lng.to_string(), "y": lat.to_string() }]
            })))
            .mount(server)
            .await;
    }
}

/// Mount a directions endpoint answering every request with the same route
async fn mount_directions(server: &MockServer, distance: f64, duration: f64) {
    Mock::given(method("POST"))
        .and(path("/v1/waypoints/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routes": [{
                "result_code": 0,
                "result_msg": "OK",
                "summary": { "distance": distance, "duration": duration },
                "sections": [{ "roads": [{ "vertexes": [126.970, 37.554, 127.028, 37.498] }] }]
            }]
        })))
        .mount(server)
        .await;
}

fn seoul_places() -> Vec<(&'static str, f64, f64)> {
    vec![
        ("서울역", 37.554, 126.970),
        ("홍대입구역", 37.557, 126.924),
        ("강남역", 37.498, 127.028),
    ]
}

fn mock_client(server: &MockServer) -> KakaoClient {
    let mut config = ProviderConfig::with_api_key("test-key").with_base_url(&server.uri());
    config.retry = RetryPolicy {
        max_retries: 0,
        ..Default::default()
    };
    KakaoClient::new(config).unwrap()
}

#[tokio::test]
async fn test_dry_run_reports_requests() {
    let output = run_planner(
        &["서울역", "홍대입구역", "강남역", "--alternatives", "--dry-run"],
        &[],
    )
    .await;

    assert!(output.status.success(), "Dry run should succeed: {}", stderr(&output));
    let stderr = stderr(&output);
    assert!(stderr.contains("DRY RUN"), "Expected DRY RUN indicator");
    assert!(stderr.contains("Would geocode stop 2: 홍대입구역"));
    assert!(stderr.contains("Would request 4 route(s) through 3 stops (1 waypoint(s))"));
}

#[tokio::test]
async fn test_missing_api_key_fails() {
    let output = run_planner(&["서울역", "강남역"], &[]).await;

    assert!(!output.status.success(), "Run without a key should fail");
    assert!(stderr(&output).contains("API key"), "stderr: {}", stderr(&output));
}

#[tokio::test]
async fn test_single_stop_is_not_routable() {
    let output = run_planner(&["서울역", "--api-key", "test-key"], &[]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("At least 2 stops"));
}

#[tokio::test]
async fn test_binary_finds_alternatives() {
    let server = MockServer::start().await;
    mount_places(&server, &seoul_places()).await;
    mount_directions(&server, 15_320.0, 2_710.0).await;

    let output = run_planner(
        &["서울역", "홍대입구역", "강남역", "--alternatives", "--quiet"],
        &[
            ("KAKAO_REST_API_KEY", "test-key"),
            ("ROUTE_PLANNER_BASE_URL", &server.uri()),
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("optimal: 15.3 km, 45 min, 1 waypoint(s)"), "stdout: {stdout}");
    assert!(stdout.contains("routes: [1*] [2] [3] [4]"), "stdout: {stdout}");
    assert!(stdout.contains("2. 홍대입구역"), "stdout: {stdout}");

    let directions = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/v1/waypoints/directions")
        .count();
    assert_eq!(directions, 4);
}

#[tokio::test]
async fn test_binary_reports_unknown_place() {
    let server = MockServer::start().await;
    mount_places(&server, &seoul_places()).await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&server)
        .await;

    let output = run_planner(
        &["서울역", "아틀란티스", "--quiet"],
        &[
            ("KAKAO_REST_API_KEY", "test-key"),
            ("ROUTE_PLANNER_BASE_URL", &server.uri()),
        ],
    )
    .await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Location not found"));
}

#[tokio::test]
async fn test_interactive_keeps_going_after_unknown_start_stop() {
    let server = MockServer::start().await;
    mount_places(&server, &seoul_places()).await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&server)
        .await;

    let output = run_prompt(
        &["아틀란티스", "서울역", "--interactive", "--quiet"],
        &[
            ("KAKAO_REST_API_KEY", "test-key"),
            ("ROUTE_PLANNER_BASE_URL", &server.uri()),
        ],
        "list\nquit\n",
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Location not found"));
    let stdout = stdout(&output);
    assert!(stdout.contains("route> "), "stdout: {stdout}");
    assert!(stdout.contains("1. 서울역"), "stdout: {stdout}");
    assert!(!stdout.contains("2. "), "stdout: {stdout}");
}

#[tokio::test]
async fn test_planner_end_to_end() {
    let server = MockServer::start().await;
    mount_places(&server, &seoul_places()).await;
    mount_directions(&server, 9_870.0, 1_500.0).await;

    let client = mock_client(&server);
    let mut planner = RoutePlanner::new(client.clone(), client, SceneRenderer::new());

    for (name, _, _) in seoul_places() {
        planner.on_add_stop(name).await.unwrap();
    }
    assert_eq!(planner.renderer().labels(), vec![1, 2, 3]);

    planner.on_remove_stop(1).unwrap();
    let names: Vec<String> = planner
        .stops()
        .current_stops()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["서울역", "강남역"]);
    assert_eq!(planner.renderer().labels(), vec![1, 2]);

    let summary = planner.find_alternative_routes().await.unwrap();
    assert_eq!(summary.kind, RouteKind::Optimal);
    assert_eq!(summary.distance_km, 9.9);
    assert_eq!(summary.duration_minutes, 25);
    assert_eq!(summary.waypoints, 0);
    assert_eq!(planner.routes().len(), 4);

    let summary = planner.select_route(3).unwrap();
    assert_eq!(summary.kind, RouteKind::Alt3);
}

#[tokio::test]
async fn test_planner_alternatives_fail_as_a_batch() {
    let server = MockServer::start().await;
    mount_places(&server, &seoul_places()).await;

    // Only the toll-free variant has no route
    Mock::given(method("POST"))
        .and(path("/v1/waypoints/directions"))
        .respond_with(|req: &wiremock::Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap_or_default();
            if body.get("avoid").is_some() {
                ResponseTemplate::new(200).set_body_json(json!({
                    "routes": [{ "result_code": 105, "result_msg": "no route without toll roads" }]
                }))
            } else {
                ResponseTemplate::new(200).set_body_json(json!({
                    "routes": [{
                        "result_code": 0,
                        "summary": { "distance": 1000, "duration": 120 },
                        "sections": []
                    }]
                }))
            }
        })
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let mut planner = RoutePlanner::new(client.clone(), client, SceneRenderer::new());
    planner.on_add_stop("서울역").await.unwrap();
    planner.on_add_stop("강남역").await.unwrap();

    let result = planner.find_alternative_routes().await;
    assert!(matches!(result, Err(Error::RouteFailure(_))), "got {result:?}");
    assert!(planner.routes().is_empty());
    assert_eq!(planner.available_routes(), [false; 4]);
}
