// Shared helpers for integration tests: a mock archive and configs pointing at it.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain_longevity::Config;

pub const AVAILABILITY_PATH: &str = "/wayback/available";
pub const CDX_PATH: &str = "/cdx/search/cdx";
pub const TIMEMAP_PATH: &str = "/web/timemap/link";

/// Config aimed at `server` with fast retries.
#[allow(dead_code)]
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        availability_endpoint: format!("{}{AVAILABILITY_PATH}", server.uri()),
        cdx_endpoint: format!("{}{CDX_PATH}", server.uri()),
        timemap_endpoint: format!("{}{TIMEMAP_PATH}", server.uri()),
        timeout_seconds: 2,
        retry_attempts: 3,
        retry_base_delay_ms: 1,
        ..Config::default()
    }
}

/// Config whose endpoints all refuse connections.
#[allow(dead_code)]
pub fn unreachable_config() -> Config {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr")
    };
    Config {
        availability_endpoint: format!("http://{addr}/wayback/available"),
        cdx_endpoint: format!("http://{addr}/cdx/search/cdx"),
        timemap_endpoint: format!("http://{addr}/web/timemap/link"),
        timeout_seconds: 1,
        retry_attempts: 2,
        retry_base_delay_ms: 1,
        ..Config::default()
    }
}

/// CDX table body with `rows` yearly captures starting in `first_year`.
#[allow(dead_code)]
pub fn cdx_table(domain: &str, first_year: i32, rows: usize) -> Value {
    let mut table = vec![json!(["timestamp", "original", "digest"])];
    for i in 0..rows {
        let year = first_year + (i % 20) as i32;
        table.push(json!([
            format!("{year}{:02}01000000", (i % 12) + 1),
            format!("http://{domain}/"),
            format!("DIGEST{i}")
        ]));
    }
    Value::Array(table)
}

#[allow(dead_code)]
pub async fn mount_availability(server: &MockServer, domain: &str, timestamp: &str) {
    Mock::given(method("GET"))
        .and(path(AVAILABILITY_PATH))
        .and(query_param("url", domain))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": domain,
            "archived_snapshots": {
                "closest": {"available": true, "status": "200", "timestamp": timestamp}
            }
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_cdx_page(server: &MockServer, domain: &str, offset: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .and(query_param("url", domain))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_timemap(server: &MockServer, links: usize) {
    let body: String = (0..links)
        .map(|i| format!("<http://web.archive.org/web/2010{i:04}/x>; rel=\"memento\",\n"))
        .collect();
    Mock::given(method("GET"))
        .and(path_regex(format!("^{TIMEMAP_PATH}/.+$")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/link-format")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Offsets requested from the CDX endpoint, in request order.
#[allow(dead_code)]
pub async fn cdx_offsets(server: &MockServer) -> Vec<usize> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == CDX_PATH)
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "offset")
                .and_then(|(_, value)| value.parse().ok())
        })
        .collect()
}
