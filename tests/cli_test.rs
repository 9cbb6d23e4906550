mod common;

use common::{GeosearchTest, StubResponse, StubServer};
use serde_json::Value;

const RESULTS: &str = r#"[
    {"type": "lot", "label": "120 Broadway", "bbl": "1000477501"},
    {"type": "zma", "label": "ZMA C 120 Broadway"},
    {"type": "street", "label": "Broadway"}
]"#;

#[test]
fn test_search_json_output() {
    let server = StubServer::with_body(RESULTS);
    let geosearch = GeosearchTest::new();

    let output = geosearch.run_success(&[
        "search",
        "--host",
        &server.url(),
        "--json",
        "120",
        "broadway",
    ]);
    let results: Vec<Value> = serde_json::from_str(&output).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["id"], 0);
    assert_eq!(results[0]["typeTitle"], "Lot");
    assert_eq!(results[0]["bbl"], "1000477501");
    assert_eq!(results[2]["id"], 2);
    assert_eq!(results[2]["typeTitle"], "Result");
    assert_eq!(server.requests().len(), 1);
    assert!(server.requests()[0].ends_with("q=120+broadway"));
}

#[test]
fn test_search_table_output() {
    let server = StubServer::with_body(RESULTS);
    let geosearch = GeosearchTest::new();

    let output = geosearch.run_success(&["search", "--host", &server.url(), "broadway"]);

    assert!(output.contains("120 Broadway"));
    assert!(output.contains("Lot"));
    assert!(output.contains("3 results"));
}

#[test]
fn test_search_select_prints_committed_result() {
    let server = StubServer::with_body(RESULTS);
    let geosearch = GeosearchTest::new();

    let output = geosearch.run_success(&[
        "search", "--host", &server.url(), "--select", "2", "--json", "broadway",
    ]);
    let selected: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(selected["label"], "Broadway");
    assert_eq!(selected["id"], 2);
}

#[test]
fn test_search_select_out_of_range_fails() {
    let server = StubServer::with_body(RESULTS);
    let geosearch = GeosearchTest::new();

    let stderr = geosearch.run_failure(&[
        "search",
        "--host",
        &server.url(),
        "--select",
        "9",
        "broadway",
    ]);
    assert!(stderr.contains("no result at index 9"));
}

#[test]
fn test_short_query_makes_no_request() {
    let server = StubServer::with_body(RESULTS);
    let geosearch = GeosearchTest::new();

    let output = geosearch.run(&["search", "--host", &server.url(), "--json", "br"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
    assert!(String::from_utf8_lossy(&output.stderr).contains("shorter than 3 characters"));
    assert!(server.requests().is_empty());
}

#[test]
fn test_server_failure_exits_nonzero() {
    let server = StubServer::start(|_| StubResponse::status(500, "boom"));
    let geosearch = GeosearchTest::new();

    let stderr = geosearch.run_failure(&["search", "--host", &server.url(), "broadway"]);
    assert!(stderr.contains("search unavailable"));
}

#[test]
fn test_helper_and_route_flags() {
    let server = StubServer::with_body("[]");
    let geosearch = GeosearchTest::new();

    geosearch.run_success(&[
        "search",
        "--host",
        &server.url(),
        "--route",
        "v2/search",
        "--helper",
        "geosearch",
        "--json",
        "broadway",
    ]);

    assert_eq!(
        server.requests(),
        vec!["/v2/search?helpers[]=geosearch&q=broadway"]
    );
}

#[test]
fn test_config_file_is_used() {
    let server = StubServer::with_body(r#"[{"type": "zma", "label": "ZMA 1"}]"#);
    let geosearch = GeosearchTest::new();
    let path = geosearch.write_config(&format!(
        "host: {}\ntype_title_lookup:\n  zma: Zoning Map Amendment\n",
        server.url()
    ));

    let output = geosearch.run_success(&[
        "search",
        "--config",
        path.to_str().unwrap(),
        "--json",
        "zma 1",
    ]);
    let results: Vec<Value> = serde_json::from_str(&output).unwrap();

    assert_eq!(results[0]["typeTitle"], "Zoning Map Amendment");
}

#[test]
fn test_config_show_json() {
    let geosearch = GeosearchTest::new();

    let output = geosearch.run_success(&["config", "show", "--json"]);
    let shown: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(shown["config"]["host"], "https://search-api.planninglabs.nyc");
    assert_eq!(shown["config"]["route"], "search");
    assert_eq!(shown["config_file"], Value::Null);
    assert!(
        shown["sample_url"]
            .as_str()
            .unwrap()
            .ends_with("&q=120+Broadway")
    );
}

#[test]
fn test_config_init_then_show() {
    let geosearch = GeosearchTest::new();
    let path = geosearch.temp_dir.path().join("init.yaml");
    let path_str = path.to_str().unwrap();

    geosearch.run_success(&["config", "init", "--config", path_str]);
    assert!(path.exists());
    geosearch.run_failure(&["config", "init", "--config", path_str]);

    let output = geosearch.run_success(&["config", "show", "--config", path_str]);
    assert!(output.contains("host: https://search-api.planninglabs.nyc"));
    assert!(output.contains(path_str));
}

#[test]
fn test_invalid_host_rejected() {
    let geosearch = GeosearchTest::new();
    let stderr = geosearch.run_failure(&["config", "show", "--host", "ftp://example.com"]);
    assert!(stderr.contains("host must use http or https"));
}
