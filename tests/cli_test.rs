mod common;

use common::{HotelDeskTest, StubServer};
use serde_json::Value;

const BOOKINGS_PAGE: &str = r#"{
  "success": true,
  "data": [
    {"_id": "b1", "guestName": "Ana Ruiz", "roomNumber": 204, "checkIn": "2024-03-05T14:00:00Z",
     "checkOut": "2024-03-08T11:00:00Z", "status": "confirmed", "totalAmount": 450.5},
    {"_id": "b2", "guestName": "Tom Berg", "roomNumber": "12B", "checkIn": "2024-03-06",
     "checkOut": "2024-03-07", "status": "confirmed", "totalAmount": 120}
  ],
  "pagination": {"total": 12, "totalPages": 2}
}"#;

#[test]
fn test_help_lists_commands() {
    let test = HotelDeskTest::new();
    let output = test.run_success(&["--help"]);
    for command in ["list", "browse", "resources", "login", "logout", "config", "completions"] {
        assert!(output.contains(command), "help is missing {command}:\n{output}");
    }
}

#[test]
fn test_resources_table() {
    let test = HotelDeskTest::new();
    let output = test.run_success(&["resources"]);
    assert!(output.contains("/orders/history"));
    assert!(output.contains("/inventory/history"));
    assert!(output.contains("attendance"));
}

#[test]
fn test_resources_json() {
    let test = HotelDeskTest::new();
    let output = test.run_success(&["resources", "--json"]);
    let resources: Value = serde_json::from_str(&output).expect("valid json");
    let resources = resources.as_array().expect("array");
    assert_eq!(resources.len(), 8);

    let menu = resources
        .iter()
        .find(|r| r["resource"] == "menu")
        .expect("menu resource");
    assert_eq!(menu["search_debounce_ms"], 200);
    let bookings = resources
        .iter()
        .find(|r| r["resource"] == "bookings")
        .expect("bookings resource");
    assert_eq!(bookings["search_debounce_ms"], 500);
}

#[test]
fn test_config_set_and_get() {
    let test = HotelDeskTest::new();
    test.run_success(&["config", "set", "list.page_size", "20"]);
    assert_eq!(test.run_success(&["config", "get", "list.page_size"]).trim(), "20");
    assert!(test.read_config().contains("page_size: 20"));

    test.run_success(&["config", "set", "api.base_url", "https://hotel.example.com/api"]);
    let shown = test.run_success(&["config", "show"]);
    assert!(shown.contains("https://hotel.example.com/api"));
    assert!(shown.contains("session: not signed in"));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let test = HotelDeskTest::new();
    let stderr = test.run_failure(&["config", "set", "list.page_size", "15"]);
    assert!(stderr.contains("invalid page size"));

    let stderr = test.run_failure(&["config", "set", "api.colour", "red"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_login_and_logout() {
    let test = HotelDeskTest::new();
    test.run_success(&["login", "tok-1"]);
    assert!(test.session_path().exists());
    assert!(test.run_success(&["config", "show"]).contains("session: signed in"));

    test.run_success(&["logout"]);
    assert!(!test.session_path().exists());
}

#[test]
fn test_login_reads_token_from_stdin() {
    let test = HotelDeskTest::new();
    let output = test.run_with_stdin(&["login"], "tok-from-stdin\n");
    assert!(output.status.success());
    let session = std::fs::read_to_string(test.session_path()).unwrap();
    assert!(session.contains("tok-from-stdin"));

    let output = test.run_with_stdin(&["login"], "\n");
    assert!(!output.status.success());
}

#[test]
fn test_unknown_resource_fails() {
    let test = HotelDeskTest::new();
    let stderr = test.run_failure(&["list", "suites"]);
    assert!(stderr.contains("unknown resource"));
}

#[test]
fn test_unknown_filter_fails_before_request() {
    let server = StubServer::start(200, BOOKINGS_PAGE);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let stderr = test.run_failure(&["list", "bookings", "-f", "floor=2"]);
    assert!(stderr.contains("unknown filter 'floor'"));

    let stderr = test.run_failure(&["list", "bookings", "--sort", "status"]);
    assert!(stderr.contains("cannot be sorted"));
    assert!(server.requests().is_empty());
}

#[test]
fn test_list_sends_query_and_renders_page() {
    let server = StubServer::start(200, BOOKINGS_PAGE);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);
    test.run_success(&["login", "tok-1"]);

    let output = test.run_success(&["list", "bookings", "-f", "status=confirmed"]);
    assert!(output.contains("Ana Ruiz"));
    assert!(output.contains("Mar 05, 2024"));
    assert!(output.contains("Page 1 of 2 · 12 bookings"));
    assert!(output.contains("(«) (‹) [1] 2 › »"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].starts_with("GET /api/bookings?page=1&limit=10&status=confirmed "),
        "unexpected request: {}",
        requests[0]
    );
    assert!(requests[0].to_lowercase().contains("authorization: bearer tok-1"));
}

#[test]
fn test_list_json_output() {
    let server = StubServer::start(200, BOOKINGS_PAGE);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let output = test.run_success(&[
        "list", "bookings", "--search", "ana", "--sort", "checkIn:desc", "--json",
    ]);
    let json: Value = serde_json::from_str(&output).expect("valid json");
    assert_eq!(json["total"], 12);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["records"][0]["guestName"], "Ana Ruiz");
    assert_eq!(json["records"][1]["roomNumber"], "12B");

    let request = &server.requests()[0];
    assert!(request.contains("search=ana"));
    assert!(request.contains("sortBy=checkIn&sortOrder=desc"));
}

#[test]
fn test_server_message_is_reported() {
    let server = StubServer::start(500, r#"{"success": false, "message": "database offline"}"#);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let stderr = test.run_failure(&["list", "rooms"]);
    assert!(stderr.contains("database offline"));
}

#[test]
fn test_unauthorized_clears_session() {
    let server = StubServer::start(401, r#"{"message": "jwt expired"}"#);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);
    test.run_success(&["login", "tok-1"]);

    let stderr = test.run_failure(&["list", "staff"]);
    assert!(stderr.contains("hoteldesk login"));
    assert!(!test.session_path().exists());
}

#[test]
fn test_unreachable_api_fails() {
    let test = HotelDeskTest::new().with_api_url("http://127.0.0.1:9/api");
    test.run_success(&["config", "set", "api.connect_timeout", "2"]);
    let stderr = test.run_failure(&["list", "payments"]);
    assert!(stderr.contains("error"));
}

#[test]
fn test_completions() {
    let test = HotelDeskTest::new();
    let output = test.run_success(&["completions", "bash"]);
    assert!(output.contains("hoteldesk"));
}

fn request_pages(server: &StubServer) -> Vec<String> {
    server
        .requests()
        .iter()
        .map(|r| r.lines().next().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_browse_refreshes_and_pages_through_results() {
    let server = StubServer::start(200, BOOKINGS_PAGE);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let output = test.run_with_stdin(&["browse", "bookings"], "r\nn\nq\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "browse failed: {stdout}");

    assert!(stdout.contains("Bookings"));
    assert!(stdout.contains("Ana Ruiz"));
    assert!(stdout.contains("Page 1 of 2 · 12 bookings"));
    assert!(stdout.contains("Loading..."));
    assert!(stdout.contains("Page 2 of 2 · 12 bookings"));

    let pages = request_pages(&server);
    assert_eq!(pages.len(), 3, "unexpected requests: {pages:?}");
    assert!(pages[0].starts_with("GET /api/bookings?page=1&limit=10 "));
    assert!(pages[1].starts_with("GET /api/bookings?page=1&limit=10 "));
    assert!(pages[2].starts_with("GET /api/bookings?page=2&limit=10 "));
}

#[test]
fn test_browse_search_then_sort() {
    let server = StubServer::start(200, BOOKINGS_PAGE);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let output = test.run_with_stdin(&["browse", "bookings"], "/ana\nsort checkIn:desc\nq\n");
    assert!(output.status.success());

    let pages = request_pages(&server);
    assert_eq!(pages.len(), 3, "unexpected requests: {pages:?}");
    assert!(pages[1].contains("search=ana"));
    assert!(pages[2].contains("search=ana&sortBy=checkIn&sortOrder=desc"));
}

#[test]
fn test_browse_failure_shows_toast_and_stays_open() {
    let server = StubServer::start(500, r#"{"success": false, "message": "database offline"}"#);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);

    let output = test.run_with_stdin(&["browse", "rooms"], "r\nq\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("database offline"));
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn test_browse_session_expiry_ends_with_login_hint() {
    let server = StubServer::start(401, r#"{"message": "jwt expired"}"#);
    let test = HotelDeskTest::new().with_api_url(&server.base_url);
    test.run_success(&["login", "tok-1"]);

    let output = test.run_with_stdin(&["browse", "staff"], "n\nq\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hoteldesk login"));
    assert!(!test.session_path().exists());
    assert_eq!(server.requests().len(), 1);
}
