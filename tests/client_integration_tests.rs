use std::time::Duration;

use atlas::api::types::REQUESTED_FIELDS;
use atlas::api::{CountrySource, FetchError, RestCountriesClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const COUNTRIES_JSON: &str = r#"[
  {
    "name": {"common": "France", "official": "French Republic"},
    "capital": ["Paris"],
    "region": "Europe",
    "population": 67391582,
    "area": 551695.0,
    "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"},
    "maps": {"googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7", "openStreetMaps": "https://www.openstreetmap.org/relation/1403916"},
    "flag": "🇫🇷"
  },
  {
    "name": {"common": "Antarctica", "official": "Antarctica"},
    "region": "Antarctic",
    "population": 1000,
    "area": 14000000.0,
    "flags": {"svg": "https://flagcdn.com/aq.svg"},
    "maps": {"openStreetMaps": "https://www.openstreetmap.org/relation/2186646"}
  }
]"#;

fn client_for(server: &MockServer) -> RestCountriesClient {
    RestCountriesClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_fetch_all_requests_only_needed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param("fields", REQUESTED_FIELDS))
        .respond_with(json_response(COUNTRIES_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server).fetch_all_countries().await.unwrap();

    assert_eq!(records.len(), 2);
    let france = &records[0];
    assert_eq!(france.name, "France");
    assert_eq!(france.capital, "Paris");
    assert_eq!(france.region, "Europe");
    assert_eq!(france.population, 67391582);
    assert_eq!(france.area, 551695.0);
    assert_eq!(france.flag, "https://flagcdn.com/w320/fr.png");
    assert_eq!(france.map, "https://goo.gl/maps/g7QxxSFsWyTPKuzd7");
    assert_eq!(france.flag_emoji.as_deref(), Some("🇫🇷"));
}

#[tokio::test]
async fn test_missing_fields_fall_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(json_response(COUNTRIES_JSON))
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server).fetch_all_countries().await.unwrap();
    let antarctica = &records[1];

    assert_eq!(antarctica.capital, "");
    assert_eq!(antarctica.flag, "https://flagcdn.com/aq.svg");
    assert_eq!(antarctica.map, "https://www.openstreetmap.org/relation/2186646");
    assert_eq!(antarctica.flag_emoji, None);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(json_response("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        RestCountriesClient::new(format!("{}/", mock_server.uri()), Duration::from_secs(5))
            .unwrap();
    assert!(client.fetch_all_countries().await.unwrap().is_empty());
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/France"))
        .and(query_param("fields", REQUESTED_FIELDS))
        .respond_with(json_response(COUNTRIES_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server)
        .fetch_country_by_name("France")
        .await
        .unwrap();
    assert_eq!(records[0].name, "France");
}

#[tokio::test]
async fn test_search_name_is_percent_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/United%20States"))
        .respond_with(json_response("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server)
        .fetch_country_by_name("United States")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_blank_search_lists_all() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(json_response(COUNTRIES_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server)
        .fetch_country_by_name("   ")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/zzzz"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"status":404,"message":"Not Found"}"#),
        )
        .mount(&mock_server)
        .await;

    let records = client_for(&mock_server)
        .fetch_country_by_name("zzzz")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_repeated_search_returns_same_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/fr"))
        .respond_with(json_response(COUNTRIES_JSON))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.fetch_country_by_name("fr").await.unwrap();
    let second = client.fetch_country_by_name("fr").await.unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_all_countries().await;
    match result {
        Err(FetchError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(json_response(r#"{"not": "a list"}"#))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_all_countries().await;
    assert!(matches!(result, Err(FetchError::Parse(_))));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(json_response("[]").set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = RestCountriesClient::new(mock_server.uri(), Duration::from_millis(200)).unwrap();
    let result = client.fetch_all_countries().await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}
