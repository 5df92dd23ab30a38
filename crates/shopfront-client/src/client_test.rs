use super::*;

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::with_base_url(base_url, 30, "shopfront-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_url_joins_path_and_query() {
    let client = test_client("https://shop.example.com");
    let url = client
        .endpoint_url("/get-price/", &[("size", "M"), ("color", "None")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://shop.example.com/get-price/?size=M&color=None"
    );
}

#[test]
fn endpoint_url_keeps_base_path_prefix() {
    let client = test_client("https://shop.example.com/vi/");
    let url = client.endpoint_url("/search/", &[("q", "")]).unwrap();
    assert_eq!(url.as_str(), "https://shop.example.com/vi/search/?q=");
}

#[test]
fn endpoint_url_encodes_special_characters() {
    let client = test_client("https://shop.example.com");
    let url = client.endpoint_url("/search/", &[("q", "áo & quần")]).unwrap();
    assert!(
        !url.as_str().contains(' ') && url.as_str().contains("%26"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn endpoint_url_without_query_has_no_question_mark() {
    let client = test_client("https://shop.example.com");
    let url = client.endpoint_url("get-vouchers/", &[]).unwrap();
    assert_eq!(url.as_str(), "https://shop.example.com/get-vouchers/");
}

#[test]
fn rejects_relative_base_url() {
    let result = StorefrontClient::with_base_url("shop.example.com", 30, "ua");
    assert!(matches!(result, Err(StorefrontError::InvalidBaseUrl { .. })));
}

#[test]
fn api_error_message_reads_error_field() {
    let body = serde_json::json!({"error": "Product detail does not exist."});
    assert_eq!(
        api_error_message(&body).as_deref(),
        Some("Product detail does not exist.")
    );
}

#[test]
fn api_error_message_reads_success_false() {
    let body = serde_json::json!({"success": false, "message": "Sorry, We have ran out of this type"});
    assert_eq!(
        api_error_message(&body).as_deref(),
        Some("Sorry, We have ran out of this type")
    );
    let bare = serde_json::json!({"success": false});
    assert_eq!(api_error_message(&bare).as_deref(), Some("request failed"));
}

#[test]
fn api_error_message_ignores_successful_bodies() {
    assert!(api_error_message(&serde_json::json!({"success": true, "message": "ok"})).is_none());
    assert!(api_error_message(&serde_json::json!({"price": 1, "error": null})).is_none());
    assert!(api_error_message(&serde_json::json!({"error": ""})).is_none());
}

#[test]
fn sentinels_replace_absent_values() {
    assert_eq!(str_or_sentinel(None), "None");
    assert_eq!(str_or_sentinel(Some("")), "None");
    assert_eq!(str_or_sentinel(Some("XL")), "XL");
    assert_eq!(id_or_sentinel(None), "None");
    assert_eq!(id_or_sentinel(Some(42)), "42");
}

#[test]
fn csrf_token_can_be_seeded() {
    let client = test_client("https://shop.example.com");
    assert!(client.csrf_token().is_none());
    client.set_csrf_token("tok");
    assert_eq!(client.csrf_token().as_deref(), Some("tok"));
}
