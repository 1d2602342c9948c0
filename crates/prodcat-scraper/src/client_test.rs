use super::*;

#[test]
fn product_url_plain_page() {
    let url = StoreClient::product_url("https://store.example.com", "cedar-barrel-sauna", "")
        .unwrap();
    assert_eq!(url, "https://store.example.com/products/cedar-barrel-sauna");
}

#[test]
fn product_url_variant_feed_suffix() {
    let url = StoreClient::product_url("https://store.example.com", "cedar-barrel-sauna", ".js")
        .unwrap();
    assert_eq!(url, "https://store.example.com/products/cedar-barrel-sauna.js");
}

#[test]
fn product_url_strips_collection_path() {
    let url = StoreClient::product_url(
        "https://store.example.com/collections/saunas",
        "cedar-barrel-sauna",
        "",
    )
    .unwrap();
    assert_eq!(url, "https://store.example.com/products/cedar-barrel-sauna");
}

#[test]
fn product_url_rejects_invalid_origin() {
    let result = StoreClient::product_url("not-a-url", "handle", "");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidStoreUrl { .. }),
        "expected InvalidStoreUrl, got: {err:?}"
    );
}

#[test]
fn extract_store_origin_strips_path() {
    assert_eq!(
        extract_store_origin("https://store.example.com/collections/all"),
        "https://store.example.com"
    );
}

#[test]
fn extract_store_origin_trailing_slash() {
    assert_eq!(
        extract_store_origin("https://store.example.com/"),
        "https://store.example.com"
    );
}

#[test]
fn extract_store_origin_bare_domain() {
    assert_eq!(
        extract_store_origin("https://store.example.com"),
        "https://store.example.com"
    );
}
