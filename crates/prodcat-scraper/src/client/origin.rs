//! URL origin extraction utilities for the store client.

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://store.example.com/collections/all"`, returns
/// `"https://store.example.com"`. This ensures product pages and feeds are
/// always fetched from the store root, regardless of whether the configured
/// `store_url` includes a collection path.
#[must_use]
pub fn extract_store_origin(store_url: &str) -> String {
    reqwest::Url::parse(store_url).map_or_else(
        |e| {
            tracing::warn!(
                store_url,
                error = %e,
                "could not parse store_url as URL — falling back to string split for origin extraction; check PRODCAT_STORE_URL"
            );
            // fallback: take "https://host" by splitting on '/' and taking first 3 parts
            store_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}
