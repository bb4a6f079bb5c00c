//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query-string or path component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Absolute URL of a CMS image
///
/// # Examples
/// ```ignore
/// asset_url(&config, "4f1c...") // -> "https://cms.example.org/assets/4f1c..."
/// ```
pub fn asset_url(config: &SiteConfig, image: &str) -> String {
    format!(
        "{}/assets/{}",
        config.asset_base(),
        encode_component(image.trim_start_matches('/'))
    )
}

/// Build `path?key=value&...`, skipping empty values
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, encode_component(value)))
        .collect();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Fair"), "Fair");
        assert_eq!(encode_component("a b&c/d"), "a%20b%26c%2Fd");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_asset_url() {
        let mut config = SiteConfig::default();
        config.cms_url = "https://cms.example.org/".to_string();
        assert_eq!(
            asset_url(&config, "abc-123"),
            "https://cms.example.org/assets/abc-123"
        );

        config.asset_url = "https://img.example.org".to_string();
        assert_eq!(
            asset_url(&config, "/abc-123"),
            "https://img.example.org/assets/abc-123"
        );
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/events", &[]), "/events");
        assert_eq!(
            with_query(
                "/events",
                &[("tags", "Art,Music".to_string()), ("sort", String::new()), ("page", "2".to_string())]
            ),
            "/events?tags=Art%2CMusic&page=2"
        );
    }
}
