//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left alone by JavaScript's `encodeURIComponent`
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

/// Encode a single URL component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Hash-route path of an article, as understood by the front-end router
///
/// # Examples
/// ```ignore
/// article_route("stm32 时钟") // -> "#/article/stm32%20%E6%97%B6%E9%92%9F"
/// ```
pub fn article_route(id: &str) -> String {
    format!("#/article/{}", encode_component(id))
}

/// Absolute article URL under the configured site URL
pub fn article_url(config: &SiteConfig, id: &str) -> String {
    format!(
        "{}/{}",
        config.url.trim_end_matches('/'),
        article_route(id)
    )
}
