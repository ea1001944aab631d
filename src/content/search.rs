//! Query-time search over loaded posts

use super::Post;

/// Outcome of a search
///
/// A blank query is [`SearchResults::Idle`], which the front-end shows
/// differently from a query that matched nothing.
#[derive(Debug, Clone)]
pub enum SearchResults<'a> {
    /// Nothing was searched for
    Idle,
    /// Matching posts, in repository order (possibly none)
    Hits(Vec<&'a Post>),
}

impl<'a> SearchResults<'a> {
    pub fn is_idle(&self) -> bool {
        matches!(self, SearchResults::Idle)
    }

    pub fn posts(&self) -> &[&'a Post] {
        match self {
            SearchResults::Idle => &[],
            SearchResults::Hits(posts) => posts,
        }
    }

    pub fn len(&self) -> usize {
        self.posts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts().is_empty()
    }
}

/// Posts whose title, description, tags, category or body contain `query`,
/// ignoring case. No ranking.
pub fn search<'a>(posts: &'a [Post], query: &str) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::Idle;
    }

    let hits: Vec<&Post> = posts.iter().filter(|p| p.matches(&needle)).collect();
    tracing::debug!("Search {:?} matched {} posts", needle, hits.len());
    SearchResults::Hits(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::repository::tests::post;

    fn corpus() -> Vec<Post> {
        let mut a = post("freertos-queue", "2024-05-01", "RTOS", &["FreeRTOS", "队列"]);
        a.meta.title = "FreeRTOS 队列详解".to_string();
        a.raw = "xQueueSend blocks when the queue is full.".to_string();

        let mut b = post("esp32-wifi", "2024-04-01", "ESP32", &["WiFi"]);
        b.meta.description = "Station mode and reconnect logic".to_string();
        b.raw = "esp_wifi_connect() ...".to_string();

        let c = post("linux-irq", "2024-03-01", "Linux驱动", &["irq"]);

        vec![a, b, c]
    }

    fn ids(results: &SearchResults) -> Vec<String> {
        results.posts().iter().map(|p| p.meta.id.clone()).collect()
    }

    #[test]
    fn test_blank_query_is_idle() {
        let posts = corpus();
        for query in ["", "   ", "\t\n"] {
            let results = search(&posts, query);
            assert!(results.is_idle());
            assert_eq!(results.len(), 0);
        }
    }

    #[test]
    fn test_no_matches_is_not_idle() {
        let posts = corpus();
        let results = search(&posts, "zigbee");
        assert!(!results.is_idle());
        assert!(results.is_empty());
    }

    #[test]
    fn test_matches_each_field() {
        let posts = corpus();
        assert_eq!(ids(&search(&posts, "队列详解")), vec!["freertos-queue"]);
        assert_eq!(ids(&search(&posts, "RECONNECT")), vec!["esp32-wifi"]);
        assert_eq!(ids(&search(&posts, "wifi")), vec!["esp32-wifi"]);
        assert_eq!(ids(&search(&posts, "linux驱动")), vec!["linux-irq"]);
        assert_eq!(ids(&search(&posts, "queue is full")), vec!["freertos-queue"]);
    }

    #[test]
    fn test_query_trimmed() {
        let posts = corpus();
        assert_eq!(ids(&search(&posts, "  esp32  ")), vec!["esp32-wifi"]);
    }

    #[test]
    fn test_longer_query_narrows() {
        let posts = corpus();
        let pairs = [("e", "esp"), ("r", "rtos"), ("q", "queue"), ("i", "irq")];
        for (short, long) in pairs {
            let wide = ids(&search(&posts, short));
            let narrow = ids(&search(&posts, long));
            assert!(narrow.iter().all(|id| wide.contains(id)), "{} vs {}", short, long);
        }
    }
}
