/// Tunables for a [`SearchEngine`](super::SearchEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngineConfig {
    /// Follow symbolic links while walking. Off by default.
    pub follow_links: bool,
    /// Result channel capacity. A full channel blocks the worker until the consumer catches up.
    pub channel_capacity: usize,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: Option<u64>,
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            channel_capacity: 1024,
            max_file_size: None,
        }
    }
}

impl SearchEngineConfig {
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        // tokio's bounded channel panics on zero capacity
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: Option<u64>) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}
