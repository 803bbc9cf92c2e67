use crate::config::Config;
use crate::types::track::Track;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    cache: Arc<DashMap<String, CachedTrack>>,
}

struct CachedTrack {
    track: Arc<Track>,
    inserted_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Caches `track` under a fresh id and returns the id.
    pub fn insert(&self, track: Track) -> String {
        let file_id = uuid::Uuid::new_v4().to_string();
        self.cache.insert(
            file_id.clone(),
            CachedTrack {
                track: Arc::new(track),
                inserted_at: Instant::now(),
            },
        );
        file_id
    }

    pub fn get(&self, file_id: &str) -> Option<Arc<Track>> {
        self.cache.get(file_id).map(|entry| Arc::clone(&entry.track))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.cache.retain(|_, cached| now.duration_since(cached.inserted_at) < ttl);
        tracing::info!("Cache eviction complete. Current size: {}", self.cache.len());
    }
}
