use crc32fast::Hasher;
use std::collections::BTreeMap;

/// Derive a session seed from a session name using CRC32
pub fn get_session_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator scoped by category (e.g. `"layer"`, `"image"`)
///
/// IDs never depend on the contents of any store, so an ID can be minted
/// before the entity it names exists. Each category keeps its own counter;
/// the seed separates sessions.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    counts: BTreeMap<String, u32>,
}

impl IdGenerator {
    pub fn new(session: &str) -> Self {
        Self::from_seed(get_session_seed(session))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counts: BTreeMap::new(),
        }
    }

    /// Generate the next ID in `category`, formatted as `{category}_{seed}-{n}`
    pub fn new_id(&mut self, category: &str) -> String {
        let count = self.counts.entry(category.to_string()).or_insert(0);
        *count += 1;
        format!("{}_{}-{}", category, self.seed, count)
    }

    /// Record an ID that exists elsewhere (a replayed log, a restored store)
    ///
    /// IDs minted under this generator's seed advance the category counter
    /// past them, so later IDs never collide. Foreign IDs are ignored.
    pub fn observe(&mut self, id: &str) {
        let marker = format!("_{}-", self.seed);
        let Some((category, n)) = id.rsplit_once(marker.as_str()) else {
            return;
        };
        let Ok(n) = n.parse::<u32>() else {
            return;
        };
        let count = self.counts.entry(category.to_string()).or_insert(0);
        *count = (*count).max(n);
    }

    /// Number of IDs minted so far in `category`
    pub fn issued(&self, category: &str) -> u32 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("strata")
    }
}
