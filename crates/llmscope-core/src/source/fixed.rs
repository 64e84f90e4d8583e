//! A data source backed by a recorded list of entries

use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{FilterCriteria, LogEntry};
use crate::query;

use super::DataSource;

/// Serves a fixed collection, in its recorded order
///
/// Filters run over every recorded entry; `count` caps the result afterwards.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    entries: Vec<LogEntry>,
}

impl StaticDataSource {
    /// Wrap an existing collection
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    /// Read a JSON array of entries
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let entries: Vec<LogEntry> = serde_json::from_reader(reader)?;
        Ok(Self::new(entries))
    }

    /// Read a JSON array of entries from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let source = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), entries = source.entries.len(), "Loaded log entries");
        Ok(source)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl DataSource for StaticDataSource {
    async fn fetch_entries(&self, count: usize) -> Result<Vec<LogEntry>> {
        warn_if_capped(self.entries.len(), count);
        Ok(self.entries.iter().take(count).cloned().collect())
    }

    async fn fetch_filtered(&self, filter: &FilterCriteria, count: usize) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|entry| query::matches_fields(entry, filter))
            .cloned()
            .collect();
        debug!(count, matched = entries.len(), "Filtered recorded entries");
        warn_if_capped(entries.len(), count);
        entries.truncate(count);
        Ok(entries)
    }
}

fn warn_if_capped(available: usize, count: usize) {
    if available > count {
        warn!(available, count, "Recorded entries exceed the fetch count, extra entries dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::entries;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_fetch_respects_count() {
        let source = StaticDataSource::new(entries(8));
        let first = tokio_test::block_on(source.fetch_entries(5)).unwrap();
        assert_eq!(first, entries(5));

        let all = tokio_test::block_on(source.fetch_entries(50)).unwrap();
        assert_eq!(all.len(), 8);
    }

    #[tokio::test]
    async fn test_filtered_fetch_ignores_search() {
        let mut data = entries(4);
        data[2].user_id = 9;
        let source = StaticDataSource::new(data.clone());

        let filter = FilterCriteria::new().with_user(9).with_search("nothing matches");
        assert_eq!(source.fetch_filtered(&filter, 10).await.unwrap(), vec![data[2].clone()]);
    }

    #[tokio::test]
    async fn test_filtered_fetch_looks_past_count() {
        let mut data = entries(10);
        data[7].user_id = 9;
        let source = StaticDataSource::new(data.clone());

        let filter = FilterCriteria::new().with_user(9);
        assert_eq!(source.fetch_filtered(&filter, 5).await.unwrap(), vec![data[7].clone()]);

        // the cap still applies to the matches
        let all = FilterCriteria::new().with_user(1);
        let capped = source.fetch_filtered(&all, 5).await.unwrap();
        assert_eq!(capped, data[..5].to_vec());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&entries(3)).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let source = StaticDataSource::from_path(file.path()).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let result = StaticDataSource::from_reader("[{\"model\": 3}]".as_bytes());
        assert!(matches!(result, Err(crate::error::Error::Serialization(_))));
    }
}
