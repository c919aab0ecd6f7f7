//! Event store trait and implementations

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use play_flattener::{ShotEvent, SHOT_EVENT_COLUMNS};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Keyed storage for flat shot-event tables
pub trait EventStore {
    /// Whether a table is stored under `key`
    fn exists(&self, key: &str) -> Result<bool>;

    /// Load the table stored under `key`
    fn load(&self, key: &str) -> Result<Vec<ShotEvent>>;

    /// Store `events` under `key`, replacing any previous table
    fn store(&mut self, key: &str, events: &[ShotEvent]) -> Result<()>;

    /// Delete the table under `key`; returns whether one existed
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Reject keys that are empty or could escape the data directory
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_key("key must not be empty"));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !key.chars().all(allowed) || key.contains("..") || key.starts_with('.') {
        return Err(StoreError::invalid_key(key));
    }

    Ok(())
}

/// CSV-file backed store: `<data_dir>/<key>.csv`, one row per event
#[derive(Debug, Clone)]
pub struct CsvEventStore {
    config: StoreConfig,
}

impl CsvEventStore {
    /// Create the store, making sure the data directory exists
    pub fn new(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        tracing::info!("CSV event store initialized at: {:?}", config.data_dir);
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        self.config.data_dir()
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.config.table_path(key))
    }

    /// Read a table file directly, outside of any key
    pub fn read_table(path: &Path) -> Result<Vec<ShotEvent>> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers = reader.headers()?;
        if !headers.iter().eq(SHOT_EVENT_COLUMNS) {
            return Err(StoreError::invalid_format(format!(
                "{}: expected columns {}, found {}",
                path.display(),
                SHOT_EVENT_COLUMNS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let events = reader.deserialize().collect::<std::result::Result<Vec<ShotEvent>, _>>()?;
        Ok(events)
    }

    /// Write a table file; the header row is written even for an empty table.
    ///
    /// Empty text fields are stored as missing, since a CSV field cannot tell the
    /// two apart. Rows go to `<file>.tmp` first, which is removed if any step fails.
    pub fn write_table(path: &Path, events: &[ShotEvent]) -> Result<()> {
        let tmp_path = path.with_extension("csv.tmp");

        let written = Self::write_rows(&tmp_path, events)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(StoreError::from));

        if written.is_err() {
            discard_temp_file(&tmp_path);
        }
        written
    }

    fn write_rows(tmp_path: &Path, events: &[ShotEvent]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(tmp_path)?;
        writer.write_record(SHOT_EVENT_COLUMNS)?;
        for event in events {
            writer.serialize(event.clone().with_blank_text_as_missing())?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn discard_temp_file(tmp_path: &Path) {
    match fs::remove_file(tmp_path) {
        Ok(()) => tracing::debug!("Removed partial table {:?}", tmp_path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove partial table {:?}: {}", tmp_path, e),
    }
}

impl EventStore for CsvEventStore {
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }

    fn load(&self, key: &str) -> Result<Vec<ShotEvent>> {
        let path = self.path_for(key)?;
        if !path.is_file() {
            return Err(StoreError::not_found(format!("{key} ({})", path.display())));
        }

        let events = Self::read_table(&path)?;
        tracing::debug!("Loaded {} events from {:?}", events.len(), path);
        Ok(events)
    }

    fn store(&mut self, key: &str, events: &[ShotEvent]) -> Result<()> {
        let path = self.path_for(key)?;
        Self::write_table(&path, events)?;
        tracing::info!("Stored {} events at {:?}", events.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for testing
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    tables: HashMap<String, Vec<ShotEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn exists(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.tables.contains_key(key))
    }

    fn load(&self, key: &str) -> Result<Vec<ShotEvent>> {
        validate_key(key)?;
        self.tables.get(key).cloned().ok_or_else(|| StoreError::not_found(key))
    }

    fn store(&mut self, key: &str, events: &[ShotEvent]) -> Result<()> {
        validate_key(key)?;
        let events = events.iter().cloned().map(ShotEvent::with_blank_text_as_missing).collect();
        self.tables.insert(key.to_string(), events);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.tables.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_flattener::PlayType;
    use tempfile::TempDir;

    fn sample_events() -> Vec<ShotEvent> {
        let mut shot = ShotEvent::new(PlayType::Shot);
        shot.period = Some(2);
        shot.period_type = Some("REGULAR".to_string());
        shot.period_time = Some("11:02".to_string());
        shot.game_id = Some(2021020001);
        shot.attacking_team_id = Some(10);
        shot.attacking_team_name = Some("Toronto Maple Leafs".to_string());
        shot.shooter = Some("Mitch Marner".to_string());
        shot.goalie = Some("Jake Allen".to_string());
        shot.shot_type = Some("Snap Shot".to_string());
        shot.x_coordinate = Some(-61.0);
        shot.y_coordinate = Some(12.5);
        shot.empty_net = Some(false);
        shot.strength = Some("Power Play".to_string());

        // only the kind is known
        let bare = ShotEvent::new(PlayType::Goal);

        vec![shot, bare]
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("2021").is_ok());
        assert!(validate_key("regular-season_2021.v2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key(".hidden").is_err());
    }

    #[test]
    fn test_csv_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("nested").join("events");

        let store = CsvEventStore::new(StoreConfig::new(&data_dir)).unwrap();
        assert!(store.data_dir().is_dir());
        assert_eq!(store.path_for("2021").unwrap(), data_dir.join("2021.csv"));
    }

    #[test]
    fn test_csv_store_keeps_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();
        let events = sample_events();

        assert!(!store.exists("2021").unwrap());
        store.store("2021", &events).unwrap();
        assert!(store.exists("2021").unwrap());

        let loaded = store.load("2021").unwrap();
        assert_eq!(loaded, events);
        assert!(loaded[1].shooter.is_none());
        assert!(loaded[1].x_coordinate.is_none());
        assert!(loaded[1].empty_net.is_none());
    }

    #[test]
    fn test_csv_header_matches_columns() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();
        store.store("empty", &[]).unwrap();

        let content = std::fs::read_to_string(store.path_for("empty").unwrap()).unwrap();
        assert_eq!(content.trim_end(), SHOT_EVENT_COLUMNS.join(","));
        assert!(store.load("empty").unwrap().is_empty());
    }

    #[test]
    fn test_csv_rejects_foreign_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();
        std::fs::write(store.path_for("odd").unwrap(), "gameID,x\n1,2\n").unwrap();

        assert!(matches!(store.load("odd"), Err(StoreError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();

        assert!(matches!(store.load("nothing"), Err(StoreError::NotFound(_))));
        assert!(!store.remove("nothing").unwrap());
    }

    #[test]
    fn test_csv_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();

        store.store("2021", &sample_events()).unwrap();
        assert!(store.remove("2021").unwrap());
        assert!(!store.exists("2021").unwrap());
    }

    #[test]
    fn test_blank_text_round_trips_as_missing_in_both_stores() {
        let temp_dir = TempDir::new().unwrap();
        let mut csv_store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();
        let mut memory_store = InMemoryEventStore::new();

        let mut event = sample_events().remove(0);
        event.period_time = Some(String::new());
        event.shooter = Some(String::new());

        csv_store.store("blank", &[event.clone()]).unwrap();
        memory_store.store("blank", &[event.clone()]).unwrap();

        let from_csv = csv_store.load("blank").unwrap();
        assert_eq!(from_csv, memory_store.load("blank").unwrap());
        assert!(from_csv[0].period_time.is_none());
        assert!(from_csv[0].shooter.is_none());
        assert_eq!(from_csv[0].goalie, event.goalie);

        // what was loaded once comes back unchanged
        csv_store.store("blank", &from_csv).unwrap();
        assert_eq!(csv_store.load("blank").unwrap(), from_csv);
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path())).unwrap();

        // a non-empty directory where the table file should go makes the rename fail
        let target = store.path_for("blocked").unwrap();
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        assert!(matches!(store.store("blocked", &sample_events()), Err(StoreError::Io(_))));
        assert!(!target.with_extension("csv.tmp").exists());
        assert!(target.join("keep").is_file());
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = InMemoryEventStore::new();
        assert!(store.is_empty());

        store.store("2021", &sample_events()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("2021").unwrap(), sample_events());
        assert!(store.remove("2021").unwrap());
        assert!(matches!(store.load("2021"), Err(StoreError::NotFound(_))));
        assert!(store.store("../x", &[]).is_err());
    }
}
