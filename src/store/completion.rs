use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::models::{ScheduleEntry, Slot};
use crate::store::StoreError;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// `morning_<idx>` / `evening_<idx>`. Keys follow entry positions, so they are
/// only meaningful for the plan that wrote them.
pub fn slot_key(entry_index: usize, slot: Slot) -> String {
    format!("{}_{}", slot.as_str(), entry_index)
}

pub fn notes_key(entry_index: usize) -> String {
    format!("notes_{}", entry_index)
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Everything that gets persisted: completion flags and per-day notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionState {
    #[serde(default)]
    pub checkbox_states: BTreeMap<String, bool>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl CompletionState {
    pub fn is_completed(&self, entry_index: usize, slot: Slot) -> bool {
        self.checkbox_states
            .get(&slot_key(entry_index, slot))
            .copied()
            .unwrap_or(false)
    }

    pub fn note(&self, entry_index: usize) -> &str {
        self.notes
            .get(&notes_key(entry_index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Insert `false` / `""` for every study day that has no value yet.
    /// Existing values are left alone.
    pub fn with_defaults(mut self, schedule: &[ScheduleEntry]) -> Self {
        for (idx, entry) in schedule.iter().enumerate() {
            if entry.as_study_day().is_none() {
                continue;
            }
            for slot in Slot::all() {
                self.checkbox_states
                    .entry(slot_key(idx, slot))
                    .or_insert(false);
            }
            self.notes.entry(notes_key(idx)).or_default();
        }
        self
    }

    pub fn to_json(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Write-through store: every setter rewrites the whole file. With fewer
/// than a hundred rows a full rewrite per edit is cheap enough that batching
/// isn't worth the risk of losing an edit.
pub struct CompletionStore {
    path: PathBuf,
    state: CompletionState,
    slots: Vec<[bool; 2]>,
}

impl CompletionStore {
    /// Load the state at `path` and bind it to `schedule`.
    pub fn open(path: impl Into<PathBuf>, schedule: &[ScheduleEntry]) -> Result<Self, StoreError> {
        let path = path.into();
        let state = Self::load(&path)?;
        let slots = schedule
            .iter()
            .map(|entry| match entry.as_study_day() {
                Some(day) => [day.morning.is_some(), day.evening.is_some()],
                None => [false, false],
            })
            .collect();
        Ok(Self { path, state, slots })
    }

    /// A missing file is an empty state. Unreadable or malformed content is
    /// an error; the file is never replaced with defaults.
    pub fn load(path: &Path) -> Result<CompletionState, StoreError> {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No progress file at {:?}, starting fresh", path);
                return Ok(CompletionState::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let state: CompletionState =
            serde_json::from_slice(&content).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} flags and {} notes from {:?}",
            state.checkbox_states.len(),
            state.notes.len(),
            path
        );
        Ok(state)
    }

    /// Replace the file atomically: write a sibling temp file, sync, rename.
    pub fn save_state(path: &Path, state: &CompletionState) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let bytes = state.to_json().map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!("Saved progress to {:?}", path);
        Ok(())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        Self::save_state(&self.path, &self.state).inspect_err(|e| {
            warn!("{}", e);
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    /// Fill defaults for every study day in memory. They reach the disk with
    /// the next write.
    pub fn materialize_defaults(&mut self, schedule: &[ScheduleEntry]) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_defaults(schedule);
    }

    pub fn get_completion(&self, entry_index: usize, slot: Slot) -> bool {
        self.state.is_completed(entry_index, slot)
    }

    pub fn set_completion(
        &mut self,
        entry_index: usize,
        slot: Slot,
        value: bool,
    ) -> Result<(), StoreError> {
        self.check_slot(entry_index, slot)?;
        self.state
            .checkbox_states
            .insert(slot_key(entry_index, slot), value);
        self.save()
    }

    pub fn toggle_completion(&mut self, entry_index: usize, slot: Slot) -> Result<bool, StoreError> {
        let value = !self.get_completion(entry_index, slot);
        self.set_completion(entry_index, slot, value)?;
        Ok(value)
    }

    pub fn get_notes(&self, entry_index: usize) -> &str {
        self.state.note(entry_index)
    }

    pub fn set_notes(&mut self, entry_index: usize, text: &str) -> Result<(), StoreError> {
        self.check_study_day(entry_index)?;
        self.state
            .notes
            .insert(notes_key(entry_index), text.to_string());
        self.save()
    }

    fn check_study_day(&self, entry_index: usize) -> Result<(), StoreError> {
        match self.slots.get(entry_index) {
            None => Err(StoreError::InvalidKey {
                index: entry_index,
                reason: "is outside the schedule",
            }),
            Some([false, false]) => Err(StoreError::InvalidKey {
                index: entry_index,
                reason: "is not a study day",
            }),
            Some(_) => Ok(()),
        }
    }

    fn check_slot(&self, entry_index: usize, slot: Slot) -> Result<(), StoreError> {
        self.check_study_day(entry_index)?;
        let has_session = match slot {
            Slot::Morning => self.slots[entry_index][0],
            Slot::Evening => self.slots[entry_index][1],
        };
        if has_session {
            Ok(())
        } else {
            Err(StoreError::InvalidKey {
                index: entry_index,
                reason: "has no session in that slot",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::get_schedule;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> CompletionStore {
        CompletionStore::open(dir.path().join("timetable_data.json"), &get_schedule()).unwrap()
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = TempDir::new().unwrap();
        let state = CompletionStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(state.checkbox_states.is_empty());
        assert!(state.notes.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timetable_data.json");
        std::fs::write(&path, "{ \"checkbox_states\": ").unwrap();

        let err = CompletionStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert!(err.is_persistence());
        // untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"checkbox_states\": ");
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timetable_data.json");
        std::fs::write(&path, r#"{"checkbox_states": {"morning_1": "yes"}}"#).unwrap();
        assert!(matches!(
            CompletionStore::load(&path),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_sections_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timetable_data.json");
        std::fs::write(&path, r#"{"checkbox_states": {"morning_1": true}}"#).unwrap();
        let state = CompletionStore::load(&path).unwrap();
        assert!(state.is_completed(1, Slot::Morning));
        assert!(state.notes.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("timetable_data.json");
        let mut state = CompletionState::default();
        state.checkbox_states.insert(slot_key(1, Slot::Morning), true);
        state.checkbox_states.insert(slot_key(2, Slot::Evening), false);
        state.notes.insert(notes_key(1), "read ch. 3 ✓".to_string());

        CompletionStore::save_state(&path, &state).unwrap();
        let first = std::fs::read(&path).unwrap();
        let loaded = CompletionStore::load(&path).unwrap();
        assert_eq!(loaded, state);

        CompletionStore::save_state(&path, &loaded).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn file_uses_flat_string_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.set_completion(1, Slot::Evening, true).unwrap();
        store.set_notes(1, "ok").unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["checkbox_states"]["evening_1"], serde_json::json!(true));
        assert_eq!(raw["notes"]["notes_1"], serde_json::json!("ok"));
    }

    #[test]
    fn setters_write_through() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        assert!(!store.get_completion(1, Slot::Morning));
        assert_eq!(store.get_notes(1), "");

        store.set_completion(1, Slot::Morning, true).unwrap();
        store.set_notes(1, "finished early").unwrap();

        let reopened = open_in(&dir);
        assert!(reopened.get_completion(1, Slot::Morning));
        assert!(!reopened.get_completion(1, Slot::Evening));
        assert_eq!(reopened.get_notes(1), "finished early");
    }

    #[test]
    fn toggle_flips_the_flag() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        assert!(store.toggle_completion(2, Slot::Evening).unwrap());
        assert!(!store.toggle_completion(2, Slot::Evening).unwrap());
        assert!(!open_in(&dir).get_completion(2, Slot::Evening));
    }

    #[test]
    fn setters_reject_invalid_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);

        // divider, rest day, past the end
        for idx in [0, 6, 999] {
            let err = store.set_completion(idx, Slot::Morning, true).unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey { index, .. } if index == idx));
            assert!(!err.is_persistence());
            assert!(store.set_notes(idx, "x").is_err());
        }
        assert!(!store.path().exists());

        // getters default safely
        assert!(!store.get_completion(999, Slot::Evening));
        assert_eq!(store.get_notes(999), "");
    }

    #[test]
    fn defaults_cover_study_days_only() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.materialize_defaults(&get_schedule());

        let state = store.state();
        assert_eq!(state.checkbox_states.len(), 72);
        assert_eq!(state.notes.len(), 36);
        assert!(!state.checkbox_states.contains_key("morning_0"));
        assert!(!state.notes.contains_key("notes_6"));
        assert!(!store.path().exists());
    }

    #[test]
    fn defaults_keep_existing_values() {
        let mut state = CompletionState::default();
        state.checkbox_states.insert(slot_key(1, Slot::Morning), true);
        state.notes.insert(notes_key(1), "kept".to_string());

        let state = state.with_defaults(&get_schedule());
        assert!(state.is_completed(1, Slot::Morning));
        assert_eq!(state.note(1), "kept");
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should be makes the rename fail
        let path = dir.path().join("timetable_data.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "").unwrap();

        let mut store = CompletionStore {
            path: path.clone(),
            state: CompletionState::default(),
            slots: vec![[false, false], [true, true]],
        };
        let err = store.set_completion(1, Slot::Morning, true).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(store.get_completion(1, Slot::Morning));
    }
}
