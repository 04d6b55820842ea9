//! Typed document layer over a raw key-value store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Raw string storage. Each key holds one serialized document.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// The persisted key space, one entry per entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    User,
    LoggedIn,
    Tasks,
    Pomodoro,
    Streak,
    Goals,
    Habits,
    Notes,
    Achievements,
    Settings,
    CalendarDate,
}

impl StoreKey {
    pub const ALL: [StoreKey; 11] = [
        StoreKey::User,
        StoreKey::LoggedIn,
        StoreKey::Tasks,
        StoreKey::Pomodoro,
        StoreKey::Streak,
        StoreKey::Goals,
        StoreKey::Habits,
        StoreKey::Notes,
        StoreKey::Achievements,
        StoreKey::Settings,
        StoreKey::CalendarDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::User => "focusflow_user",
            StoreKey::LoggedIn => "focusflow_logged_in",
            StoreKey::Tasks => "focusflow_tasks",
            StoreKey::Pomodoro => "focusflow_pomodoro",
            StoreKey::Streak => "focusflow_streak",
            StoreKey::Goals => "focusflow_goals",
            StoreKey::Habits => "focusflow_habits",
            StoreKey::Notes => "focusflow_notes",
            StoreKey::Achievements => "focusflow_achievements",
            StoreKey::Settings => "focusflow_settings",
            StoreKey::CalendarDate => "focusflow_calendar_date",
        }
    }
}

/// An entity family persisted as a single document under a fixed key.
///
/// `Default` is the canonical empty value written on first access.
pub trait Document: Serialize + DeserializeOwned + Default {
    const KEY: StoreKey;
}

/// JSON documents on top of a [`KeyValueStore`].
pub struct JsonStore<S> {
    kv: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &S {
        &self.kv
    }

    /// Read a document, writing and returning its default if the key is empty.
    ///
    /// # Errors
    /// A stored value that is not valid JSON for `D` is returned as an error;
    /// it is never replaced.
    pub fn load<D: Document>(&self) -> Result<D> {
        match self.kv.get(D::KEY.as_str())? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let doc = D::default();
                self.save(&doc)?;
                debug!(key = D::KEY.as_str(), "initialized default document");
                Ok(doc)
            }
        }
    }

    /// Overwrite the whole document.
    pub fn save<D: Document>(&self, doc: &D) -> Result<()> {
        self.set(D::KEY, doc)
    }

    /// Write the default document if the key has no value yet.
    pub fn initialize<D: Document>(&self) -> Result<()> {
        if self.kv.get(D::KEY.as_str())?.is_none() {
            self.save(&D::default())?;
        }
        Ok(())
    }

    /// Read an optional value without initializing it.
    pub fn get<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>> {
        match self.kv.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key.as_str(), &raw)
    }

    pub fn remove(&self, key: StoreKey) -> Result<()> {
        self.kv.remove(key.as_str())
    }
}
