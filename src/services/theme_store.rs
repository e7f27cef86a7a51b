//! Theme persistence on top of an injected key-value store.
//!
//! [`ThemeRepository`] keeps every saved theme as one JSON array under
//! [`THEMES_KEY`] and the active theme's id under [`ACTIVE_THEME_KEY`].
//! Writes are read-modify-write under a lock shared by all clones of one
//! repository. There is no locking across processes, so two processes racing
//! on the same store can still lose an update.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::constants::{ACTIVE_THEME_KEY, STORE_FILE_NAME, THEMES_KEY};
use crate::models::{ColorScheme, ThemeCustomizations, ThemeUpdate, WebsiteTemplate};

/// String key-value storage.
///
/// Implementations must be safe to share between request handlers.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store, mainly for tests and the web server's scratch mode.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file in a directory.
///
/// Every write rewrites the whole file through a temp file + rename. A
/// mutex serializes writers within this process only.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (without creating) the store file inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORE_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file: {}", self.path.display()))
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize store contents")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp store file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace store file: {}", self.path.display()))?;

        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("File store lock poisoned"))?;
        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

/// CRUD and active-theme tracking for [`ThemeCustomizations`].
#[derive(Clone)]
pub struct ThemeRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ThemeRepository {
    /// Wraps a store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Theme repository lock poisoned"))
    }

    /// Strict read used by every write path: a store that cannot be read or
    /// parsed is an error, so corrupt data is never replaced.
    fn load(&self) -> Result<Vec<ThemeCustomizations>> {
        match self.store.get(THEMES_KEY).context("Failed to read saved themes")? {
            Some(raw) => serde_json::from_str(&raw)
                .context("Saved themes are corrupt; refusing to overwrite them"),
            None => Ok(Vec::new()),
        }
    }

    /// All saved themes, in insertion order.
    ///
    /// Missing, unreadable or corrupt data is logged and treated as empty.
    pub fn list(&self) -> Vec<ThemeCustomizations> {
        let raw = match self.store.get(THEMES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read saved themes: {:#}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(themes) => themes,
            Err(e) => {
                warn!("Saved themes are corrupt, ignoring them: {}", e);
                Vec::new()
            }
        }
    }

    /// Looks up a theme by id.
    pub fn get(&self, id: &str) -> Option<ThemeCustomizations> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Creates and saves a new theme. `colors` defaults to the fallback scheme.
    pub fn create(
        &self,
        name: &str,
        template_id: Option<&str>,
        colors: Option<ColorScheme>,
    ) -> Result<ThemeCustomizations> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Theme name cannot be empty");
        }

        let mut theme = ThemeCustomizations::new(name, colors.unwrap_or_default());
        theme.template_id = template_id.map(str::to_string);
        self.save(&theme)?;

        info!("Created theme '{}' ({})", theme.name, theme.id);
        Ok(theme)
    }

    /// Creates a theme seeded with a template's name and color scheme.
    pub fn create_from_template(&self, template: &WebsiteTemplate) -> Result<ThemeCustomizations> {
        self.create(
            &format!("{} Theme", template.name),
            Some(&template.id),
            Some(template.color_scheme),
        )
    }

    /// Inserts `theme`, or replaces the saved theme with the same id.
    pub fn save(&self, theme: &ThemeCustomizations) -> Result<()> {
        let _guard = self.lock()?;
        let mut themes = self.load()?;
        match themes.iter_mut().find(|t| t.id == theme.id) {
            Some(existing) => *existing = theme.clone(),
            None => themes.push(theme.clone()),
        }
        self.write(&themes)
    }

    /// Applies one update to a saved theme.
    pub fn update(&self, id: &str, update: ThemeUpdate) -> Result<ThemeCustomizations> {
        self.update_many(id, vec![update])
    }

    /// Applies updates in order and saves once.
    pub fn update_many(&self, id: &str, updates: Vec<ThemeUpdate>) -> Result<ThemeCustomizations> {
        let _guard = self.lock()?;
        let mut themes = self.load()?;
        let Some(theme) = themes.iter_mut().find(|t| t.id == id) else {
            bail!("Theme '{}' not found", id);
        };

        for update in updates {
            theme.apply(update);
        }
        let updated = theme.clone();
        self.write(&themes)?;

        debug!("Updated theme {}", id);
        Ok(updated)
    }

    /// Deletes a theme, clearing the active pointer if it referenced it.
    ///
    /// Returns whether a theme was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.lock()?;
        let mut themes = self.load()?;
        let before = themes.len();
        themes.retain(|t| t.id != id);
        if themes.len() == before {
            return Ok(false);
        }

        self.write(&themes)?;
        if self.active_id().as_deref() == Some(id) {
            self.store
                .remove(ACTIVE_THEME_KEY)
                .context("Failed to clear active theme")?;
        }

        info!("Deleted theme {}", id);
        Ok(true)
    }

    /// Marks a saved theme as active.
    pub fn set_active(&self, id: &str) -> Result<()> {
        let _guard = self.lock()?;
        if !self.load()?.iter().any(|t| t.id == id) {
            bail!("Theme '{}' not found", id);
        }
        self.store
            .set(ACTIVE_THEME_KEY, id)
            .context("Failed to store active theme")
    }

    /// The active theme, if the pointer is set and still resolves.
    pub fn active(&self) -> Option<ThemeCustomizations> {
        let id = self.active_id()?;
        let theme = self.get(&id);
        if theme.is_none() {
            debug!("Active theme pointer '{}' is dangling", id);
        }
        theme
    }

    fn active_id(&self) -> Option<String> {
        match self.store.get(ACTIVE_THEME_KEY) {
            Ok(id) => id.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read active theme: {:#}", e);
                None
            }
        }
    }

    /// Copies a theme under a new name, id and timestamps.
    pub fn duplicate(&self, id: &str, name: &str) -> Result<ThemeCustomizations> {
        let mut copy = self
            .get(id)
            .with_context(|| format!("Theme '{id}' not found"))?;
        copy.reissue();
        copy.name = name.trim().to_string();
        if copy.name.is_empty() {
            bail!("Theme name cannot be empty");
        }
        self.save(&copy)?;
        Ok(copy)
    }

    /// Pretty-printed JSON for one theme.
    pub fn export(&self, id: &str) -> Result<String> {
        let theme = self
            .get(id)
            .with_context(|| format!("Theme '{id}' not found"))?;
        serde_json::to_string_pretty(&theme).context("Failed to serialize theme")
    }

    /// Imports a theme exported by [`export`](Self::export).
    ///
    /// The theme always gets a fresh id and timestamps, so importing the same
    /// file twice yields two themes.
    pub fn import(&self, json: &str) -> Result<ThemeCustomizations> {
        let value: Value = serde_json::from_str(json).context("Theme import is not valid JSON")?;
        if !value.is_object() {
            bail!("Theme import must be a JSON object");
        }
        let mut theme: ThemeCustomizations =
            serde_json::from_value(value).context("Theme import does not describe a theme")?;
        if theme.name.trim().is_empty() {
            bail!("Imported theme has an empty name");
        }

        theme.reissue();
        self.save(&theme)?;
        info!("Imported theme '{}' as {}", theme.name, theme.id);
        Ok(theme)
    }

    fn write(&self, themes: &[ThemeCustomizations]) -> Result<()> {
        let json = serde_json::to_string(themes).context("Failed to serialize themes")?;
        self.store
            .set(THEMES_KEY, &json)
            .context("Failed to save themes")
    }
}
