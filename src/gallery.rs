//! Monthly drawing gallery
//!
//! Holds the current calendar month's drawings, up to 20. Older months
//! expire the next time the gallery is touched. Persisted through a
//! `GalleryStorage`, LocalStorage in the browser.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum drawings kept per month
pub const MAX_ITEMS: usize = 20;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A single submitted drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    /// PNG data URL
    pub image_data: String,
    pub author_name: String,
    /// Unix timestamp (ms) of submission
    pub timestamp: f64,
    /// `YYYY-MM` of submission
    pub month_key: String,
}

/// Where finished drawings go
pub trait ImageStore {
    /// Store one drawing. Returns false if it could not be kept.
    fn store(&mut self, image: &str, author: &str, now_ms: f64) -> bool;

    /// Current drawings, newest first
    fn list(&mut self, now_ms: f64) -> Vec<GalleryItem>;
}

/// `YYYY-MM` in UTC for a unix timestamp in ms
pub fn month_key(now_ms: f64) -> Option<String> {
    let date = DateTime::<Utc>::from_timestamp_millis(now_ms as i64)?;
    Some(date.format("%Y-%m").to_string())
}

/// Start of the following calendar month (ms)
fn next_month_start(now_ms: f64) -> Option<f64> {
    let date = DateTime::<Utc>::from_timestamp_millis(now_ms as i64)?;
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    Some(start.timestamp_millis() as f64)
}

/// Whole days (rounded up) until the gallery empties for the new month
pub fn days_until_reset(now_ms: f64) -> u32 {
    next_month_start(now_ms)
        .map(|next| ((next - now_ms) / MS_PER_DAY).ceil().max(0.0) as u32)
        .unwrap_or(0)
}

/// Longest author name the gallery keeps
pub const MAX_AUTHOR_LEN: usize = 50;

/// Trim, cap length, fall back to "Anonymous"
pub fn normalize_author(author: &str) -> String {
    let trimmed: String = author.trim().chars().take(MAX_AUTHOR_LEN).collect();
    if trimmed.is_empty() {
        "Anonymous".to_string()
    } else {
        trimmed
    }
}

/// Where the gallery's JSON lives between page loads
pub trait GalleryStorage {
    fn read(&self) -> Option<String>;
    /// Returns false if the write was refused (quota, no storage)
    fn write(&mut self, json: &str) -> bool;
}

/// LocalStorage on wasm, process memory natively
#[derive(Debug, Default)]
pub struct BrowserStorage {
    #[cfg(not(target_arch = "wasm32"))]
    saved: Option<String>,
}

impl BrowserStorage {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tiny-canvas-gallery";
}

#[cfg(target_arch = "wasm32")]
impl GalleryStorage for BrowserStorage {
    fn read(&self) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?
            .get_item(Self::STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn write(&mut self, json: &str) -> bool {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        match storage {
            Some(storage) => storage.set_item(Self::STORAGE_KEY, json).is_ok(),
            None => false,
        }
    }
}

/// Native stand-in
#[cfg(not(target_arch = "wasm32"))]
impl GalleryStorage for BrowserStorage {
    fn read(&self) -> Option<String> {
        self.saved.clone()
    }

    fn write(&mut self, json: &str) -> bool {
        self.saved = Some(json.to_string());
        true
    }
}

/// Gallery of the current month's drawings
#[derive(Debug)]
pub struct MonthlyGallery<S: GalleryStorage = BrowserStorage> {
    items: Vec<GalleryItem>,
    storage: S,
}

impl MonthlyGallery {
    /// Empty gallery over LocalStorage
    pub fn new() -> Self {
        Self::with_storage(BrowserStorage::default())
    }

    /// Gallery as last saved to LocalStorage
    pub fn load() -> Self {
        Self::from_storage(BrowserStorage::default())
    }
}

impl Default for MonthlyGallery {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GalleryStorage> MonthlyGallery<S> {
    /// Empty gallery; anything already in `storage` is overwritten on the next save
    pub fn with_storage(storage: S) -> Self {
        Self {
            items: Vec::new(),
            storage,
        }
    }

    /// Gallery restored from whatever `storage` holds
    pub fn from_storage(storage: S) -> Self {
        let items = match storage.read() {
            Some(json) => match serde_json::from_str::<Vec<GalleryItem>>(&json) {
                Ok(items) => {
                    log::info!("Loaded {} gallery drawings", items.len());
                    items
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable gallery: {}", e);
                    Vec::new()
                }
            },
            None => {
                log::info!("No gallery found, starting fresh");
                Vec::new()
            }
        };
        Self { items, storage }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop items from any month but the current one.
    /// Returns true if anything was removed.
    fn expire(&mut self, current: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.month_key == current);
        let removed = before - self.items.len();
        if removed > 0 {
            log::info!("Expired {} drawings from previous months", removed);
        }
        removed > 0
    }

    /// Unique id from the submission time
    fn next_id(&self, now_ms: f64) -> String {
        let base = (now_ms as i64).to_string();
        let mut id = base.clone();
        let mut n = 1;
        while self.items.iter().any(|item| item.id == id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        id
    }

    fn save(&mut self) -> bool {
        match serde_json::to_string(&self.items) {
            Ok(json) => self.storage.write(&json),
            Err(e) => {
                log::error!("Could not serialize gallery: {}", e);
                false
            }
        }
    }
}

impl<S: GalleryStorage> ImageStore for MonthlyGallery<S> {
    fn store(&mut self, image: &str, author: &str, now_ms: f64) -> bool {
        let Some(current) = month_key(now_ms) else {
            log::warn!("Rejected drawing with invalid timestamp {}", now_ms);
            return false;
        };
        // Nothing changes unless the write goes through
        let before = self.items.clone();
        self.expire(&current);

        if self.items.len() >= MAX_ITEMS {
            if let Some(oldest) = self
                .items
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.timestamp.total_cmp(&b.1.timestamp))
                .map(|(i, _)| i)
            {
                let evicted = self.items.remove(oldest);
                log::info!("Gallery full, evicting drawing {}", evicted.id);
            }
        }

        let item = GalleryItem {
            id: self.next_id(now_ms),
            image_data: image.to_string(),
            author_name: normalize_author(author),
            timestamp: now_ms,
            month_key: current,
        };
        self.items.push(item);

        if self.save() {
            true
        } else {
            log::warn!("Gallery write refused, drawing not stored");
            self.items = before;
            false
        }
    }

    fn list(&mut self, now_ms: f64) -> Vec<GalleryItem> {
        let Some(current) = month_key(now_ms) else {
            return Vec::new();
        };
        if self.expire(&current) {
            self.save();
        }
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
        items
    }
}
