//! Translation tables and override loading
//!
//! Built-in English and Arabic strings ship with the binary. Administrators
//! can override individual keys per language; overrides live in
//! `translations_<lang>.json` files and are merged over the built-ins.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, info, warn};
use crate::config::I18nConfig;
use crate::utils::errors::{PartyBoardError, Result};

/// Interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    /// Value for the document `dir` attribute
    pub fn dir(&self) -> &'static str {
        if self.is_rtl() { "rtl" } else { "ltr" }
    }

    fn builtin(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Ar => AR,
        }
    }
}

impl FromStr for Language {
    type Err = PartyBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(PartyBoardError::InvalidInput(format!("unsupported language: {}", other))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

/// Built-in strings plus per-language overrides
#[derive(Debug, Clone)]
pub struct I18n {
    overrides: HashMap<Language, HashMap<String, String>>,
    default_language: Language,
    supported_languages: Vec<Language>,
    overrides_dir: Option<PathBuf>,
}

impl I18n {
    /// Create a new I18n instance; unknown codes in the config are skipped
    pub fn new(config: &I18nConfig) -> Self {
        let supported_languages: Vec<Language> = config
            .supported_languages
            .iter()
            .filter_map(|code| code.parse().ok())
            .collect();

        Self {
            overrides: HashMap::new(),
            default_language: config.default_language.parse().unwrap_or(Language::En),
            supported_languages,
            overrides_dir: config.overrides_dir.as_ref().map(PathBuf::from),
        }
    }

    /// Load override files for every supported language
    ///
    /// Missing files are normal. Malformed files are logged and ignored so a
    /// bad edit never takes the interface down.
    pub async fn load_overrides(&mut self) -> Result<()> {
        let Some(dir) = self.overrides_dir.clone() else {
            return Ok(());
        };

        for lang in self.supported_languages.clone() {
            let path = override_path(&dir, lang);
            if !path.exists() {
                debug!("No translation overrides for {}", lang);
                continue;
            }

            match read_override_file(&path).await {
                Ok(map) => {
                    info!("Loaded {} translation overrides for {}", map.len(), lang);
                    self.overrides.insert(lang, map);
                }
                Err(e) => {
                    warn!("Ignoring translation overrides in {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

    /// Persist the overrides for one language
    pub async fn save_overrides(&self, lang: Language) -> Result<()> {
        let dir = self.overrides_dir.as_ref().ok_or_else(|| {
            PartyBoardError::Config("No translation overrides directory configured".to_string())
        })?;

        fs::create_dir_all(dir).await?;
        let empty = HashMap::new();
        let map = self.overrides.get(&lang).unwrap_or(&empty);
        let content = serde_json::to_string_pretty(map)?;
        fs::write(override_path(dir, lang), content).await?;
        info!("Saved {} translation overrides for {}", map.len(), lang);
        Ok(())
    }

    pub fn set_override(&mut self, lang: Language, key: &str, value: &str) {
        self.overrides
            .entry(lang)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Drop all overrides for a language, restoring the built-ins
    pub fn reset_overrides(&mut self, lang: Language) {
        self.overrides.remove(&lang);
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: Language, params: Option<&TranslationParams>) -> String {
        let lang = self.get_effective_language(lang);

        let text = self
            .lookup(key, lang)
            .or_else(|| self.lookup(key, self.default_language))
            .unwrap_or_else(|| {
                warn!("Translation key '{}' not found", key);
                key.to_string()
            });

        self.format_message(&text, params)
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: Language) -> bool {
        self.supported_languages.contains(&lang)
    }

    /// Get the effective language (fallback to default if not supported)
    fn get_effective_language(&self, lang: Language) -> Language {
        if self.is_language_supported(lang) {
            lang
        } else {
            self.default_language
        }
    }

    fn lookup(&self, key: &str, lang: Language) -> Option<String> {
        if let Some(value) = self.overrides.get(&lang).and_then(|map| map.get(key)) {
            return Some(value.clone());
        }
        lang.builtin()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }

    /// Format message with parameters
    fn format_message(&self, template: &str, params: Option<&TranslationParams>) -> String {
        if let Some(params) = params {
            let mut result = template.to_string();
            for (key, value) in params {
                let placeholder = format!("{{{}}}", key);
                result = result.replace(&placeholder, value);
            }
            result
        } else {
            template.to_string()
        }
    }

    /// Get supported languages
    pub fn supported_languages(&self) -> &[Language] {
        &self.supported_languages
    }

    /// Get default language
    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Pick a language from a browser locale such as `ar-SA`
    pub fn detect_language(&self, locale: Option<&str>) -> Language {
        locale
            .and_then(|l| l.split(['-', '_']).next())
            .and_then(|code| code.parse().ok())
            .filter(|lang| self.is_language_supported(*lang))
            .unwrap_or(self.default_language)
    }

    /// Every translatable key, for the language settings screen
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        EN.iter().map(|(k, _)| *k)
    }
}

fn override_path(dir: &Path, lang: Language) -> PathBuf {
    dir.join(format!("translations_{}.json", lang.code()))
}

async fn read_override_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Object(map) => Ok(string_entries(map)),
        _ => Err(PartyBoardError::Config("override file must hold a JSON object".to_string())),
    }
}

/// Keep only string values; anything else cannot be a label
fn string_entries(map: Map<String, Value>) -> HashMap<String, String> {
    map.into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect()
}

static EN: &[(&str, &str)] = &[
    ("loading", "Loading..."),
    ("error", "Error"),
    ("success", "Success"),
    ("cancel", "Cancel"),
    ("save", "Save"),
    ("delete", "Delete"),
    ("edit", "Edit"),
    ("search", "Search"),
    ("filter", "Filter"),
    ("clear", "Clear"),
    ("dashboard", "Dashboard"),
    ("users", "Users"),
    ("events", "Manage Events"),
    ("parties", "Parties"),
    ("settings", "Settings"),
    ("eventManagement", "Event Management"),
    ("nearestParty", "Nearest Party"),
    ("noUpcomingParties", "No Upcoming Parties"),
    ("day", "Day"),
    ("date", "Date"),
    ("time", "Time"),
    ("duration", "Duration"),
    ("place", "Place"),
    ("participants", "Participants"),
    ("participationType", "Participation Type"),
    ("eventPurpose", "Event Purpose"),
    ("meetingDate", "Meeting Date"),
    ("meetingPlace", "Meeting Place"),
    ("status", "Status"),
    ("created", "Created"),
    ("updated", "Updated"),
    ("pending", "Pending"),
    ("confirmed", "Confirmed"),
    ("completed", "Completed"),
    ("cancelled", "Cancelled"),
    ("sortAscending", "A to Z"),
    ("sortDescending", "Z to A"),
    ("sortedBy", "Sorted by {key} ({direction})"),
    ("eventsShown", "{shown} of {total} shown"),
    ("noEventsFound", "No events found."),
    ("noEventsMatch", "No events match the current filters."),
    ("accessDenied", "Access Denied"),
];

static AR: &[(&str, &str)] = &[
    ("loading", "جاري التحميل..."),
    ("error", "خطأ"),
    ("success", "نجح"),
    ("cancel", "إلغاء"),
    ("save", "حفظ"),
    ("delete", "حذف"),
    ("edit", "تعديل"),
    ("search", "بحث"),
    ("filter", "تصفية"),
    ("clear", "مسح"),
    ("dashboard", "الصفحة الرئيسية"),
    ("users", "المستخدمين"),
    ("events", "ادارة المناسبات"),
    ("parties", "المناسبات"),
    ("settings", "الإعدادات"),
    ("eventManagement", "إدارة الأحداث"),
    ("nearestParty", "أقرب حفلة"),
    ("noUpcomingParties", "لا توجد حفلات قادمة"),
    ("day", "اليوم"),
    ("date", "التاريخ"),
    ("time", "الوقت"),
    ("duration", "المدة"),
    ("place", "المكان"),
    ("participants", "المشاركون"),
    ("participationType", "نوع المشاركة"),
    ("eventPurpose", "غرض الحدث"),
    ("meetingDate", "تاريخ الاجتماع"),
    ("meetingPlace", "مكان الاجتماع"),
    ("status", "الحالة"),
    ("created", "تاريخ الإنشاء"),
    ("updated", "تاريخ التحديث"),
    ("pending", "معلق"),
    ("confirmed", "مؤكد"),
    ("completed", "مكتمل"),
    ("cancelled", "ملغي"),
    ("sortAscending", "تصاعدي"),
    ("sortDescending", "تنازلي"),
];
