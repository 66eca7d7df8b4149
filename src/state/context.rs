//! Application and interface context
//!
//! `AppContext` bundles the long-lived services built from settings at
//! start-up. `UiContext` carries the viewer's language and credentials and
//! is passed explicitly to whatever renders labels; nothing reads it from
//! ambient state.

use std::sync::Arc;

use crate::i18n::{I18n, Language, TranslationParams};
use crate::models::EventStatus;
use crate::query::{EventQueryEngine, QuerySpec, SortDirection, SortKey, SortState};
use crate::services::{ApiClient, ExportService};
use crate::utils::errors::Result;
use crate::utils::helpers::DateFormatter;
use crate::Settings;

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub api: Arc<ApiClient>,
    pub engine: EventQueryEngine,
    pub export: ExportService,
    pub i18n: Arc<I18n>,
}

impl AppContext {
    /// Build every service from settings and load translation overrides
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&settings.api, settings.api.token.clone())?);
        let engine = EventQueryEngine::from_config(&settings.query);
        let export = ExportService::new(DateFormatter::new(settings.query.date_display_format.clone()));

        let mut i18n = I18n::new(&settings.i18n);
        i18n.load_overrides().await?;

        Ok(Self {
            settings,
            api,
            engine,
            export,
            i18n: Arc::new(i18n),
        })
    }

    /// Interface context for a viewer, falling back to the default language
    pub fn ui(&self, language: Option<Language>) -> UiContext {
        let language = language
            .filter(|lang| self.i18n.is_language_supported(*lang))
            .unwrap_or_else(|| self.i18n.default_language());
        UiContext::new(language, self.settings.api.token.clone(), Arc::clone(&self.i18n))
    }

    /// Starting query for a table view, honouring the configured default sort
    pub fn default_query(&self) -> QuerySpec {
        let mut spec = QuerySpec::new();
        if let Some(key) = self.settings.query.default_sort_key.as_deref() {
            let direction = self
                .settings
                .query
                .default_sort_direction
                .as_deref()
                .and_then(|d| d.parse().ok())
                .unwrap_or(SortDirection::Ascending);
            spec = spec.sorted_by(SortKey::from_name(key), direction);
        }
        spec
    }
}

/// Viewer-scoped interface state
#[derive(Debug, Clone)]
pub struct UiContext {
    pub language: Language,
    pub token: Option<String>,
    i18n: Arc<I18n>,
}

impl UiContext {
    pub fn new(language: Language, token: Option<String>, i18n: Arc<I18n>) -> Self {
        Self { language, token, i18n }
    }

    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, self.language, None)
    }

    pub fn t_with(&self, key: &str, params: &TranslationParams) -> String {
        self.i18n.t(key, self.language, Some(params))
    }

    pub fn dir(&self) -> &'static str {
        self.language.dir()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn status_label(&self, status: EventStatus) -> String {
        self.t(status.as_str())
    }

    pub fn direction_label(&self, direction: SortDirection) -> String {
        match direction {
            SortDirection::Ascending => self.t("sortAscending"),
            SortDirection::Descending => self.t("sortDescending"),
        }
    }

    /// Caption for the active sort, `None` when the table is unsorted
    pub fn sort_label(&self, sort: &SortState) -> Option<String> {
        let (key, direction) = sort.active()?;
        let mut params = TranslationParams::new();
        params.insert("key".to_string(), key.as_str().to_string());
        params.insert("direction".to_string(), self.direction_label(direction));
        Some(self.t_with("sortedBy", &params))
    }

    /// Result counter such as `3 of 10 shown`
    pub fn shown_label(&self, shown: usize, total: usize) -> String {
        let mut params = TranslationParams::new();
        params.insert("shown".to_string(), shown.to_string());
        params.insert("total".to_string(), total.to_string());
        self.t_with("eventsShown", &params)
    }
}
