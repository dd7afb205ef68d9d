//! Category filtering, free-text search and sectioning.
//!
//! # Responsibility
//! - Match items against whitespace-separated search terms.
//! - Group matches into display sections by tag category.
//!
//! # Invariants
//! - Pure: identical inputs always produce identical views.
//! - Rows keep original collection order inside each section.
//! - A search with no terms is treated as no search.

use crate::model::todo::{Category, TodoItem};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Filter and search state supplied by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    /// Restricts results to one tag category; `None` shows every category.
    pub category: Option<Category>,
    /// Raw search field text.
    pub search_text: String,
}

impl TodoQuery {
    pub fn new(category: Option<Category>, search_text: impl Into<String>) -> Self {
        Self {
            category,
            search_text: search_text.into(),
        }
    }
}

/// One titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub items: Vec<TodoItem>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// Sectioned result of [`build_view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub sections: Vec<Section>,
}

impl TodoView {
    /// Row lookup by section and row index.
    pub fn item_at(&self, section: usize, row: usize) -> Option<&TodoItem> {
        self.sections.get(section)?.items.get(row)
    }

    /// Number of rows across all sections.
    pub fn total(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }
}

/// Splits search text into lowercase terms.
pub fn search_terms(text: &str) -> Vec<String> {
    let lowered = text.trim().to_lowercase();
    WHITESPACE_RE
        .split(&lowered)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns whether every term occurs in the item's title or notes.
pub fn matches_terms(item: &TodoItem, terms: &[String]) -> bool {
    let haystack = format!(
        "{} {}",
        item.title,
        item.notes.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// Builds the sectioned view for `items` under `query`.
///
/// # Contract
/// - Without a category filter: one section per `Category::DISPLAY_ORDER`
///   entry, empty sections included.
/// - With a category filter: a single section for that category.
pub fn build_view(items: &[TodoItem], query: &TodoQuery) -> TodoView {
    let terms = search_terms(&query.search_text);
    let matched: Vec<&TodoItem> = items
        .iter()
        .filter(|item| terms.is_empty() || matches_terms(item, &terms))
        .collect();

    let sections = match query.category {
        Some(category) => vec![section_for(category, &matched)],
        None => Category::DISPLAY_ORDER
            .iter()
            .map(|category| section_for(*category, &matched))
            .collect(),
    };

    TodoView { sections }
}

fn section_for(category: Category, items: &[&TodoItem]) -> Section {
    Section {
        category,
        items: items
            .iter()
            .filter(|item| item.tag_category() == category)
            .map(|item| (*item).clone())
            .collect(),
    }
}
