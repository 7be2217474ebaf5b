//! Category registry and selected filter.
//!
//! # Invariants
//! - Known categories keep insertion order and never contain duplicates.
//! - The `All` sentinel is never stored among known categories.

/// Label of the wildcard filter that matches every category.
pub const ALL_CATEGORIES: &str = "All";

/// Filter scoping the completion view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact category name. Unknown names are accepted and match nothing.
    Named(String),
}

impl CategoryFilter {
    /// Maps a UI label to a filter; `"All"` becomes the wildcard.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(label)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name.as_str(),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    known: Vec<String>,
    selected: CategoryFilter,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the registry from persisted names, dropping repeats.
    pub fn from_known(names: Vec<String>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.insert(name);
        }
        registry
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.iter().any(|known| known == name)
    }

    pub fn select(&mut self, filter: CategoryFilter) {
        self.selected = filter;
    }

    /// Registers a category typed into the category picker.
    ///
    /// Returns `true` only when the known set changed. Blank names are ignored.
    pub fn create(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.register(name)
    }

    /// Records the category of a newly created habit, blank names included.
    ///
    /// Returns `true` only when the known set changed.
    pub fn register(&mut self, name: &str) -> bool {
        self.insert(name.to_string())
    }

    /// Options offered by a category picker: the wildcard first, then every
    /// known category.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.known.iter().cloned())
            .collect()
    }

    fn insert(&mut self, name: String) -> bool {
        if name == ALL_CATEGORIES || self.contains(&name) {
            return false;
        }
        self.known.push(name);
        true
    }
}
