//! Tool catalog
//!
//! Static, ordered registry of tool categories. The home surface renders from
//! this data without loading any tool implementation.

mod builtin;
mod descriptors;

pub use builtin::BUILTIN_CATEGORIES;
pub use descriptors::{CategoryDescriptor, Icon, ToolDescriptor, ToolStatus};

use crate::paths::normalize_path;

/// Read-only view over a set of categories.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [CategoryDescriptor],
}

impl Catalog {
    pub const fn new(categories: &'static [CategoryDescriptor]) -> Self {
        Self { categories }
    }

    /// The catalog shipped with the server.
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_CATEGORIES)
    }

    pub fn categories(&self) -> &'static [CategoryDescriptor] {
        self.categories
    }

    pub fn category(&self, id: &str) -> Option<&'static CategoryDescriptor> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// All tools across categories, in display order.
    pub fn tools(&self) -> impl Iterator<Item = &'static ToolDescriptor> {
        self.categories
            .iter()
            .flat_map(|category| category.tools.iter())
    }

    pub fn tools_with_status(
        &self,
        status: ToolStatus,
    ) -> impl Iterator<Item = &'static ToolDescriptor> {
        self.tools().filter(move |tool| tool.status == status)
    }

    pub fn tool_by_path(&self, path: &str) -> Option<&'static ToolDescriptor> {
        let path = normalize_path(path);
        self.tools().find(|tool| normalize_path(tool.path) == path)
    }

    pub fn category_of(&self, path: &str) -> Option<&'static CategoryDescriptor> {
        let path = normalize_path(path);
        self.categories.iter().find(|category| {
            category
                .tools
                .iter()
                .any(|tool| normalize_path(tool.path) == path)
        })
    }

    pub fn tool_count(&self) -> usize {
        self.tools().count()
    }

    /// Categories keeping only the tools with the given status. Categories
    /// left empty are dropped.
    pub fn filtered(&self, status: ToolStatus) -> Vec<FilteredCategory> {
        self.categories
            .iter()
            .filter_map(|category| {
                let tools: Vec<&'static ToolDescriptor> = category
                    .tools
                    .iter()
                    .filter(|tool| tool.status == status)
                    .collect();
                if tools.is_empty() {
                    None
                } else {
                    Some(FilteredCategory { category, tools })
                }
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A category paired with a subset of its tools.
#[derive(Debug, Clone)]
pub struct FilteredCategory {
    pub category: &'static CategoryDescriptor,
    pub tools: Vec<&'static ToolDescriptor>,
}

impl serde::Serialize for FilteredCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("title", self.category.title)?;
        map.serialize_entry("id", self.category.id)?;
        map.serialize_entry("icon", &self.category.icon)?;
        map.serialize_entry("color", self.category.color)?;
        map.serialize_entry("background", self.category.background)?;
        map.serialize_entry("tools", &self.tools)?;
        map.end()
    }
}
