use serde::{Deserialize, Serialize};
use std::fmt;

/// A documentation grouping in the reference index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Variables,
    Constants,
    Functions,
    Keywords,
    Types,
    Operators,
    Annotations,
}

/// The kind of detail extraction a category receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Function,
    Variable,
}

impl Category {
    /// All categories, in crawl order
    pub const ALL: [Category; 7] = [
        Category::Variables,
        Category::Constants,
        Category::Functions,
        Category::Keywords,
        Category::Types,
        Category::Operators,
        Category::Annotations,
    ];

    /// Exact text of the category's section header in the index
    pub fn title(self) -> &'static str {
        match self {
            Category::Variables => "Variables",
            Category::Constants => "Constants",
            Category::Functions => "Functions",
            Category::Keywords => "Keywords",
            Category::Types => "Types",
            Category::Operators => "Operators",
            Category::Annotations => "Annotations",
        }
    }

    /// Lowercase name used for the artifact file
    pub fn slug(self) -> &'static str {
        match self {
            Category::Variables => "variables",
            Category::Constants => "constants",
            Category::Functions => "functions",
            Category::Keywords => "keywords",
            Category::Types => "types",
            Category::Operators => "operators",
            Category::Annotations => "annotations",
        }
    }

    /// Returns the detail extraction variant, or `None` for stub-only categories
    pub fn detail_kind(self) -> Option<DetailKind> {
        match self {
            Category::Functions => Some(DetailKind::Function),
            Category::Variables => Some(DetailKind::Variable),
            _ => None,
        }
    }

    /// Whether stubs of this category carry an in-page fragment
    pub fn captures_fragment(self) -> bool {
        self.detail_kind().is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
