use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Photography,
    Music,
    Fitness,
    Cooking,
    Art,
    Technology,
    Business,
}

impl Category {
    /// Display order of the explore page's category tabs.
    pub const ALL: [Category; 8] = [
        Category::All,
        Category::Photography,
        Category::Music,
        Category::Fitness,
        Category::Cooking,
        Category::Art,
        Category::Technology,
        Category::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Photography => "Photography",
            Category::Music => "Music",
            Category::Fitness => "Fitness",
            Category::Cooking => "Cooking",
            Category::Art => "Art",
            Category::Technology => "Technology",
            Category::Business => "Business",
        }
    }

    /// `All` matches every item.
    pub fn matches(&self, other: Category) -> bool {
        *self == Category::All || *self == other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination envelope returned by the posts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_posts: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub limits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub category: Category,
    pub is_free: bool,
    pub price: f64,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub features: Vec<String>,
}
