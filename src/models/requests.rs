//! Request DTOs for the menu API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use super::Price;

/// Maximum allowed title length in characters
pub const MAX_TITLE_LENGTH: usize = 256;

/// Default page size of list endpoints
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: u32 = 100;

fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return Some("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Some(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    None
}

/// Request body for creating a menu or a submenu
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCreate {
    pub title: String,
    pub description: String,
}

/// Submenus carry the same fields as menus
pub type SubMenuCreate = MenuCreate;

impl MenuCreate {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_title(&self.title)
    }
}

/// Partial update of a menu or a submenu; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type SubMenuUpdate = MenuUpdate;

impl MenuUpdate {
    pub fn validate(&self) -> Option<String> {
        self.title.as_deref().and_then(validate_title)
    }
}

/// Request body for creating a dish
#[derive(Debug, Clone, Deserialize)]
pub struct DishCreate {
    pub title: String,
    pub description: String,
    pub price: Price,
}

impl DishCreate {
    pub fn validate(&self) -> Option<String> {
        validate_title(&self.title)
    }
}

/// Partial update of a dish
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
}

impl DishUpdate {
    pub fn validate(&self) -> Option<String> {
        self.title.as_deref().and_then(validate_title)
    }
}

/// Query string of list endpoints: `?page=2&limit=10&search=soup`
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Substring the title must contain; empty matches everything
    #[serde(default)]
    pub search: String,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: String::new(),
        }
    }
}

impl ListParams {
    /// Page size clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit.clamp(1, MAX_PAGE_LIMIT))
    }

    /// Rows to skip; pages are 1-based and page 0 reads as page 1.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_create_deserialize() {
        let json = r#"{"title": "Lunch", "description": "Served 12-15"}"#;
        let req: MenuCreate = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Lunch");
        assert_eq!(req.description, "Served 12-15");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_blank_title() {
        let req = MenuCreate {
            title: "   ".to_string(),
            description: "x".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_title() {
        let req = DishCreate {
            title: "x".repeat(MAX_TITLE_LENGTH + 1),
            description: String::new(),
            price: Price::from_cents(100),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_partial_update_deserialize() {
        let req: DishUpdate = serde_json::from_str(r#"{"price": "9.99"}"#).unwrap();
        assert!(req.title.is_none());
        assert!(req.description.is_none());
        assert_eq!(req.price, Some(Price::from_cents(999)));
        assert!(req.validate().is_none());

        let req: MenuUpdate = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert!(params.search.is_empty());
    }

    #[test]
    fn test_list_params_paging() {
        let params = ListParams {
            page: 3,
            limit: 20,
            search: String::new(),
        };
        assert_eq!(params.offset(), 40);

        let params = ListParams {
            page: 0,
            limit: 0,
            search: String::new(),
        };
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);

        let params = ListParams {
            page: 2,
            limit: 5000,
            search: String::new(),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 100);
    }
}
