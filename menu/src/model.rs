use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub const MENU_ENDPOINT: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/menu.json";

/// Top-level wire document returned by the remote menu source.
#[derive(Serialize, Deserialize)]
pub struct MenuDocument {
    pub menu: Vec<Dish>,
}

/// One menu record, shared between the wire format and the local snapshot.
/// `id` and `title` are required on the wire; everything else defaults.
/// Prices stay strings, no arithmetic ever touches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Decodes the menu document, all-or-nothing. Document order is preserved,
/// the store re-sorts on query anyway.
pub fn parse_menu(bytes: &[u8]) -> Result<Vec<Dish>, DecodeError> {
    let document: MenuDocument = serde_json::from_slice(bytes)?;
    Ok(document.menu)
}
