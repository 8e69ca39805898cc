//! Shopping list aggregation.
//!
//! A user's cart can hold several recipes calling for the same ingredient.
//! The shopping list collapses those rows into one line per ingredient,
//! keyed by `(name, measurement_unit)` rather than by database row: two
//! distinct ingredient records that share a name and unit are the same
//! thing on a shopping trip.
//!
//! Grouping is stable. Lines appear in the order their key was first seen
//! in the input, so a deterministic input order yields a deterministic file.

use std::collections::HashMap;

use super::Username;

/// One ingredient row reachable through a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

impl CartIngredient {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Aggregated shopping list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: u64,
}

impl ShoppingListLine {
    /// Render as `"<name> <amount> <unit>"`.
    pub fn render(&self) -> String {
        format!("{} {} {}", self.name, self.total_amount, self.measurement_unit)
    }
}

/// Group cart rows by `(name, measurement_unit)` and sum their amounts.
///
/// Each key appears exactly once in the output, in first-seen order. Empty
/// input yields an empty list.
///
/// # Examples
/// ```
/// use recipe_book::domain::{CartIngredient, aggregate_ingredients};
///
/// let lines = aggregate_ingredients([
///     CartIngredient::new("egg", "pcs", 2),
///     CartIngredient::new("egg", "pcs", 3),
///     CartIngredient::new("milk", "l", 1),
/// ]);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].total_amount, 5);
/// assert_eq!(lines[1].render(), "milk 1 l");
/// ```
pub fn aggregate_ingredients<I>(entries: I) -> Vec<ShoppingListLine>
where
    I: IntoIterator<Item = CartIngredient>,
{
    let mut lines: Vec<ShoppingListLine> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for entry in entries {
        let CartIngredient {
            name,
            measurement_unit,
            amount,
        } = entry;
        let key = (name, measurement_unit);
        match positions.get(&key).and_then(|index| lines.get_mut(*index)) {
            Some(line) => {
                line.total_amount = line.total_amount.saturating_add(u64::from(amount));
            }
            None => {
                positions.insert(key.clone(), lines.len());
                let (name, measurement_unit) = key;
                lines.push(ShoppingListLine {
                    name,
                    measurement_unit,
                    total_amount: u64::from(amount),
                });
            }
        }
    }

    lines
}

/// Downloadable shopping list for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    owner: Username,
    lines: Vec<ShoppingListLine>,
}

/// Body served when the cart holds nothing.
pub const EMPTY_SHOPPING_LIST: &str = "Shopping list is empty.";

impl ShoppingList {
    /// Aggregate `entries` into a list owned by `owner`.
    pub fn from_cart<I>(owner: Username, entries: I) -> Self
    where
        I: IntoIterator<Item = CartIngredient>,
    {
        Self {
            owner,
            lines: aggregate_ingredients(entries),
        }
    }

    /// Owner of the cart.
    pub fn owner(&self) -> &Username {
        &self.owner
    }

    /// Aggregated lines.
    pub fn lines(&self) -> &[ShoppingListLine] {
        &self.lines
    }

    /// Whether the cart produced no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Suggested attachment file name.
    pub fn file_name(&self) -> String {
        format!("{}_shopping_list.txt", self.owner)
    }

    /// Plain-text rendering: a header, a blank line, then one line per
    /// ingredient. An empty list renders as [`EMPTY_SHOPPING_LIST`].
    pub fn render_text(&self) -> String {
        if self.lines.is_empty() {
            return EMPTY_SHOPPING_LIST.to_owned();
        }
        let mut text = format!("Shopping list for {}:\n", self.owner);
        for line in &self.lines {
            text.push('\n');
            text.push_str(&line.render());
        }
        text
    }
}
