//! Shopping list aggregation through the public domain API.

use recipe_book::domain::{
    CartIngredient, EMPTY_SHOPPING_LIST, ShoppingList, Username, aggregate_ingredients,
};
use rstest::{fixture, rstest};

#[fixture]
fn owner() -> Username {
    Username::new("ada").expect("valid username")
}

/// Two recipes in the cart, both calling for eggs.
#[fixture]
fn pancakes_and_omelette() -> Vec<CartIngredient> {
    vec![
        CartIngredient::new("egg", "pcs", 2),
        CartIngredient::new("flour", "g", 200),
        CartIngredient::new("milk", "ml", 300),
        CartIngredient::new("egg", "pcs", 3),
        CartIngredient::new("milk", "ml", 50),
    ]
}

#[rstest]
fn shared_ingredients_are_summed_in_first_seen_order(pancakes_and_omelette: Vec<CartIngredient>) {
    let lines = aggregate_ingredients(pancakes_and_omelette);

    let rendered: Vec<String> = lines.iter().map(|line| line.render()).collect();
    assert_eq!(rendered, ["egg 5 pcs", "flour 200 g", "milk 350 ml"]);
}

#[rstest]
fn same_name_with_different_units_stays_separate() {
    let lines = aggregate_ingredients([
        CartIngredient::new("sugar", "g", 100),
        CartIngredient::new("sugar", "tbsp", 2),
        CartIngredient::new("sugar", "g", 50),
    ]);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines.first().map(|line| line.total_amount), Some(150));
    assert_eq!(lines.get(1).map(|line| line.total_amount), Some(2));
}

#[rstest]
fn totals_do_not_overflow_the_per_row_limit() {
    let lines = aggregate_ingredients([
        CartIngredient::new("rice", "g", u32::MAX),
        CartIngredient::new("rice", "g", u32::MAX),
    ]);

    assert_eq!(
        lines.first().map(|line| line.total_amount),
        Some(u64::from(u32::MAX) * 2)
    );
}

#[rstest]
fn rendered_file_lists_one_line_per_ingredient(
    owner: Username,
    pancakes_and_omelette: Vec<CartIngredient>,
) {
    let list = ShoppingList::from_cart(owner, pancakes_and_omelette);

    assert_eq!(list.file_name(), "ada_shopping_list.txt");
    assert_eq!(
        list.render_text(),
        "Shopping list for ada:\n\negg 5 pcs\nflour 200 g\nmilk 350 ml"
    );
}

#[rstest]
fn empty_cart_renders_placeholder(owner: Username) {
    let list = ShoppingList::from_cart(owner, Vec::new());

    assert!(list.is_empty());
    assert_eq!(list.render_text(), EMPTY_SHOPPING_LIST);
}
