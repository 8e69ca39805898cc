//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, update this file to match; the
//! `diesel print-schema` command can generate it from a live database.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` are unique.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        is_admin -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient catalogue. `(name, measurement_unit)` is unique.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    /// Recipe tags. `name`, `color` and `slug` are each unique.
    tags (id) {
        id -> Uuid,
        name -> Varchar,
        /// `#RRGGBB`.
        color -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        author_id -> Uuid,
        name -> Varchar,
        text -> Text,
        image -> Varchar,
        /// Minutes; constrained to `>= 1`.
        cooking_time -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe to tag links. Cascades on recipe delete.
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Uuid,
        tag_id -> Uuid,
    }
}

diesel::table! {
    /// Ingredient lines of a recipe. Cascades on recipe delete.
    ///
    /// `position` preserves submission order; `amount` is constrained to
    /// `1..=32000`.
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Uuid,
        ingredient_id -> Uuid,
        amount -> Int4,
        position -> Int4,
    }
}

diesel::table! {
    /// Favorited recipes; the composite key makes `(user, recipe)` unique.
    favorites (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes in a user's shopping cart; `(user, recipe)` is unique.
    shopping_cart (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Follower to author relation. A check constraint forbids
    /// `follower_id = author_id`.
    follows (follower_id, author_id) {
        follower_id -> Uuid,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(shopping_cart -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    tags,
    recipes,
    recipe_tags,
    recipe_ingredients,
    favorites,
    shopping_cart,
    follows,
);
