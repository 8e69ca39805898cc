//! Test utilities for the backend crate.
//!
//! Builders for valid domain values shared by service and handler tests.
//! Only compiled for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::{Ingredient, Recipe, RecipeIngredient, Tag, User, UserDraft, UserId};

/// Fixed timestamp used by [`fixture_clock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// Build a valid non-admin user.
pub fn sample_user(username: &str) -> User {
    user_with_role(username, false)
}

/// Build a valid user with the given admin flag.
pub fn user_with_role(username: &str, is_admin: bool) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "Cook".to_owned(),
        is_admin,
    })
    .expect("valid fixture user")
}

/// Build an ingredient with a random id.
pub fn sample_ingredient(name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

/// Build a tag with a random id.
pub fn sample_tag(slug: &str) -> Tag {
    Tag {
        id: Uuid::new_v4(),
        name: slug.to_uppercase(),
        color: "#E26C2D".to_owned(),
        slug: slug.to_owned(),
    }
}

/// Build a stored recipe by `author` with one tag and one ingredient.
pub fn sample_recipe(author: &User, name: &str) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        author: author.clone(),
        name: name.to_owned(),
        text: format!("How to cook {name}."),
        image: format!("recipes/images/{}.png", name.to_lowercase()),
        cooking_time: 15,
        tags: vec![sample_tag("dinner")],
        ingredients: vec![RecipeIngredient {
            ingredient: sample_ingredient("egg", "pcs"),
            amount: 2,
        }],
        created_at: fixture_timestamp(),
    }
}
