//! Recipe aggregate and its write-side validation.
//!
//! A recipe owns an ordered list of ingredient amounts and a set of tags.
//! Callers submit a [`RecipeDraft`]; [`RecipeContent::new`] enforces the
//! invariants before anything reaches a repository.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::membership::RecipeMembership;
use super::{Ingredient, PageRequest, Tag, User, UserId};

/// Smallest ingredient amount a recipe may call for.
pub const MIN_AMOUNT: u32 = 1;
/// Largest ingredient amount a recipe may call for.
pub const MAX_AMOUNT: u32 = 32_000;
/// Shortest allowed cooking time, in minutes.
pub const MIN_COOKING_TIME: u32 = 1;
/// Maximum recipe name length.
pub const RECIPE_NAME_MAX: usize = 200;

/// One ingredient line as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAmount {
    pub ingredient_id: Uuid,
    pub amount: u32,
}

/// Unvalidated recipe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: u32,
    pub tag_ids: Vec<Uuid>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Validation errors returned by [`RecipeContent::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyText,
    EmptyImage,
    CookingTimeTooShort { min: u32 },
    NoIngredients,
    DuplicateIngredient { ingredient_id: Uuid },
    AmountOutOfRange { ingredient_id: Uuid, amount: u32 },
    NoTags,
    DuplicateTag { tag_id: Uuid },
}

impl RecipeValidationError {
    /// Payload field the error refers to, in API casing.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyText => "text",
            Self::EmptyImage => "image",
            Self::CookingTimeTooShort { .. } => "cookingTime",
            Self::NoIngredients
            | Self::DuplicateIngredient { .. }
            | Self::AmountOutOfRange { .. } => "ingredients",
            Self::NoTags | Self::DuplicateTag { .. } => "tags",
        }
    }
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "recipe name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "recipe name must be at most {max} characters")
            }
            Self::EmptyText => write!(f, "recipe text must not be empty"),
            Self::EmptyImage => write!(f, "recipe image must not be empty"),
            Self::CookingTimeTooShort { min } => {
                write!(f, "cooking time must be at least {min} minute(s)")
            }
            Self::NoIngredients => write!(f, "a recipe needs at least one ingredient"),
            Self::DuplicateIngredient { ingredient_id } => {
                write!(f, "ingredient {ingredient_id} is listed more than once")
            }
            Self::AmountOutOfRange {
                ingredient_id,
                amount,
            } => write!(
                f,
                "amount {amount} for ingredient {ingredient_id} must be between \
                 {MIN_AMOUNT} and {MAX_AMOUNT}"
            ),
            Self::NoTags => write!(f, "a recipe needs at least one tag"),
            Self::DuplicateTag { tag_id } => write!(f, "tag {tag_id} is listed more than once"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Validated recipe payload ready for persistence.
///
/// ## Invariants
/// - at least one ingredient, no ingredient listed twice, every amount in
///   `MIN_AMOUNT..=MAX_AMOUNT`;
/// - at least one tag, no tag listed twice;
/// - `cooking_time >= MIN_COOKING_TIME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeContent {
    name: String,
    text: String,
    image: String,
    cooking_time: u32,
    tag_ids: Vec<Uuid>,
    ingredients: Vec<IngredientAmount>,
}

impl RecipeContent {
    /// Validate a draft.
    ///
    /// # Examples
    /// ```
    /// use recipe_book::domain::{IngredientAmount, RecipeContent, RecipeDraft};
    /// use uuid::Uuid;
    ///
    /// let content = RecipeContent::new(RecipeDraft {
    ///     name: "Omelette".to_owned(),
    ///     text: "Whisk and fry.".to_owned(),
    ///     image: "recipes/images/omelette.png".to_owned(),
    ///     cooking_time: 10,
    ///     tag_ids: vec![Uuid::new_v4()],
    ///     ingredients: vec![IngredientAmount {
    ///         ingredient_id: Uuid::new_v4(),
    ///         amount: 3,
    ///     }],
    /// })
    /// .expect("valid recipe");
    /// assert_eq!(content.cooking_time(), 10);
    /// ```
    pub fn new(draft: RecipeDraft) -> Result<Self, RecipeValidationError> {
        let RecipeDraft {
            name,
            text,
            image,
            cooking_time,
            tag_ids,
            ingredients,
        } = draft;

        if name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if name.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        if text.trim().is_empty() {
            return Err(RecipeValidationError::EmptyText);
        }
        if image.trim().is_empty() {
            return Err(RecipeValidationError::EmptyImage);
        }
        if cooking_time < MIN_COOKING_TIME {
            return Err(RecipeValidationError::CookingTimeTooShort {
                min: MIN_COOKING_TIME,
            });
        }
        validate_ingredients(&ingredients)?;
        validate_tags(&tag_ids)?;

        Ok(Self {
            name,
            text,
            image,
            cooking_time,
            tag_ids,
            ingredients,
        })
    }

    /// Recipe title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cooking instructions.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stored image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Cooking time in minutes.
    pub fn cooking_time(&self) -> u32 {
        self.cooking_time
    }

    /// Tag identifiers in submission order.
    pub fn tag_ids(&self) -> &[Uuid] {
        &self.tag_ids
    }

    /// Ingredient lines in submission order.
    pub fn ingredients(&self) -> &[IngredientAmount] {
        &self.ingredients
    }
}

fn validate_ingredients(ingredients: &[IngredientAmount]) -> Result<(), RecipeValidationError> {
    if ingredients.is_empty() {
        return Err(RecipeValidationError::NoIngredients);
    }
    let mut seen = HashSet::with_capacity(ingredients.len());
    for line in ingredients {
        if !seen.insert(line.ingredient_id) {
            return Err(RecipeValidationError::DuplicateIngredient {
                ingredient_id: line.ingredient_id,
            });
        }
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&line.amount) {
            return Err(RecipeValidationError::AmountOutOfRange {
                ingredient_id: line.ingredient_id,
                amount: line.amount,
            });
        }
    }
    Ok(())
}

fn validate_tags(tag_ids: &[Uuid]) -> Result<(), RecipeValidationError> {
    if tag_ids.is_empty() {
        return Err(RecipeValidationError::NoTags);
    }
    let mut seen = HashSet::with_capacity(tag_ids.len());
    match tag_ids.iter().find(|id| !seen.insert(**id)) {
        Some(tag_id) => Err(RecipeValidationError::DuplicateTag { tag_id: *tag_id }),
        None => Ok(()),
    }
}

/// Ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: u32,
}

/// Stored recipe with its author, tags and ingredients resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Uuid,
    pub author: User,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: u32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Whether `user_id` wrote this recipe.
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.author.id() == user_id
    }
}

/// Recipe decorated with flags relative to one requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecipe {
    pub recipe: Recipe,
    pub membership: RecipeMembership,
    pub author_subscribed: bool,
}

impl AnnotatedRecipe {
    /// Wrap a recipe with every flag cleared.
    pub fn unannotated(recipe: Recipe) -> Self {
        Self {
            recipe,
            membership: RecipeMembership::default(),
            author_subscribed: false,
        }
    }
}

/// Filters accepted by recipe listings.
///
/// `favorited_by` and `in_cart_of` restrict results to the given user's
/// favorites or cart; callers only set them for authenticated requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tag_slugs: Vec<String>,
    pub author: Option<UserId>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
    pub page: PageRequest,
}
