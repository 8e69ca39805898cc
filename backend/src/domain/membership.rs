//! Favorite and shopping-cart membership flags for recipe listings.
//!
//! [`MembershipAnnotator`] decorates a page of recipes with two booleans
//! relative to the requesting user. The user is an explicit argument, and
//! the lookup is one bulk query per relation regardless of page size.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::UserId;
use super::ports::RecipeMembershipRepository;

/// Per-recipe flags relative to one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeMembership {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Which per-user recipe collection a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeCollection {
    /// Bookmarked recipes.
    Favorites,
    /// Recipes feeding the shopping list.
    ShoppingCart,
}

impl RecipeCollection {
    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "the shopping cart",
        }
    }
}

/// Recipe ids present in a user's favorites and cart, restricted to the
/// ids that were asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSets {
    pub favorited: HashSet<Uuid>,
    pub in_cart: HashSet<Uuid>,
}

/// Computes [`RecipeMembership`] flags for a set of recipes.
#[derive(Clone)]
pub struct MembershipAnnotator<M> {
    memberships: Arc<M>,
}

impl<M> MembershipAnnotator<M> {
    /// Create an annotator over the given membership store.
    pub fn new(memberships: Arc<M>) -> Self {
        Self { memberships }
    }
}

impl<M> MembershipAnnotator<M>
where
    M: RecipeMembershipRepository,
{
    /// Flag each of `recipe_ids` for `user`.
    ///
    /// Every requested id is present in the result. Without a user every
    /// entry is `(false, false)` and the store is not consulted. Store
    /// failures degrade to `false` flags and are logged; this never fails.
    pub async fn annotate(
        &self,
        recipe_ids: &[Uuid],
        user: Option<&UserId>,
    ) -> HashMap<Uuid, RecipeMembership> {
        let sets = match user {
            Some(user_id) if !recipe_ids.is_empty() => {
                match self.memberships.memberships_among(user_id, recipe_ids).await {
                    Ok(sets) => sets,
                    Err(error) => {
                        warn!(%error, user_id = %user_id, "membership lookup failed; flags cleared");
                        MembershipSets::default()
                    }
                }
            }
            _ => MembershipSets::default(),
        };

        recipe_ids
            .iter()
            .map(|id| {
                (
                    *id,
                    RecipeMembership {
                        is_favorited: sets.favorited.contains(id),
                        is_in_shopping_cart: sets.in_cart.contains(id),
                    },
                )
            })
            .collect()
    }
}
