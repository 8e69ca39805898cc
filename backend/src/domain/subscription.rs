//! Follow-relative views of users.

use super::{Recipe, User};

/// Number of recipes embedded in a subscription when the caller sets no
/// limit.
pub const DEFAULT_SUBSCRIPTION_RECIPES: u32 = 3;

/// A user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always `false` for anonymous
    /// viewers and for the viewer's own profile.
    pub is_subscribed: bool,
}

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub author: User,
    /// Newest recipes first, truncated to the requested limit.
    pub recipes: Vec<Recipe>,
    /// Total number of recipes by the author.
    pub recipes_count: u64,
}
