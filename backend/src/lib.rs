//! Recipe book backend: recipes, ingredients, tags, favourites, shopping
//! carts and author subscriptions behind a REST API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

#[cfg(test)]
pub(crate) mod test_support;
