//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types; no business rules live here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every database failure is mapped onto the owning port's error enum.
//!
//! ```ignore
//! use recipe_book::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod diesel_catalogue_repository;
mod diesel_follow_repository;
pub(crate) mod diesel_helpers;
mod diesel_recipe_membership_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_recipe_membership_repository::DieselRecipeMembershipRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
