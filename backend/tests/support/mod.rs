//! Shared helpers for the Diesel adapter suites.
//!
//! Each suite gets its own cluster and a freshly migrated database. Rows the
//! adapters do not own (users, ingredients, tags) are seeded with the
//! synchronous `postgres` client, outside the Tokio runtime.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use recipe_book::domain::{IngredientAmount, RecipeContent, RecipeDraft, UserId};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Render a `postgres` error with its SQLSTATE and detail, which `Display`
/// collapses to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// `SKIP_TEST_CLUSTER` set to `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set, fail loudly otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Apply every migration under `backend/migrations`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("{err:?}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err:?}"))?;
    Ok(())
}

/// Recreate `name` on `cluster`, migrate it and return its URL.
pub fn fresh_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    let url = cluster.connection().database_url(name);
    migrate_schema(&url)?;
    Ok(url)
}

/// Inserts reference rows directly.
pub struct Seed {
    client: Client,
}

impl Seed {
    pub fn connect(url: &str) -> Result<Self, String> {
        let client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
        Ok(Self { client })
    }

    pub fn user(&mut self, username: &str) -> Result<UserId, String> {
        let id = Uuid::new_v4();
        let email = format!("{username}@example.com");
        self.client
            .execute(
                "INSERT INTO users (id, email, username, first_name, last_name) \
                 VALUES ($1, $2, $3, 'Test', 'Cook')",
                &[&id, &email, &username],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(UserId::from_uuid(id))
    }

    pub fn ingredient(&mut self, name: &str, unit: &str) -> Result<Uuid, String> {
        let id = Uuid::new_v4();
        self.client
            .execute(
                "INSERT INTO ingredients (id, name, measurement_unit) VALUES ($1, $2, $3)",
                &[&id, &name, &unit],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(id)
    }

    pub fn tag(&mut self, slug: &str, color: &str) -> Result<Uuid, String> {
        let id = Uuid::new_v4();
        self.client
            .execute(
                "INSERT INTO tags (id, name, color, slug) VALUES ($1, $2, $3, $2)",
                &[&id, &slug, &color],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(id)
    }

    /// Number of rows in `table` belonging to `recipe_id`.
    pub fn count_for_recipe(&mut self, table: &str, recipe_id: Uuid) -> Result<i64, String> {
        let row = self
            .client
            .query_one(
                &format!("SELECT COUNT(*) FROM {table} WHERE recipe_id = $1"),
                &[&recipe_id],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(row.get(0))
    }
}

/// Validated recipe content with one tag and the given ingredient lines.
pub fn recipe_content(name: &str, tag_id: Uuid, lines: &[(Uuid, u32)]) -> RecipeContent {
    RecipeContent::new(RecipeDraft {
        name: name.to_owned(),
        text: format!("How to cook {name}."),
        image: format!("recipes/images/{}.png", name.to_lowercase()),
        cooking_time: 10,
        tag_ids: vec![tag_id],
        ingredients: lines
            .iter()
            .map(|&(ingredient_id, amount)| IngredientAmount {
                ingredient_id,
                amount,
            })
            .collect(),
    })
    .expect("seed recipe is valid")
}
