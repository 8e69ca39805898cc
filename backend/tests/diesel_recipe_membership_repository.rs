//! Integration tests for `DieselRecipeMembershipRepository` against embedded
//! PostgreSQL.
//!
//! The `(user, recipe)` primary keys on `favorites` and `shopping_cart` are
//! the only guard against concurrent double adds, so these suites check that
//! PostgreSQL's violation surfaces as `Duplicate` and that the bulk lookups
//! feeding the annotator and the shopping list read the right rows.

use chrono::{Duration, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use recipe_book::domain::ports::{
    RecipeMembershipRepository, RecipeMembershipRepositoryError, RecipeRepository,
    RecipeRepositoryError,
};
use recipe_book::domain::{RecipeCollection, UserId, aggregate_ingredients};
use recipe_book::outbound::persistence::{
    DbPool, DieselRecipeMembershipRepository, DieselRecipeRepository, PoolConfig,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{Seed, fresh_database, handle_cluster_setup_failure, recipe_content};

const TEST_DB: &str = "diesel_recipe_membership_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    memberships: DieselRecipeMembershipRepository,
    shopper: UserId,
    pancakes: Uuid,
    omelette: Uuid,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster, TEST_DB)?;

    let mut seed = Seed::connect(&database_url)?;
    let chef = seed.user("chef")?;
    let shopper = seed.user("ada")?;
    let flour = seed.ingredient("flour", "g")?;
    let egg = seed.ingredient("egg", "pcs")?;
    let milk = seed.ingredient("milk", "ml")?;
    let breakfast = seed.tag("breakfast", "#E26C2D")?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;
    let recipes = DieselRecipeRepository::new(pool.clone());

    let pancake_content = recipe_content("Pancakes", breakfast, &[(flour, 200), (egg, 2)]);
    let omelette_content = recipe_content("Omelette", breakfast, &[(egg, 3), (milk, 50)]);
    let (pancakes, omelette) = runtime
        .block_on(async {
            let now = Utc::now();
            let pancakes = recipes.create(&chef, &pancake_content, now).await?;
            let omelette = recipes
                .create(&chef, &omelette_content, now + Duration::seconds(1))
                .await?;
            Ok::<_, RecipeRepositoryError>((pancakes.id, omelette.id))
        })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        memberships: DieselRecipeMembershipRepository::new(pool),
        shopper,
        pancakes,
        omelette,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
#[case::favorites(RecipeCollection::Favorites)]
#[case::shopping_cart(RecipeCollection::ShoppingCart)]
fn second_add_is_a_duplicate(
    repo_context: Option<TestContext>,
    #[case] collection: RecipeCollection,
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_add_is_a_duplicate skipped");
        return;
    };
    let repo = context.memberships.clone();

    let error = context
        .runtime
        .block_on(async {
            repo.add(collection, &context.shopper, &context.pancakes)
                .await?;
            repo.add(collection, &context.shopper, &context.pancakes)
                .await
        })
        .expect_err("pair already present");

    assert_eq!(
        error,
        RecipeMembershipRepositoryError::duplicate(context.pancakes)
    );
}

#[rstest]
fn collections_are_independent(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: collections_are_independent skipped");
        return;
    };
    let repo = context.memberships.clone();

    context
        .runtime
        .block_on(async {
            repo.add(RecipeCollection::Favorites, &context.shopper, &context.pancakes)
                .await?;
            repo.add(
                RecipeCollection::ShoppingCart,
                &context.shopper,
                &context.pancakes,
            )
            .await
        })
        .expect("one row per relation");
}

#[rstest]
fn removing_reports_whether_a_row_existed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: removing_reports_whether_a_row_existed skipped");
        return;
    };
    let repo = context.memberships.clone();
    let collection = RecipeCollection::ShoppingCart;

    let (absent, added, again) = context
        .runtime
        .block_on(async {
            let absent = repo
                .remove(collection, &context.shopper, &context.omelette)
                .await?;
            repo.add(collection, &context.shopper, &context.omelette)
                .await?;
            let added = repo
                .remove(collection, &context.shopper, &context.omelette)
                .await?;
            let again = repo
                .remove(collection, &context.shopper, &context.omelette)
                .await?;
            Ok::<_, RecipeMembershipRepositoryError>((absent, added, again))
        })
        .expect("removals");

    assert!(!absent);
    assert!(added);
    assert!(!again);
}

#[rstest]
fn adding_an_unknown_recipe_names_it(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: adding_an_unknown_recipe_names_it skipped");
        return;
    };
    let repo = context.memberships.clone();
    let missing = Uuid::new_v4();

    let error = context
        .runtime
        .block_on(async {
            repo.add(RecipeCollection::Favorites, &context.shopper, &missing)
                .await
        })
        .expect_err("foreign key");

    assert_eq!(
        error,
        RecipeMembershipRepositoryError::recipe_not_found(missing)
    );
}

#[rstest]
fn memberships_among_reads_only_requested_ids(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: memberships_among_reads_only_requested_ids skipped");
        return;
    };
    let repo = context.memberships.clone();
    let stranger = Uuid::new_v4();

    let (both, pancakes_only) = context
        .runtime
        .block_on(async {
            repo.add(RecipeCollection::Favorites, &context.shopper, &context.pancakes)
                .await?;
            repo.add(
                RecipeCollection::ShoppingCart,
                &context.shopper,
                &context.omelette,
            )
            .await?;
            let both = repo
                .memberships_among(
                    &context.shopper,
                    &[context.pancakes, context.omelette, stranger],
                )
                .await?;
            let pancakes_only = repo
                .memberships_among(&context.shopper, &[context.pancakes])
                .await?;
            Ok::<_, RecipeMembershipRepositoryError>((both, pancakes_only))
        })
        .expect("lookups");

    assert_eq!(both.favorited.len(), 1);
    assert!(both.favorited.contains(&context.pancakes));
    assert_eq!(both.in_cart.len(), 1);
    assert!(both.in_cart.contains(&context.omelette));
    assert!(pancakes_only.in_cart.is_empty());
}

#[rstest]
fn cart_ingredients_cover_every_recipe_in_the_cart(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: cart_ingredients_cover_every_recipe_in_the_cart skipped");
        return;
    };
    let repo = context.memberships.clone();
    let cart = RecipeCollection::ShoppingCart;

    let (empty, rows) = context
        .runtime
        .block_on(async {
            let empty = repo.cart_ingredients(&context.shopper).await?;
            repo.add(cart, &context.shopper, &context.pancakes).await?;
            repo.add(cart, &context.shopper, &context.omelette).await?;
            let rows = repo.cart_ingredients(&context.shopper).await?;
            Ok::<_, RecipeMembershipRepositoryError>((empty, rows))
        })
        .expect("cart rows");

    assert!(empty.is_empty());
    assert_eq!(rows.len(), 4);
    assert!(rows.windows(2).all(|pair| pair[0].name <= pair[1].name));
    let lines: Vec<String> = aggregate_ingredients(rows)
        .iter()
        .map(|line| line.render())
        .collect();
    assert_eq!(lines, ["egg 5 pcs", "flour 200 g", "milk 50 ml"]);
}
