//! PostgreSQL-backed recipe repository.
//!
//! Writes run in one transaction: the recipe row, its tag links and its
//! ingredient lines either all land or none do. Reads resolve authors, tags
//! and ingredients for a whole page with one query per relation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Page, Recipe, RecipeContent, RecipeFilter, RecipeIngredient, Tag, User, UserId,
};

use super::diesel_catalogue_repository::{row_to_ingredient, row_to_tag};
use super::diesel_helpers::{
    column_to_u32, count_to_total, limit_offset, map_basic_diesel_error, map_basic_pool_error,
    u32_to_column,
};
use super::diesel_user_repository::row_to_user;
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeRow,
    RecipeUpdate, TagRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart, tags, users,
};

/// Diesel-backed implementation of [`RecipeRepository`].
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

/// Failure inside a write transaction. Diesel errors roll back like any
/// other; `Rejected` carries a domain-level reason for the rollback.
#[derive(Debug)]
enum WriteError {
    Diesel(DieselError),
    Rejected(RecipeRepositoryError),
}

impl From<DieselError> for WriteError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<WriteError> for RecipeRepositoryError {
    fn from(error: WriteError) -> Self {
        match error {
            WriteError::Diesel(error) => map_diesel_error(error),
            WriteError::Rejected(error) => error,
        }
    }
}

fn column(value: u32, name: &'static str) -> Result<i32, WriteError> {
    u32_to_column(value, name)
        .map_err(|msg| WriteError::Rejected(RecipeRepositoryError::query(msg)))
}

/// Reject the write when any referenced ingredient or tag is missing,
/// reporting the first one in submission order.
async fn ensure_references(
    conn: &mut AsyncPgConnection,
    content: &RecipeContent,
) -> Result<(), WriteError> {
    let requested: Vec<Uuid> = content
        .ingredients()
        .iter()
        .map(|line| line.ingredient_id)
        .collect();
    let known: HashSet<Uuid> = ingredients::table
        .filter(ingredients::id.eq_any(&requested))
        .select(ingredients::id)
        .load::<Uuid>(conn)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = requested.iter().find(|id| !known.contains(id)) {
        return Err(WriteError::Rejected(
            RecipeRepositoryError::unknown_ingredient(*missing),
        ));
    }

    let known: HashSet<Uuid> = tags::table
        .filter(tags::id.eq_any(content.tag_ids()))
        .select(tags::id)
        .load::<Uuid>(conn)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = content.tag_ids().iter().find(|id| !known.contains(id)) {
        return Err(WriteError::Rejected(RecipeRepositoryError::unknown_tag(
            *missing,
        )));
    }
    Ok(())
}

/// Replace the tag links and ingredient lines of `recipe_id`.
async fn replace_links(
    conn: &mut AsyncPgConnection,
    recipe_id: Uuid,
    content: &RecipeContent,
) -> Result<(), WriteError> {
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;

    let tag_rows: Vec<NewRecipeTagRow> = content
        .tag_ids()
        .iter()
        .map(|tag_id| NewRecipeTagRow {
            recipe_id,
            tag_id: *tag_id,
        })
        .collect();
    if !tag_rows.is_empty() {
        diesel::insert_into(recipe_tags::table)
            .values(&tag_rows)
            .execute(conn)
            .await?;
    }

    let mut ingredient_rows = Vec::with_capacity(content.ingredients().len());
    for (position, line) in content.ingredients().iter().enumerate() {
        let position = u32::try_from(position).unwrap_or(u32::MAX);
        ingredient_rows.push(NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: line.ingredient_id,
            amount: column(line.amount, "recipe_ingredients.amount")?,
            position: column(position, "recipe_ingredients.position")?,
        });
    }
    if !ingredient_rows.is_empty() {
        diesel::insert_into(recipe_ingredients::table)
            .values(&ingredient_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Base query applying every filter in `filter` except paging.
fn filtered(filter: &RecipeFilter) -> recipes::BoxedQuery<'_, Pg> {
    let mut query = recipes::table.into_boxed();

    if let Some(author) = &filter.author {
        query = query.filter(recipes::author_id.eq(*author.as_uuid()));
    }
    if !filter.tag_slugs.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(&filter.tag_slugs))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }
    if let Some(user) = &filter.favorited_by {
        let favorited = favorites::table
            .filter(favorites::user_id.eq(*user.as_uuid()))
            .select(favorites::recipe_id);
        query = query.filter(recipes::id.eq_any(favorited));
    }
    if let Some(user) = &filter.in_cart_of {
        let in_cart = shopping_cart::table
            .filter(shopping_cart::user_id.eq(*user.as_uuid()))
            .select(shopping_cart::recipe_id);
        query = query.filter(recipes::id.eq_any(in_cart));
    }
    query
}

/// Resolve authors, tags and ingredient lines for `rows`, preserving order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let author_ids: Vec<Uuid> = rows
        .iter()
        .map(|row| row.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let author_rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(&author_ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let tag_rows: Vec<(Uuid, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&recipe_ids))
        .order((recipe_tags::recipe_id.asc(), tags::name.asc()))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let ingredient_rows: Vec<(Uuid, i32, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order((
            recipe_ingredients::recipe_id.asc(),
            recipe_ingredients::position.asc(),
        ))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::amount,
            IngredientRow::as_select(),
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    assemble(rows, author_rows, tag_rows, ingredient_rows).map_err(RecipeRepositoryError::query)
}

fn assemble(
    rows: Vec<RecipeRow>,
    author_rows: Vec<UserRow>,
    tag_rows: Vec<(Uuid, TagRow)>,
    ingredient_rows: Vec<(Uuid, i32, IngredientRow)>,
) -> Result<Vec<Recipe>, String> {
    let authors: HashMap<Uuid, User> = author_rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            row_to_user(row).map(|user| (id, user))
        })
        .collect::<Result<_, String>>()?;

    let mut tags_by_recipe: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for (recipe_id, row) in tag_rows {
        tags_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(row_to_tag(row)?);
    }

    let mut lines_by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for (recipe_id, amount, row) in ingredient_rows {
        lines_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(RecipeIngredient {
                ingredient: row_to_ingredient(row)?,
                amount: column_to_u32(amount, "recipe_ingredients.amount")?,
            });
    }

    rows.into_iter()
        .map(|row| -> Result<Recipe, String> {
            let author = authors
                .get(&row.author_id)
                .cloned()
                .ok_or_else(|| format!("recipe {} references missing author", row.id))?;
            Ok(Recipe {
                id: row.id,
                author,
                cooking_time: column_to_u32(row.cooking_time, "recipes.cooking_time")?,
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                ingredients: lines_by_recipe.remove(&row.id).unwrap_or_default(),
                name: row.name,
                text: row.text,
                image: row.image,
                created_at: row.created_at,
            })
        })
        .collect()
}

/// Keep the first `per_author` rows of each author and count every row per
/// author. `rows` must already be newest first.
fn take_latest(rows: Vec<RecipeRow>, per_author: u32) -> (Vec<RecipeRow>, HashMap<Uuid, u64>) {
    let per_author = u64::from(per_author);
    let mut totals: HashMap<Uuid, u64> = HashMap::new();
    let kept = rows
        .into_iter()
        .filter(|row| {
            let seen = totals.entry(row.author_id).or_default();
            *seen += 1;
            *seen <= per_author
        })
        .collect();
    (kept, totals)
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    row: RecipeRow,
) -> Result<Recipe, RecipeRepositoryError> {
    let recipe_id = row.id;
    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| RecipeRepositoryError::recipe_not_found(recipe_id))
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find_by_id(&self, recipe_id: &Uuid) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .find(recipe_id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => load_one(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &RecipeFilter) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = limit_offset(filter.page);

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RecipeRow> = filtered(filter)
            .select(RecipeRow::as_select())
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(total, returned = rows.len(), "recipes listed");

        Ok(Page {
            items: hydrate(&mut conn, rows).await?,
            total: count_to_total(total),
        })
    }

    async fn latest_by_authors(
        &self,
        authors: &[UserId],
        per_author: u32,
    ) -> Result<HashMap<UserId, Page<Recipe>>, RecipeRepositoryError> {
        if authors.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_ids: Vec<Uuid> = authors.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::author_id.eq_any(&author_ids))
            .select(RecipeRow::as_select())
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let (kept, totals) = take_latest(rows, per_author);
        debug!(
            authors = authors.len(),
            returned = kept.len(),
            "author previews listed"
        );

        let mut previews: HashMap<UserId, Page<Recipe>> = HashMap::new();
        for recipe in hydrate(&mut conn, kept).await? {
            let total = totals.get(recipe.author.id().as_uuid()).copied().unwrap_or(0);
            let page = previews
                .entry(recipe.author.id().clone())
                .or_insert_with(|| Page {
                    items: Vec::new(),
                    total,
                });
            page.items.push(recipe);
        }
        Ok(previews)
    }

    async fn create(
        &self,
        author: &UserId,
        content: &RecipeContent,
        created_at: DateTime<Utc>,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = *author.as_uuid();

        let row = conn
            .transaction(|conn| {
                async move {
                    ensure_references(conn, content).await?;
                    let new_row = NewRecipeRow {
                        id: Uuid::new_v4(),
                        author_id,
                        name: content.name(),
                        text: content.text(),
                        image: content.image(),
                        cooking_time: column(content.cooking_time(), "recipes.cooking_time")?,
                        created_at,
                    };
                    let row: RecipeRow = diesel::insert_into(recipes::table)
                        .values(&new_row)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await?;
                    replace_links(conn, row.id, content).await?;
                    Ok::<_, WriteError>(row)
                }
                .scope_boxed()
            })
            .await?;

        load_one(&mut conn, row).await
    }

    async fn update(
        &self,
        recipe_id: &Uuid,
        content: &RecipeContent,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let recipe_id = *recipe_id;

        let row = conn
            .transaction(|conn| {
                async move {
                    ensure_references(conn, content).await?;
                    let changes = RecipeUpdate {
                        name: content.name(),
                        text: content.text(),
                        image: content.image(),
                        cooking_time: column(content.cooking_time(), "recipes.cooking_time")?,
                    };
                    let row: Option<RecipeRow> = diesel::update(recipes::table.find(recipe_id))
                        .set(&changes)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Err(WriteError::Rejected(
                            RecipeRepositoryError::recipe_not_found(recipe_id),
                        ));
                    };
                    replace_links(conn, recipe_id, content).await?;
                    Ok::<_, WriteError>(row)
                }
                .scope_boxed()
            })
            .await?;

        load_one(&mut conn, row).await
    }

    async fn delete(&self, recipe_id: &Uuid) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(recipes::table.find(recipe_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row assembly and error mapping.
    use super::*;
    use rstest::rstest;

    fn user_row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            is_admin: false,
        }
    }

    fn recipe_row(author_id: Uuid, name: &str) -> RecipeRow {
        RecipeRow {
            id: Uuid::new_v4(),
            author_id,
            name: name.to_owned(),
            text: "Cook it.".into(),
            image: "recipes/images/dish.png".into(),
            cooking_time: 20,
            created_at: Utc::now(),
        }
    }

    fn tag_row(slug: &str) -> TagRow {
        TagRow {
            id: Uuid::new_v4(),
            name: slug.to_owned(),
            color: "#AABBCC".into(),
            slug: slug.to_owned(),
        }
    }

    fn ingredient_row(name: &str) -> IngredientRow {
        IngredientRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            measurement_unit: "g".into(),
        }
    }

    #[rstest]
    fn assemble_groups_relations_per_recipe_and_keeps_order() {
        let author = user_row("chef");
        let soup = recipe_row(author.id, "Soup");
        let salad = recipe_row(author.id, "Salad");
        let (soup_id, salad_id) = (soup.id, salad.id);

        let recipes = assemble(
            vec![soup, salad],
            vec![author],
            vec![(soup_id, tag_row("dinner")), (salad_id, tag_row("lunch"))],
            vec![
                (soup_id, 300, ingredient_row("water")),
                (soup_id, 2, ingredient_row("onion")),
                (salad_id, 1, ingredient_row("lettuce")),
            ],
        )
        .expect("assembled");

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "Soup");
        assert_eq!(recipes[0].cooking_time, 20);
        let soup_lines: Vec<(&str, u32)> = recipes[0]
            .ingredients
            .iter()
            .map(|line| (line.ingredient.name.as_str(), line.amount))
            .collect();
        assert_eq!(soup_lines, vec![("water", 300), ("onion", 2)]);
        assert_eq!(recipes[1].tags[0].slug, "lunch");
        assert_eq!(recipes[1].author.username().as_ref(), "chef");
    }

    #[rstest]
    fn missing_author_is_reported() {
        let orphan = recipe_row(Uuid::new_v4(), "Orphan");
        let err = assemble(vec![orphan], Vec::new(), Vec::new(), Vec::new())
            .expect_err("author missing");
        assert!(err.contains("missing author"));
    }

    #[rstest]
    fn negative_amount_is_reported() {
        let author = user_row("chef");
        let row = recipe_row(author.id, "Broken");
        let recipe_id = row.id;
        let err = assemble(
            vec![row],
            vec![author],
            Vec::new(),
            vec![(recipe_id, -4, ingredient_row("salt"))],
        )
        .expect_err("negative amount");
        assert!(err.contains("negative"));
    }

    #[rstest]
    #[case::truncates(2, vec![2, 1])]
    #[case::keeps_short_lists(5, vec![3, 1])]
    #[case::zero_keeps_nothing(0, vec![0, 0])]
    fn take_latest_limits_each_author_and_counts_all(
        #[case] per_author: u32,
        #[case] kept_counts: Vec<usize>,
    ) {
        let prolific = Uuid::new_v4();
        let occasional = Uuid::new_v4();
        let rows = vec![
            recipe_row(prolific, "Stew"),
            recipe_row(occasional, "Tart"),
            recipe_row(prolific, "Pie"),
            recipe_row(prolific, "Bread"),
        ];

        let (kept, totals) = take_latest(rows, per_author);

        let kept_for = |author: Uuid| kept.iter().filter(|row| row.author_id == author).count();
        assert_eq!(vec![kept_for(prolific), kept_for(occasional)], kept_counts);
        assert_eq!(totals[&prolific], 3);
        assert_eq!(totals[&occasional], 1);
        if per_author >= 2 {
            let names: Vec<&str> = kept
                .iter()
                .filter(|row| row.author_id == prolific)
                .map(|row| row.name.as_str())
                .collect();
            assert_eq!(names[..2], ["Stew", "Pie"]);
        }
    }

    #[rstest]
    fn write_rejection_passes_through_unchanged() {
        let tag_id = Uuid::new_v4();
        let err: RecipeRepositoryError =
            WriteError::Rejected(RecipeRepositoryError::unknown_tag(tag_id)).into();
        assert_eq!(err, RecipeRepositoryError::unknown_tag(tag_id));

        let err: RecipeRepositoryError = WriteError::Diesel(DieselError::NotFound).into();
        assert!(matches!(err, RecipeRepositoryError::Query { .. }));
    }
}
