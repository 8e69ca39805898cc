use super::*;
use crate::domain::{CartIngredient, MembershipAnnotator, MembershipSets, RecipeCollection, UserId};
use actix_rt::System;
use async_trait::async_trait;
use rstest::{fixture, rstest};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory membership store honouring the unique `(user, recipe)` pair.
#[derive(Default)]
struct InMemoryMemberships {
    rows: Mutex<HashSet<(RecipeCollection, UserId, Uuid)>>,
}

#[async_trait]
impl RecipeMembershipRepository for InMemoryMemberships {
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<(), RecipeMembershipRepositoryError> {
        let mut guard = self.rows.lock().expect("rows poisoned");
        if guard.insert((collection, user_id.clone(), *recipe_id)) {
            Ok(())
        } else {
            Err(RecipeMembershipRepositoryError::duplicate(*recipe_id))
        }
    }

    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<bool, RecipeMembershipRepositoryError> {
        let mut guard = self.rows.lock().expect("rows poisoned");
        Ok(guard.remove(&(collection, user_id.clone(), *recipe_id)))
    }

    async fn memberships_among(
        &self,
        user_id: &UserId,
        recipe_ids: &[Uuid],
    ) -> Result<MembershipSets, RecipeMembershipRepositoryError> {
        let guard = self.rows.lock().expect("rows poisoned");
        let mut sets = MembershipSets::default();
        for (collection, owner, recipe_id) in guard.iter() {
            if owner != user_id || !recipe_ids.contains(recipe_id) {
                continue;
            }
            match collection {
                RecipeCollection::Favorites => sets.favorited.insert(*recipe_id),
                RecipeCollection::ShoppingCart => sets.in_cart.insert(*recipe_id),
            };
        }
        Ok(sets)
    }

    async fn cart_ingredients(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<CartIngredient>, RecipeMembershipRepositoryError> {
        Ok(Vec::new())
    }
}

#[fixture]
fn store() -> Arc<InMemoryMemberships> {
    Arc::new(InMemoryMemberships::default())
}

#[rstest]
#[case::favorites(RecipeCollection::Favorites)]
#[case::cart(RecipeCollection::ShoppingCart)]
fn second_add_is_rejected_and_absent_remove_reports_false(
    store: Arc<InMemoryMemberships>,
    #[case] collection: RecipeCollection,
) {
    let user = UserId::random();
    let recipe = Uuid::new_v4();

    System::new().block_on(async move {
        store
            .add(collection, &user, &recipe)
            .await
            .expect("first add succeeds");
        let err = store
            .add(collection, &user, &recipe)
            .await
            .expect_err("second add rejected");
        assert_eq!(err, RecipeMembershipRepositoryError::duplicate(recipe));

        assert!(store.remove(collection, &user, &recipe).await.expect("remove"));
        assert!(!store.remove(collection, &user, &recipe).await.expect("remove"));
    });
}

#[rstest]
fn annotator_reflects_store_contents(store: Arc<InMemoryMemberships>) {
    let user = UserId::random();
    let other = UserId::random();
    let favorite = Uuid::new_v4();
    let plain = Uuid::new_v4();

    System::new().block_on(async move {
        store
            .add(RecipeCollection::Favorites, &user, &favorite)
            .await
            .expect("add favorite");
        store
            .add(RecipeCollection::ShoppingCart, &other, &plain)
            .await
            .expect("add other user's cart row");

        let annotator = MembershipAnnotator::new(Arc::clone(&store));
        let flags = annotator.annotate(&[favorite, plain], Some(&user)).await;

        assert!(flags[&favorite].is_favorited);
        assert!(!flags[&favorite].is_in_shopping_cart);
        assert!(!flags[&plain].is_favorited);
        assert!(!flags[&plain].is_in_shopping_cart);
    });
}
