//! Catalogue read service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{CatalogueQuery, CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Error, Ingredient, Tag};

/// Implements [`CatalogueQuery`] over a [`CatalogueRepository`].
#[derive(Clone)]
pub struct CatalogueService<C> {
    catalogue_repo: Arc<C>,
}

impl<C> CatalogueService<C> {
    /// Create a new service over the given repository.
    pub fn new(catalogue_repo: Arc<C>) -> Self {
        Self { catalogue_repo }
    }
}

fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

#[async_trait]
impl<C> CatalogueQuery for CatalogueService<C>
where
    C: CatalogueRepository,
{
    async fn list_ingredients(
        &self,
        name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, Error> {
        let needle = name_contains
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        self.catalogue_repo
            .list_ingredients(needle)
            .await
            .map_err(map_catalogue_error)
    }

    async fn get_ingredient(&self, ingredient_id: Uuid) -> Result<Ingredient, Error> {
        self.catalogue_repo
            .find_ingredient(&ingredient_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("ingredient {ingredient_id} not found")))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        self.catalogue_repo
            .list_tags()
            .await
            .map_err(map_catalogue_error)
    }

    async fn get_tag(&self, tag_id: Uuid) -> Result<Tag, Error> {
        self.catalogue_repo
            .find_tag(&tag_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("tag {tag_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCatalogueRepository;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn make_service(repo: MockCatalogueRepository) -> CatalogueService<MockCatalogueRepository> {
        CatalogueService::new(Arc::new(repo))
    }

    #[rstest]
    #[case::blank(Some("   "), None)]
    #[case::padded(Some(" egg "), Some("egg"))]
    #[case::absent(None, None)]
    #[tokio::test]
    async fn ingredient_filter_is_trimmed(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_ingredients()
            .with(eq(expected.map(str::to_owned)))
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        make_service(repo)
            .list_ingredients(raw.map(str::to_owned))
            .await
            .expect("listing succeeds");
    }

    #[rstest]
    #[case::connection(CatalogueRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case::query(CatalogueRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn repository_errors_are_mapped(
        #[case] failure: CatalogueRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_tags()
            .times(1)
            .return_once(move || Err(failure));

        let err = make_service(repo).list_tags().await.expect_err("mapped error");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn missing_ingredient_is_not_found() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_find_ingredient()
            .times(1)
            .return_once(|_| Ok(None));

        let err = make_service(repo)
            .get_ingredient(Uuid::new_v4())
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
