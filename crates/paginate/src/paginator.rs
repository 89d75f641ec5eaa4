use crate::{
    compile::{CompiledQuery, compile},
    error::PaginateError,
    scope::Scope,
    settings::PaginateSettings,
};
use connectors::SqlAdapter;
use model::{
    pagination::{page::Page, request::Pagination},
    records::row::RowData,
    schema::Entity,
};
use serde::de::DeserializeOwned;
use tracing::info;

/// Runs paginated queries for any [`Entity`] against one adapter.
pub struct Paginator<'a> {
    adapter: &'a dyn SqlAdapter,
    settings: PaginateSettings,
}

impl<'a> Paginator<'a> {
    pub fn new(adapter: &'a dyn SqlAdapter) -> Self {
        Self::with_settings(adapter, PaginateSettings::default())
    }

    pub fn with_settings(adapter: &'a dyn SqlAdapter, settings: PaginateSettings) -> Self {
        Self { adapter, settings }
    }

    pub fn settings(&self) -> &PaginateSettings {
        &self.settings
    }

    /// Builds the count and fetch queries without touching the backend.
    pub fn compile<T: Entity + 'static>(
        &self,
        request: &impl Pagination,
        scopes: &[&dyn Scope],
    ) -> Result<CompiledQuery, PaginateError> {
        Ok(compile::<T>(request, scopes, &self.settings)?)
    }

    /// Counts the matching rows, then fetches and decodes the requested page.
    ///
    /// Both queries share the same joins and predicates. A failed count is
    /// returned as is and the page is never fetched.
    pub async fn paginate<T>(
        &self,
        request: &(impl Pagination + Sync),
        scopes: &[&dyn Scope],
    ) -> Result<Page<T>, PaginateError>
    where
        T: Entity + DeserializeOwned + 'static,
    {
        let compiled = self.compile::<T>(request, scopes)?;

        let total = self.adapter.count_rows(compiled.scope()).await?;
        let rows = self.adapter.fetch_rows(&compiled.request).await?;
        let records = rows
            .iter()
            .map(RowData::decode::<T>)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            table = %compiled.scope().table,
            total,
            page = compiled.window.page,
            size = compiled.window.size,
            records = records.len(),
            "Fetched page"
        );

        Ok(Page::new(
            total,
            records,
            compiled.window.page,
            compiled.window.size,
        ))
    }
}

/// Paginates `T` with default settings.
pub async fn paginate<T>(
    adapter: &dyn SqlAdapter,
    request: &(impl Pagination + Sync),
    scopes: &[&dyn Scope],
) -> Result<Page<T>, PaginateError>
where
    T: Entity + DeserializeOwned + 'static,
{
    Paginator::new(adapter).paginate::<T>(request, scopes).await
}
