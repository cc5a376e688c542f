use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, TransactionTrait};
use std::marker::PhantomData;
use std::sync::Arc;

use super::mapper::Mapper;
use super::traits::{CrudEntity, active_model_from};
use crate::audit::{AuditStamper, PrincipalProvider};
use crate::config::CrudConfig;
use crate::errors::{CriteriaError, CrudError};
use crate::filtering::{
    ExampleMatcher, FieldTable, Page, Pageable, PredicateCompiler, SearchFieldCriteria,
    resolve_order,
};
use crate::messages::MessageSource;
use crate::models::BaseDto;
use crate::repository::{Repository, SeaOrmRepository};
use crate::validation::{Validatable, ValidationGroup};

/// Generic CRUD orchestration for one entity/DTO pair.
///
/// Reads go straight to the repository; every write runs in its own transaction. Deleted rows
/// are invisible to every operation. Ids supplied by the caller on `post` are discarded.
pub struct CrudService<E, D, M, R = SeaOrmRepository<E>>
where
    E: CrudEntity,
{
    db: DatabaseConnection,
    mapper: M,
    repository: R,
    compiler: PredicateCompiler<E::Column>,
    stamper: AuditStamper,
    config: CrudConfig,
    messages: Arc<dyn MessageSource>,
    _types: PhantomData<fn() -> (E, D)>,
}

impl<E, D, M> CrudService<E, D, M>
where
    E: CrudEntity,
    M: Mapper<E, D>,
{
    /// Service backed by the stock [`SeaOrmRepository`].
    pub fn with_sea_orm(db: DatabaseConnection, mapper: M) -> Self {
        Self::new(db, mapper, SeaOrmRepository::new())
    }
}

impl<E, D, M, R> CrudService<E, D, M, R>
where
    E: CrudEntity,
    M: Mapper<E, D>,
{
    pub fn new(db: DatabaseConnection, mapper: M, repository: R) -> Self {
        let config = CrudConfig::default();
        Self {
            db,
            mapper,
            repository,
            compiler: PredicateCompiler::new(FieldTable::new(E::search_fields()))
                .with_in_delimiter(config.in_delimiter),
            stamper: AuditStamper::default(),
            messages: config.message_source(),
            config,
            _types: PhantomData,
        }
    }

    /// Apply settings. Replaces the message source with one built from `config`.
    #[must_use]
    pub fn with_config(mut self, config: CrudConfig) -> Self {
        self.compiler = self.compiler.with_in_delimiter(config.in_delimiter);
        self.messages = config.message_source();
        self.config = config;
        self
    }

    /// Principal recorded in audit columns.
    #[must_use]
    pub fn with_principal(mut self, principal: Arc<dyn PrincipalProvider>) -> Self {
        self.stamper = AuditStamper::new(principal);
        self
    }

    #[must_use]
    pub fn with_audit_stamper(mut self, stamper: AuditStamper) -> Self {
        self.stamper = stamper;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.messages = messages;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &CrudConfig {
        &self.config
    }

    pub fn messages(&self) -> &dyn MessageSource {
        self.messages.as_ref()
    }

    pub fn compiler(&self) -> &PredicateCompiler<E::Column> {
        &self.compiler
    }
}

impl<E, D, M, R> CrudService<E, D, M, R>
where
    E: CrudEntity,
    D: BaseDto<Id = E::Id> + Validatable,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    /// # Errors
    ///
    /// [`CrudError::NotFound`] when no live record has this id.
    pub async fn get(&self, id: E::Id) -> Result<D, CrudError> {
        tracing::debug!(resource = E::RESOURCE_NAME_SINGULAR, %id, "Fetching by id");
        let model = self
            .repository
            .find_by_id(&self.db, id.clone())
            .await?
            .ok_or_else(|| CrudError::not_found(E::RESOURCE_NAME_SINGULAR, &id))?;
        Ok(self.mapper.to_dto(model))
    }

    /// Whether a live record has this id.
    ///
    /// # Errors
    ///
    /// Storage failures only.
    pub async fn exists(&self, id: E::Id) -> Result<bool, CrudError> {
        Ok(self.repository.exists_by_id(&self.db, id).await?)
    }

    /// Every live record, ascending by id.
    ///
    /// # Errors
    ///
    /// Storage failures only.
    pub async fn get_all(&self) -> Result<Vec<D>, CrudError> {
        self.find_all(Condition::all()).await
    }

    /// Records matching the populated fields of `probe`.
    ///
    /// # Errors
    ///
    /// [`CrudError::Criteria`] when a probe value does not fit its field.
    pub async fn get_by_example(&self, probe: &D) -> Result<Vec<D>, CrudError> {
        let condition = self.example_condition(probe)?;
        self.find_all(condition).await
    }

    /// # Errors
    ///
    /// [`CrudError::Criteria`] for an unknown sort key.
    pub async fn get_page(&self, pageable: &Pageable) -> Result<Page<D>, CrudError> {
        self.find_page(Condition::all(), pageable).await
    }

    /// # Errors
    ///
    /// [`CrudError::Criteria`] for a bad probe value or an unknown sort key.
    pub async fn get_by_example_page(
        &self,
        probe: &D,
        pageable: &Pageable,
    ) -> Result<Page<D>, CrudError> {
        let condition = self.example_condition(probe)?;
        self.find_page(condition, pageable).await
    }

    /// Records matching every criterion.
    ///
    /// # Errors
    ///
    /// [`CrudError::Criteria`] for the first criterion that does not compile.
    pub async fn search(&self, criteria: &[SearchFieldCriteria]) -> Result<Vec<D>, CrudError> {
        let condition = self.criteria_condition(criteria)?;
        self.find_all(condition).await
    }

    /// # Errors
    ///
    /// [`CrudError::Criteria`] for a bad criterion or an unknown sort key.
    pub async fn search_page(
        &self,
        criteria: &[SearchFieldCriteria],
        pageable: &Pageable,
    ) -> Result<Page<D>, CrudError> {
        let condition = self.criteria_condition(criteria)?;
        self.find_page(condition, pageable).await
    }

    /// Create a record. The identity is always assigned here, never taken from `dto`.
    ///
    /// # Errors
    ///
    /// [`CrudError::Validation`] before anything is written, or a storage failure.
    pub async fn post(&self, mut dto: D) -> Result<D, CrudError> {
        dto.validate(ValidationGroup::Post)?;
        if let Some(id) = dto.id() {
            tracing::debug!(
                resource = E::RESOURCE_NAME_SINGULAR,
                ignored_id = %id,
                "Discarding caller-supplied id"
            );
        }
        dto.set_id(None);

        let model = self.mapper.to_entity(dto);
        let mut active = active_model_from::<E>(&model);
        match E::generate_id() {
            Some(id) => active.set(E::ID_COLUMN, id.into()),
            None => active.not_set(E::ID_COLUMN),
        }
        active.set(E::DELETED_COLUMN, false.into());
        self.stamper.pre_persist::<E>(&mut active);

        let txn = self.db.begin().await?;
        let created = self.repository.insert(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(resource = E::RESOURCE_NAME_SINGULAR, "Created record");
        Ok(self.mapper.to_dto(created))
    }

    /// Replace the record `id` with `dto`.
    ///
    /// # Errors
    ///
    /// - [`CrudError::Validation`] before the store is consulted
    /// - [`CrudError::NotFound`] when no live record has this id; nothing is written
    /// - [`CrudError::IdMismatch`] when `dto` carries a different id
    pub async fn put(&self, id: E::Id, mut dto: D) -> Result<D, CrudError> {
        dto.validate(ValidationGroup::Put)?;
        if let Some(body_id) = dto.id() {
            if body_id != id {
                return Err(CrudError::IdMismatch {
                    path: id.to_string(),
                    body: body_id.to_string(),
                });
            }
        }
        dto.set_id(Some(id.clone()));

        let txn = self.db.begin().await?;
        let Some(existing) = self.repository.find_by_id(&txn, id.clone()).await? else {
            tracing::debug!(resource = E::RESOURCE_NAME_SINGULAR, %id, "Update target missing");
            return Err(CrudError::not_found(E::RESOURCE_NAME_SINGULAR, &id));
        };

        let model = self.mapper.to_entity(dto);
        let mut active = active_model_from::<E>(&model);
        active.set(E::DELETED_COLUMN, false.into());
        self.stamper.pre_update::<E>(&mut active, &existing);

        let updated = self.repository.update(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(resource = E::RESOURCE_NAME_SINGULAR, %id, "Updated record");
        Ok(self.mapper.to_dto(updated))
    }

    /// Logically delete the record `id` and return it as it was before deletion.
    ///
    /// # Errors
    ///
    /// [`CrudError::NotFound`] when no live record has this id.
    pub async fn delete(&self, id: E::Id) -> Result<D, CrudError> {
        let txn = self.db.begin().await?;
        let Some(existing) = self.repository.find_by_id(&txn, id.clone()).await? else {
            return Err(CrudError::not_found(E::RESOURCE_NAME_SINGULAR, &id));
        };

        let mut active = active_model_from::<E>(&existing);
        self.stamper.pre_update::<E>(&mut active, &existing);
        self.repository.delete(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(resource = E::RESOURCE_NAME_SINGULAR, %id, "Deleted record");
        Ok(self.mapper.to_dto(existing))
    }

    fn example_condition(&self, probe: &D) -> Result<Condition, CrudError> {
        let probe = self.mapper.to_probe(probe);
        ExampleMatcher::new(&self.compiler)
            .compile(&probe)
            .map_err(rejected::<E>)
    }

    fn criteria_condition(&self, criteria: &[SearchFieldCriteria]) -> Result<Condition, CrudError> {
        self.compiler.compile(criteria).map_err(rejected::<E>)
    }

    async fn find_all(&self, condition: Condition) -> Result<Vec<D>, CrudError> {
        let order = vec![(E::ID_COLUMN, sea_orm::Order::Asc)];
        let models = self.repository.find_all(&self.db, condition, order).await?;
        tracing::debug!(
            resource = E::RESOURCE_NAME_PLURAL,
            count = models.len(),
            "Fetched records"
        );
        Ok(self.mapper.map_all_to_dto(models))
    }

    async fn find_page(&self, condition: Condition, pageable: &Pageable) -> Result<Page<D>, CrudError> {
        let order = resolve_order(self.compiler.fields(), &pageable.sort, E::ID_COLUMN)
            .map_err(rejected::<E>)?;
        let size = self.config.effective_page_size(pageable.size);

        let page = match size {
            Some(size) => {
                let offset = pageable.page.saturating_mul(size);
                let (models, total) = self
                    .repository
                    .find_page(&self.db, condition, order, offset, size)
                    .await?;
                Page::new(models, pageable.page, Some(size), total)
            }
            None => {
                let models = self.repository.find_all(&self.db, condition, order).await?;
                let total = models.len() as u64;
                let content = if pageable.page == 0 { models } else { Vec::new() };
                Page::new(content, pageable.page, None, total)
            }
        };
        tracing::debug!(
            resource = E::RESOURCE_NAME_PLURAL,
            page = page.page,
            total = page.total_elements,
            "Fetched page"
        );
        Ok(page.map(|model| self.mapper.to_dto(model)))
    }
}

fn rejected<E: CrudEntity>(err: CriteriaError) -> CrudError {
    tracing::warn!(resource = E::RESOURCE_NAME_PLURAL, error = %err, "Rejected search criteria");
    err.into()
}
