//! Storage contract used by [`CrudService`](crate::CrudService).
//!
//! Every method takes the connection to run on, so the service can run a group of calls
//! inside one transaction. Reads never return logically deleted rows.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::marker::PhantomData;

use crate::core::CrudEntity;

#[async_trait]
pub trait Repository<E: CrudEntity>: Send + Sync {
    async fn find_by_id<C>(&self, conn: &C, id: E::Id) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait;

    async fn exists_by_id<C>(&self, conn: &C, id: E::Id) -> Result<bool, DbErr>
    where
        C: ConnectionTrait;

    /// All live rows matching `filter`, in `order`.
    async fn find_all<C>(
        &self,
        conn: &C,
        filter: Condition,
        order: Vec<(E::Column, Order)>,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait;

    /// One window of the live rows matching `filter`, plus the total match count.
    async fn find_page<C>(
        &self,
        conn: &C,
        filter: Condition,
        order: Vec<(E::Column, Order)>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<E::Model>, u64), DbErr>
    where
        C: ConnectionTrait;

    async fn insert<C>(&self, conn: &C, model: E::ActiveModelType) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait;

    async fn update<C>(&self, conn: &C, model: E::ActiveModelType) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait;

    /// Logical delete: flags the row as deleted and writes the remaining columns of `model`.
    async fn delete<C>(&self, conn: &C, model: E::ActiveModelType) -> Result<(), DbErr>
    where
        C: ConnectionTrait;
}

/// [`Repository`] over the entity's own table.
pub struct SeaOrmRepository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmRepository<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for SeaOrmRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for SeaOrmRepository<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn live<E: CrudEntity>(filter: Condition) -> Condition {
    Condition::all()
        .add(ColumnTrait::eq(&E::DELETED_COLUMN, false))
        .add(filter)
}

fn ordered<E: CrudEntity>(select: Select<E>, order: Vec<(E::Column, Order)>) -> Select<E> {
    order
        .into_iter()
        .fold(select, |select, (column, direction)| select.order_by(column, direction))
}

#[async_trait]
impl<E> Repository<E> for SeaOrmRepository<E>
where
    E: CrudEntity,
    E::Model: IntoActiveModel<E::ActiveModelType> + Sync,
{
    async fn find_by_id<C>(&self, conn: &C, id: E::Id) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find_by_id(id)
            .filter(live::<E>(Condition::all()))
            .one(conn)
            .await
    }

    async fn exists_by_id<C>(&self, conn: &C, id: E::Id) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let count = E::find_by_id(id)
            .filter(live::<E>(Condition::all()))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    async fn find_all<C>(
        &self,
        conn: &C,
        filter: Condition,
        order: Vec<(E::Column, Order)>,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        ordered(E::find().filter(live::<E>(filter)), order)
            .all(conn)
            .await
    }

    async fn find_page<C>(
        &self,
        conn: &C,
        filter: Condition,
        order: Vec<(E::Column, Order)>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<E::Model>, u64), DbErr>
    where
        C: ConnectionTrait,
    {
        let query = E::find().filter(live::<E>(filter));
        let total = query.clone().count(conn).await?;
        let models = ordered(query, order)
            .offset(offset)
            .limit(limit)
            .all(conn)
            .await?;
        Ok((models, total))
    }

    async fn insert<C>(&self, conn: &C, model: E::ActiveModelType) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        model.insert(conn).await
    }

    async fn update<C>(&self, conn: &C, model: E::ActiveModelType) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        model.update(conn).await
    }

    async fn delete<C>(&self, conn: &C, mut model: E::ActiveModelType) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        model.set(E::DELETED_COLUMN, true.into());
        model.update(conn).await?;
        Ok(())
    }
}
