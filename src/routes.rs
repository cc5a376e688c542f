//! Axum handlers exposing a [`CrudService`] over HTTP.
//!
//! | Method   | Path      | Body                  | Response                            |
//! |----------|-----------|-----------------------|-------------------------------------|
//! | `GET`    | `/`       | probe in query string | 200, [`Page`] + `Content-Range`     |
//! | `GET`    | `/{id}`   |                       | 200, DTO                            |
//! | `POST`   | `/`       | DTO                   | 201, created DTO                    |
//! | `PUT`    | `/{id}`   | DTO                   | 200, updated DTO                    |
//! | `DELETE` | `/{id}`   |                       | 200, `"OK"`                         |
//! | `POST`   | `/search` | criteria list         | 200, [`Page`] + `Content-Range`     |
//!
//! `page`, `size` and `sort` query parameters page the list and search endpoints. Mount the
//! router under the resource path:
//!
//! ```rust,ignore
//! let customers = Arc::new(CrudService::with_sea_orm(db, CustomerMapper));
//! let app = Router::new().nest("/customers", crud_router(customers));
//! ```

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

use crate::core::{CrudEntity, CrudService, Mapper};
use crate::errors::ApiError;
use crate::filtering::{Page, PageParams, Pageable, SearchFieldCriteria};
use crate::models::BaseDto;
use crate::repository::Repository;
use crate::validation::Validatable;

type Service<E, D, M, R> = State<Arc<CrudService<E, D, M, R>>>;

/// List records matching the probe fields present in the query string.
pub async fn get_all<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Query(params): Query<PageParams>,
    Query(probe): Query<D>,
) -> Result<(HeaderMap, Json<Page<D>>), ApiError>
where
    E: CrudEntity,
    D: BaseDto<Id = E::Id> + Validatable + Serialize + DeserializeOwned,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    let pageable = Pageable::from(params);
    let page = service
        .get_by_example_page(&probe, &pageable)
        .await
        .map_err(|err| ApiError::from_crud(err, service.messages()))?;
    let headers = page.content_range(E::RESOURCE_NAME_PLURAL);
    Ok((headers, Json(page)))
}

pub async fn get_one<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Path(id): Path<E::Id>,
) -> Result<Json<D>, ApiError>
where
    E: CrudEntity,
    E::Id: DeserializeOwned,
    D: BaseDto<Id = E::Id> + Validatable + Serialize,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    service
        .get(id)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_crud(err, service.messages()))
}

pub async fn create_one<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Json(dto): Json<D>,
) -> Result<(StatusCode, Json<D>), ApiError>
where
    E: CrudEntity,
    D: BaseDto<Id = E::Id> + Validatable + Serialize + DeserializeOwned,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    service
        .post(dto)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(|err| ApiError::from_crud(err, service.messages()))
}

pub async fn update_one<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Path(id): Path<E::Id>,
    Json(dto): Json<D>,
) -> Result<Json<D>, ApiError>
where
    E: CrudEntity,
    E::Id: DeserializeOwned,
    D: BaseDto<Id = E::Id> + Validatable + Serialize + DeserializeOwned,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    service
        .put(id, dto)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_crud(err, service.messages()))
}

pub async fn delete_one<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Path(id): Path<E::Id>,
) -> Result<Json<&'static str>, ApiError>
where
    E: CrudEntity,
    E::Id: DeserializeOwned,
    D: BaseDto<Id = E::Id> + Validatable + Serialize,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    service
        .delete(id)
        .await
        .map(|_| Json("OK"))
        .map_err(|err| ApiError::from_crud(err, service.messages()))
}

/// Search with an explicit criteria list in the body.
pub async fn search<E, D, M, R>(
    State(service): Service<E, D, M, R>,
    Query(params): Query<PageParams>,
    Json(criteria): Json<Vec<SearchFieldCriteria>>,
) -> Result<(HeaderMap, Json<Page<D>>), ApiError>
where
    E: CrudEntity,
    D: BaseDto<Id = E::Id> + Validatable + Serialize,
    M: Mapper<E, D>,
    R: Repository<E>,
{
    let pageable = Pageable::from(params);
    let page = service
        .search_page(&criteria, &pageable)
        .await
        .map_err(|err| ApiError::from_crud(err, service.messages()))?;
    let headers = page.content_range(E::RESOURCE_NAME_PLURAL);
    Ok((headers, Json(page)))
}

/// Router with every endpoint for one resource, meant to be nested under its path.
pub fn crud_router<E, D, M, R>(service: Arc<CrudService<E, D, M, R>>) -> Router
where
    E: CrudEntity,
    E::Id: DeserializeOwned,
    D: BaseDto<Id = E::Id> + Validatable + Serialize + DeserializeOwned,
    M: Mapper<E, D> + 'static,
    R: Repository<E> + 'static,
{
    Router::new()
        .route("/", get(get_all::<E, D, M, R>).post(create_one::<E, D, M, R>))
        .route("/search", post(search::<E, D, M, R>))
        .route(
            "/{id}",
            get(get_one::<E, D, M, R>)
                .put(update_one::<E, D, M, R>)
                .delete(delete_one::<E, D, M, R>),
        )
        .with_state(service)
}
