use super::CrudEntity;

/// Bidirectional, total mapping between an entity model and its DTO.
///
/// `to_dto` and `to_entity` must agree on every field the DTO exposes, so that
/// `to_entity(to_dto(model))` reproduces `model`'s exposed fields. Neither may fail.
pub trait Mapper<E: CrudEntity, D>: Send + Sync {
    fn to_dto(&self, entity: E::Model) -> D;

    fn to_entity(&self, dto: D) -> E::Model;

    /// Entity-shaped probe for query-by-example. Fields absent from `probe` must be left
    /// `NotSet` so they do not take part in matching.
    fn to_probe(&self, probe: &D) -> E::ActiveModelType;

    /// Maps one to one, preserving order.
    fn map_all_to_dto(&self, entities: Vec<E::Model>) -> Vec<D> {
        entities.into_iter().map(|entity| self.to_dto(entity)).collect()
    }

    /// Maps one to one, preserving order.
    fn map_all_to_entity(&self, dtos: Vec<D>) -> Vec<E::Model> {
        dtos.into_iter().map(|dto| self.to_entity(dto)).collect()
    }
}
