pub mod crud_operations;
pub mod mapper;
pub mod traits;

pub use crud_operations::CrudService;
pub use mapper::Mapper;
pub use traits::CrudEntity;
