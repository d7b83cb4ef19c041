//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod crop_repo;
pub mod farm_repo;
pub mod harvest_repo;
pub mod producer_repo;

pub use crop_repo::CropRepo;
pub use farm_repo::FarmRepo;
pub use harvest_repo::HarvestRepo;
pub use producer_repo::ProducerRepo;
