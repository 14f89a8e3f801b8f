mod apollo_repository;
mod attio_repository;
mod traits;

pub use apollo_repository::ApolloRepository;
pub use attio_repository::AttioRepository;
pub use traits::{SourceRepository, TargetRepository};
