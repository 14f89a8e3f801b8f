//! In-memory repositories for orchestration tests.

pub mod mock_source_repository;
pub mod mock_target_repository;

#[allow(unused_imports)]
pub use mock_source_repository::MockSourceRepository;
#[allow(unused_imports)]
pub use mock_target_repository::MockTargetRepository;
