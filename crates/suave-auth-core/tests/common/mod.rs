//! Common test utilities for suave-auth-core integration tests

pub mod mock_repos;

pub use mock_repos::MockUserRepository;
