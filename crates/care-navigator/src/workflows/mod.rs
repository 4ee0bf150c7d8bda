pub mod admin;
pub mod directory;
pub mod inbox;
pub mod navigator;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use repository::RepositoryError;
