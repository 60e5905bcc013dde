pub mod intel;
pub mod streak;
pub mod summary;
