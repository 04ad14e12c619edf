mod repository;

pub use self::repository::RepositoryError;
