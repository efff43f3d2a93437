pub mod machine;
pub mod maintenance;
pub mod postgres_repository;
pub mod rental;
pub mod review;
pub mod user;
