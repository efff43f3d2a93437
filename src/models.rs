pub mod health;
pub mod machine;
pub mod maintenance;
pub mod pagination;
pub mod rental;
pub mod response;
pub mod review;
pub mod user;
