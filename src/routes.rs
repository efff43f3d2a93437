pub mod error;
pub mod health;
pub mod machine;
pub mod maintenance;
pub mod rental;
pub mod review;
pub mod user;

/// Mount prefix of the API, used to build `Location` headers for created resources.
#[derive(Debug, Clone)]
pub struct ApiBase(pub String);

impl ApiBase {
    pub fn location(&self, group: &str, id: i64) -> String {
        format!("{}/{}/{}", self.0.trim_end_matches('/'), group.trim_matches('/'), id)
    }
}
