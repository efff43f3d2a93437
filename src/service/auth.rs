use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::user::{LoginRequest, NewUser, User, UserRequest};
use crate::service::password::{dummy_verify, hash_password, verify_password};
use crate::service::token::TokenService;
use tracing::info;

/// Registration, credential checks and token issuance on top of a user store.
pub struct AuthService<'a, R> {
    repository: &'a R,
    tokens: &'a TokenService,
}

impl<'a, R: UserRepository + Sync> AuthService<'a, R> {
    pub fn new(repository: &'a R, tokens: &'a TokenService) -> Self {
        AuthService { repository, tokens }
    }

    /// Creates a user unless the email is taken. A concurrent registration that
    /// slips past the existence check is caught by the unique constraint and
    /// reported the same way.
    pub async fn register(&self, request: &UserRequest) -> Result<User, AppError> {
        if self.repository.user_exists(&request.email).await? {
            return Err(AppError::UserAlreadyExists(request.email.clone()));
        }

        let user = self.repository.create_user(&new_user(request)?).await?;
        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        match self.repository.get_user_by_email(email).await? {
            Some(user) => {
                verify_password(&user.password_hash, password)?;
                Ok(user)
            }
            None => {
                dummy_verify(password);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<String, AppError> {
        let user = self.authenticate(&request.email, &request.password).await?;
        let token = self.tokens.issue_token(user.id)?;
        info!(user_id = user.id, expires_in_secs = self.tokens.lifetime().num_seconds(), "user logged in");
        Ok(token)
    }

    /// Full replacement of email, password and names.
    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<User, AppError> {
        self.repository.update_user(id, &new_user(request)?).await
    }
}

/// Store-ready user with the plain password replaced by its hash.
fn new_user(request: &UserRequest) -> Result<NewUser, AppError> {
    Ok(NewUser {
        email: request.email.clone(),
        password_hash: hash_password(&request.password)?,
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
    })
}
