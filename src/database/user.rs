use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::user::{NewUser, User};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn user_exists(&self, email: &str) -> Result<bool, AppError>;
    /// Overwrites email, password hash and both names.
    async fn update_user(&self, id: i64, user: &NewUser) -> Result<User, AppError>;
    async fn delete_user(&self, id: i64) -> Result<(), AppError>;
}

fn map_duplicate_email(err: sqlx::Error, email: &str) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::UserAlreadyExists(email.to_string()),
        other => other,
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_duplicate_email(e, &user.email))?;

        Ok(created)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<User, AppError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, password_hash = $2, first_name = $3, last_name = $4, updated_at = now()
            WHERE id = $5
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_duplicate_email(e, &user.email))?;

        updated.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_repository, unique};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_reported_as_existing_user() {
        let repo = test_repository().await;
        let email = format!("{}@example.com", unique("dup"));
        repo.create_user(&new_user(&email)).await.unwrap();
        assert!(repo.user_exists(&email).await.unwrap());

        let err = repo.create_user(&new_user(&email)).await.unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists(ref taken) if *taken == email));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_onto_a_taken_email_is_reported_as_existing_user() {
        let repo = test_repository().await;
        let taken = format!("{}@example.com", unique("taken"));
        repo.create_user(&new_user(&taken)).await.unwrap();
        let other = repo.create_user(&new_user(&format!("{}@example.com", unique("other")))).await.unwrap();

        let err = repo.update_user(other.id, &new_user(&taken)).await.unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_removes_the_user_once() {
        let repo = test_repository().await;
        let user = repo.create_user(&new_user(&format!("{}@example.com", unique("gone")))).await.unwrap();

        repo.delete_user(user.id).await.unwrap();

        assert!(repo.get_user_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(repo.delete_user(user.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.update_user(user.id, &new_user("x@example.com")).await, Err(AppError::NotFound(_))));
    }
}
