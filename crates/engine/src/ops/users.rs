use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, SqlErr, prelude::*};

use crate::{
    EngineError, ResultEngine, User, password, users,
    util::{display_name_from_email, normalize_optional_text},
};

use super::Engine;

impl Engine {
    /// Looks up an account by exact email match.
    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        Ok(find_user(&self.database, email).await?.map(User::from))
    }

    /// Registers a new account.
    ///
    /// When `name` is missing or blank the local part of the email becomes
    /// the display name. The password is stored as a salted argon2 hash.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> ResultEngine<User> {
        if email.trim().is_empty() {
            return Err(EngineError::InvalidInput("email must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        if find_user(&self.database, email).await?.is_some() {
            return Err(EngineError::ExistingKey(email.to_string()));
        }

        let name = normalize_optional_text(name).unwrap_or_else(|| display_name_from_email(email));
        let active = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password::hash(password)?),
        };

        // The unique index still catches a concurrent registration that slipped
        // past the lookup above.
        let model = active.insert(&self.database).await.map_err(|err| {
            match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    EngineError::ExistingKey(email.to_string())
                }
                _ => EngineError::Database(err),
            }
        })?;

        tracing::debug!(user_id = model.id, "registered user");
        Ok(model.into())
    }

    /// Verifies credentials. No session is created; callers re-authenticate
    /// on every request that needs it.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<User> {
        let model = self.require_user(email).await?;
        if !password::verify(password, &model.password_hash)? {
            return Err(EngineError::InvalidCredential);
        }
        Ok(model.into())
    }

    pub(super) async fn require_user(&self, email: &str) -> ResultEngine<users::Model> {
        find_user(&self.database, email)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }
}

pub(super) async fn find_user<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> ResultEngine<Option<users::Model>> {
    Ok(users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?)
}
