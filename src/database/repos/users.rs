use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{self, Role};
use crate::database::models::user::{CreateUserRequest, User};

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_username_role(
        pool: &PgPool,
        username: &str,
        role: Role,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 AND role = $2")
            .bind(username)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, church_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE church_id = $1 ORDER BY role, username",
        )
        .bind(church_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        church_id: Option<Uuid>,
        req: &CreateUserRequest,
    ) -> Result<User, sqlx::Error> {
        let salt = auth::generate_salt();
        let hash = auth::hash_password(&req.password, &salt);

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, church_id, role, username, password_salt, password_hash,
                                unit_id, bavanakutayima_id, member_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(req.role)
        .bind(&req.username)
        .bind(salt)
        .bind(hash)
        .bind(req.unit_id)
        .bind(req.bavanakutayima_id)
        .bind(req.member_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
