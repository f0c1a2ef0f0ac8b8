use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;
use business::domain::shared::value_objects::ProductCode;

use super::entity::ProductEntity;

const SELECT_PRODUCT: &str = "SELECT id, code, name, location, quantity, price, category, image_path, created_at, updated_at FROM products";

pub struct ProductRepositorySqlite {
    pool: SqlitePool,
}

impl ProductRepositorySqlite {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Duplicated
        }
        other => {
            tracing::error!("product write failed: {}", other);
            RepositoryError::DatabaseError
        }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositorySqlite {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "{} ORDER BY name ASC, created_at ASC",
            SELECT_PRODUCT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity =
            sqlx::query_as::<_, ProductEntity>(&format!("{} WHERE id = ?", SELECT_PRODUCT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|_| RepositoryError::DatabaseError)?
                .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn find_by_code(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError> {
        let entity =
            sqlx::query_as::<_, ProductEntity>(&format!("{} WHERE code = ?", SELECT_PRODUCT))
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn code_exists(&self, code: &ProductCode) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM issued_codes WHERE code = ?")
            .bind(code.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(count > 0)
    }

    async fn get_with_reference_image(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "{} WHERE image_path IS NOT NULL ORDER BY name ASC, created_at ASC",
            SELECT_PRODUCT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        sqlx::query("INSERT INTO issued_codes (code, issued_at) VALUES (?, ?)")
            .bind(product.code.as_str())
            .bind(product.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?;

        sqlx::query(
            r#"INSERT INTO products (id, code, name, location, quantity, price, category, image_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(product.id)
        .bind(product.code.as_str())
        .bind(&product.name)
        .bind(&product.location)
        .bind(product.quantity)
        .bind(product.price.to_string())
        .bind(&product.category)
        .bind(&product.image_path)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
