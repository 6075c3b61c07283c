use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Customer, CustomerId, CustomerQuery, Feedback, FeedbackId, FeedbackQuery, Interaction,
    InteractionId, Product, ProductId, Result, StoreError, store::EntityStore,
};

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, created_at, updated_at, deleted_at";
const PRODUCT_COLUMNS: &str = "id, name, category, created_at, updated_at, deleted_at";
const FEEDBACK_COLUMNS: &str =
    "id, customer_id, product_id, rating, comment, created_at, updated_at, deleted_at";
const INTERACTION_COLUMNS: &str =
    "id, customer_id, channel, description, created_at, updated_at, deleted_at";

/// Name of the partial unique index guarding live customer emails.
const CUSTOMER_EMAIL_KEY: &str = "customers_email_live_key";

/// PostgreSQL-backed entity store implementation.
#[derive(Clone)]
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    /// Creates a new PostgreSQL entity store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_customer(row: PgRow) -> Result<Customer> {
        Ok(Customer {
            id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }

    fn row_to_feedback(row: PgRow) -> Result<Feedback> {
        Ok(Feedback {
            id: FeedbackId::from_uuid(row.try_get::<Uuid, _>("id")?),
            customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id")?),
            product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
            rating: row.try_get("rating")?,
            comment: row.try_get("comment")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }

    fn row_to_interaction(row: PgRow) -> Result<Interaction> {
        Ok(Interaction {
            id: InteractionId::from_uuid(row.try_get::<Uuid, _>("id")?),
            customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id")?),
            channel: row.try_get("channel")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }

    /// Maps a violation of the live-email index to `UniqueViolation`.
    fn map_customer_write_error(e: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.constraint() == Some(CUSTOMER_EMAIL_KEY)
        {
            return StoreError::UniqueViolation {
                entity: "customer",
                field: "email",
            };
        }
        StoreError::Database(e)
    }

    /// Sets `deleted_at` on a live row of `table`, failing if none matched.
    async fn soft_delete(
        &self,
        table: &'static str,
        entity: &'static str,
        id: Uuid,
        deleted_at: DateTime<Utc>,
    ) -> Result<()> {
        let sql = format!("UPDATE {table} SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(deleted_at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(entity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .bind(customer.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_customer_write_error)?;

        Ok(())
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        let sql =
            format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn update_customer(&self, customer: &Customer) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_customer_write_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("customer", customer.id));
        }
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId, deleted_at: DateTime<Utc>) -> Result<()> {
        self.soft_delete("customers", "customer", id.as_uuid(), deleted_at)
            .await
    }

    async fn list_customers(&self, query: CustomerQuery) -> Result<Vec<Customer>> {
        let mut sql =
            format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE deleted_at IS NULL");
        let mut param_count = 0;

        // Build dynamic query
        let pattern = query.like_pattern();
        if pattern.is_some() {
            param_count += 1;
            sql.push_str(&format!(
                " AND (name ILIKE ${param_count} ESCAPE '\\' OR email ILIKE ${param_count} ESCAPE '\\')"
            ));
        }

        sql.push_str(" ORDER BY name COLLATE \"C\" ASC, id ASC");

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }
        if query.offset.is_some() {
            param_count += 1;
            sql.push_str(&format!(" OFFSET ${param_count}"));
        }

        // Build and execute query with parameters
        let mut sqlx_query = sqlx::query(&sql);

        if let Some(pattern) = pattern {
            sqlx_query = sqlx_query.bind(pattern);
        }
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(limit as i64);
        }
        if let Some(offset) = query.offset {
            sqlx_query = sqlx_query.bind(offset as i64);
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_customer).collect()
    }

    async fn insert_product(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .bind(product.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("product", product.id));
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId, deleted_at: DateTime<Utc>) -> Result<()> {
        self.soft_delete("products", "product", id.as_uuid(), deleted_at)
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NULL ORDER BY name COLLATE \"C\" ASC, id ASC"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feedbacks (id, customer_id, product_id, rating, comment, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.customer_id.as_uuid())
        .bind(feedback.product_id.as_uuid())
        .bind(feedback.rating)
        .bind(&feedback.comment)
        .bind(feedback.created_at)
        .bind(feedback.updated_at)
        .bind(feedback.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_feedback(&self, id: FeedbackId) -> Result<Option<Feedback>> {
        let sql =
            format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_feedback).transpose()
    }

    async fn update_feedback(&self, feedback: &Feedback) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE feedbacks
            SET customer_id = $2, product_id = $3, rating = $4, comment = $5, updated_at = $6
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.customer_id.as_uuid())
        .bind(feedback.product_id.as_uuid())
        .bind(feedback.rating)
        .bind(&feedback.comment)
        .bind(feedback.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("feedback", feedback.id));
        }
        Ok(())
    }

    async fn delete_feedback(&self, id: FeedbackId, deleted_at: DateTime<Utc>) -> Result<()> {
        self.soft_delete("feedbacks", "feedback", id.as_uuid(), deleted_at)
            .await
    }

    async fn list_feedback(&self, query: FeedbackQuery) -> Result<Vec<Feedback>> {
        let mut sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE deleted_at IS NULL");
        let mut param_count = 0;

        if query.customer_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND customer_id = ${param_count}"));
        }
        if query.product_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND product_id = ${param_count}"));
        }

        sql.push_str(" ORDER BY seq ASC");

        let mut sqlx_query = sqlx::query(&sql);

        if let Some(id) = query.customer_id {
            sqlx_query = sqlx_query.bind(id.as_uuid());
        }
        if let Some(id) = query.product_id {
            sqlx_query = sqlx_query.bind(id.as_uuid());
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_feedback).collect()
    }

    async fn insert_interaction(&self, interaction: &Interaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interactions (id, customer_id, channel, description, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(interaction.id.as_uuid())
        .bind(interaction.customer_id.as_uuid())
        .bind(&interaction.channel)
        .bind(&interaction.description)
        .bind(interaction.created_at)
        .bind(interaction.updated_at)
        .bind(interaction.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_interactions(&self, customer_id: CustomerId) -> Result<Vec<Interaction>> {
        let sql = format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE customer_id = $1 AND deleted_at IS NULL \
             ORDER BY seq ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(customer_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_interaction).collect()
    }
}
