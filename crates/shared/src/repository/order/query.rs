use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllOrders,
    errors::RepositoryError,
    model::{Address, Order as OrderModel, OrderItem, StatusLog},
};
use async_trait::async_trait;
use sqlx::{FromRow, Row};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching orders page={} status={:?} search={:?}",
            req.page, req.status, req.search
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.as_str())
        };

        let rows = sqlx::query(
            r#"
            SELECT
                o.*,
                COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE ($1::order_status IS NULL OR o.status = $1)
              AND ($2::TEXT IS NULL OR o.order_number ILIKE '%' || $2 || '%')
            ORDER BY o.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(req.status)
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows
            .first()
            .map(|row| row.get::<i64, _>("total_count"))
            .unwrap_or(0);

        let orders = rows
            .iter()
            .map(OrderModel::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result =
            sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by number: {}", order_number);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result =
            sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_number = $1")
                .bind(order_number)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY order_item_id",
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(items)
    }

    async fn find_status_logs(&self, order_id: i32) -> Result<Vec<StatusLog>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let logs = sqlx::query_as::<_, StatusLog>(
            r#"
            SELECT * FROM order_status_logs
            WHERE order_id = $1
            ORDER BY created_at DESC, status_log_id DESC
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(logs)
    }

    async fn find_address(&self, address_id: i32) -> Result<Address, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let address =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE address_id = $1")
                .bind(address_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        address.ok_or(RepositoryError::NotFound)
    }
}
