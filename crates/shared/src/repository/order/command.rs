use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{
        CreateOrderRecordRequest, MarkPaidRecordRequest, TransitionStatusRecordRequest,
    },
    errors::RepositoryError,
    model::{Order as OrderModel, OrderStatus, PaymentStatus},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let address_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO addresses (label, line1, line2, city, state, pincode, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp)
            RETURNING address_id
            "#,
        )
        .bind(req.address.label.as_deref().unwrap_or("Home"))
        .bind(&req.address.line1)
        .bind(req.address.line2.as_deref())
        .bind(&req.address.city)
        .bind(&req.address.state)
        .bind(&req.address.pincode)
        .bind(&req.address.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create address for order {}: {:?}",
                req.order_number, err
            );
            RepositoryError::from(err)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders
                (order_number, user_id, guest_name, guest_phone, address_id,
                 total_amount, payment_method, payment_status, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.order_number)
        .bind(req.user_id)
        .bind(req.guest_name.as_deref())
        .bind(req.guest_phone.as_deref())
        .bind(address_id)
        .bind(req.total_amount)
        .bind(req.payment_method)
        .bind(PaymentStatus::Pending)
        .bind(OrderStatus::Pending)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order {}: {:?}", req.order_number, err);
            RepositoryError::from(err)
        })?;

        for item in &req.items {
            sqlx::query(
                r#"
                INSERT INTO order_items
                    (order_id, title, quantity, unit_price, total_price, created_at)
                VALUES ($1, $2, $3, $4, $5, current_timestamp)
                "#,
            )
            .bind(order.order_id)
            .bind(&item.title)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order item for order {}: {:?}",
                    order.order_id, err
                );
                RepositoryError::from(err)
            })?;
        }

        sqlx::query(
            r#"
            INSERT INTO order_status_logs (order_id, status, note, created_at)
            VALUES ($1, $2, $3, current_timestamp)
            "#,
        )
        .bind(order.order_id)
        .bind(OrderStatus::Pending)
        .bind("Order placed")
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to write initial status log for order {}: {:?}",
                order.order_id, err
            );
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order {} ({}) with {} item(s)",
            order.order_id,
            order.order_number,
            req.items.len()
        );
        Ok(order)
    }

    async fn transition_status(
        &self,
        req: &TransitionStatusRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // Row lock: two racing transitions on the same order serialize here,
        // so the second one re-reads the already-updated status and fails
        // the flow-table check instead of double-applying.
        let current: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE order_id = $1 FOR UPDATE")
                .bind(req.order_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

        let Some(current) = current else {
            return Err(RepositoryError::NotFound);
        };

        if !current.can_transition_to(req.status) {
            info!(
                "🚫 Rejected transition {} -> {} for order {}",
                current, req.status, req.order_id
            );
            return Err(RepositoryError::InvalidTransition {
                current,
                requested: req.status,
            });
        }

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = $2
            WHERE order_id = $1
            RETURNING *
            "#,
        )
        .bind(req.order_id)
        .bind(req.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to update status for order {}: {:?}",
                req.order_id, err
            );
            RepositoryError::from(err)
        })?;

        sqlx::query(
            r#"
            INSERT INTO order_status_logs (order_id, status, note, created_at)
            VALUES ($1, $2, $3, current_timestamp)
            "#,
        )
        .bind(req.order_id)
        .bind(req.status)
        .bind(req.note.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to append status log for order {}: {:?}",
                req.order_id, err
            );
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "🔄 Order {} moved {} -> {}",
            order.order_id, current, req.status
        );
        Ok(order)
    }

    async fn mark_paid(&self, req: &MarkPaidRecordRequest) -> Result<OrderModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let payment_status: Option<PaymentStatus> = sqlx::query_scalar(
            "SELECT payment_status FROM orders WHERE order_number = $1 FOR UPDATE",
        )
        .bind(&req.order_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        match payment_status {
            None => return Err(RepositoryError::NotFound),
            Some(PaymentStatus::Paid) => {
                return Err(RepositoryError::Conflict(format!(
                    "payment for order {} already captured",
                    req.order_number
                )));
            }
            Some(_) => {}
        }

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET payment_status     = $2,
                gateway_order_id   = $3,
                gateway_payment_id = $4
            WHERE order_number = $1
            RETURNING *
            "#,
        )
        .bind(&req.order_number)
        .bind(PaymentStatus::Paid)
        .bind(&req.gateway_order_id)
        .bind(&req.gateway_payment_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to mark order {} paid: {:?}",
                req.order_number, err
            );
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("💰 Order {} marked paid", order.order_number);
        Ok(order)
    }
}
