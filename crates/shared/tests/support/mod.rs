#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderCommandService, DynOrderFeed, DynOrderQueryRepository,
        DynOrderQueryService, OrderCommandRepositoryTrait, OrderFeedTrait,
        OrderQueryRepositoryTrait,
    },
    domain::{
        requests::{
            CreateAddressRequest, CreateOrderItemRequest, CreateOrderRecordRequest,
            CreateOrderRequest, FindAllOrders, MarkPaidRecordRequest,
            TransitionStatusRecordRequest,
        },
        responses::OrderDetailResponse,
    },
    errors::RepositoryError,
    model::{
        Address, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, StatusLog,
    },
    service::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Store {
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    logs: Vec<StatusLog>,
    addresses: Vec<Address>,
}

/// In-memory stand-in for the Postgres repositories. The mutex is held
/// across the check-then-write in `transition_status`, giving the same
/// serialization the row lock provides in the real store.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    store: Mutex<Store>,
}

impl InMemoryOrderRepository {
    pub async fn force_status(&self, order_id: i32, status: OrderStatus) {
        let mut store = self.store.lock().await;
        if let Some(order) = store.orders.iter_mut().find(|o| o.order_id == order_id) {
            order.status = status;
        }
    }

    pub async fn current_status(&self, order_id: i32) -> OrderStatus {
        let store = self.store.lock().await;
        store
            .orders
            .iter()
            .find(|o| o.order_id == order_id)
            .map(|o| o.status)
            .expect("order exists")
    }

    pub async fn log_count(&self, order_id: i32) -> usize {
        let store = self.store.lock().await;
        store.logs.iter().filter(|l| l.order_id == order_id).count()
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<Order, RepositoryError> {
        let mut store = self.store.lock().await;
        let now = Some(Utc::now().naive_utc());

        let address_id = store.addresses.len() as i32 + 1;
        store.addresses.push(Address {
            address_id,
            label: req.address.label.clone().unwrap_or_else(|| "Home".into()),
            line1: req.address.line1.clone(),
            line2: req.address.line2.clone(),
            city: req.address.city.clone(),
            state: req.address.state.clone(),
            pincode: req.address.pincode.clone(),
            phone: req.address.phone.clone(),
            created_at: now,
        });

        let order_id = store.orders.len() as i32 + 1;
        let order = Order {
            order_id,
            order_number: req.order_number.clone(),
            user_id: req.user_id,
            guest_name: req.guest_name.clone(),
            guest_phone: req.guest_phone.clone(),
            address_id,
            total_amount: req.total_amount,
            payment_method: req.payment_method,
            payment_status: PaymentStatus::Pending,
            gateway_order_id: None,
            gateway_payment_id: None,
            status: OrderStatus::Pending,
            created_at: now,
        };
        store.orders.push(order.clone());

        for item in &req.items {
            let order_item_id = store.items.len() as i32 + 1;
            store.items.push(OrderItem {
                order_item_id,
                order_id,
                title: item.title.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price: item.total_price,
                created_at: now,
            });
        }

        let status_log_id = store.logs.len() as i32 + 1;
        store.logs.push(StatusLog {
            status_log_id,
            order_id,
            status: OrderStatus::Pending,
            note: Some("Order placed".into()),
            created_at: now,
        });

        Ok(order)
    }

    async fn transition_status(
        &self,
        req: &TransitionStatusRecordRequest,
    ) -> Result<Order, RepositoryError> {
        let mut store = self.store.lock().await;

        let Some(order) = store.orders.iter_mut().find(|o| o.order_id == req.order_id) else {
            return Err(RepositoryError::NotFound);
        };

        let current = order.status;
        if !current.can_transition_to(req.status) {
            return Err(RepositoryError::InvalidTransition {
                current,
                requested: req.status,
            });
        }

        order.status = req.status;
        let order = order.clone();

        let status_log_id = store.logs.len() as i32 + 1;
        store.logs.push(StatusLog {
            status_log_id,
            order_id: req.order_id,
            status: req.status,
            note: req.note.clone(),
            created_at: Some(Utc::now().naive_utc()),
        });

        Ok(order)
    }

    async fn mark_paid(&self, req: &MarkPaidRecordRequest) -> Result<Order, RepositoryError> {
        let mut store = self.store.lock().await;

        let Some(order) = store
            .orders
            .iter_mut()
            .find(|o| o.order_number == req.order_number)
        else {
            return Err(RepositoryError::NotFound);
        };

        if order.payment_status == PaymentStatus::Paid {
            return Err(RepositoryError::Conflict(format!(
                "payment for order {} already captured",
                req.order_number
            )));
        }

        order.payment_status = PaymentStatus::Paid;
        order.gateway_order_id = Some(req.gateway_order_id.clone());
        order.gateway_payment_id = Some(req.gateway_payment_id.clone());

        Ok(order.clone())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderRepository {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        let store = self.store.lock().await;

        let matches: Vec<Order> = store
            .orders
            .iter()
            .filter(|o| req.status.is_none_or(|s| o.status == s))
            .filter(|o| req.search.is_empty() || o.order_number.contains(&req.search))
            .cloned()
            .collect();

        let total = matches.len() as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as usize;
        let page = matches
            .into_iter()
            .skip(offset)
            .take(req.page_size.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.orders.iter().find(|o| o.order_id == id).cloned())
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .orders
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn find_status_logs(&self, order_id: i32) -> Result<Vec<StatusLog>, RepositoryError> {
        let store = self.store.lock().await;
        let mut logs: Vec<StatusLog> = store
            .logs
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect();
        logs.reverse(); // most recent first, like the SQL query
        Ok(logs)
    }

    async fn find_address(&self, address_id: i32) -> Result<Address, RepositoryError> {
        let store = self.store.lock().await;
        store
            .addresses
            .iter()
            .find(|a| a.address_id == address_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    NewOrder(String),
    StatusChange(String, OrderStatus),
}

/// Fan-out double that just records what was published.
#[derive(Default)]
pub struct RecordingFeed {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingFeed {
    pub async fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl OrderFeedTrait for RecordingFeed {
    async fn publish_status_change(&self, order: &OrderDetailResponse) {
        self.events
            .lock()
            .await
            .push(RecordedEvent::StatusChange(
                order.order_number.clone(),
                order.status,
            ));
    }

    async fn publish_new_order(&self, order: &OrderDetailResponse) {
        self.events
            .lock()
            .await
            .push(RecordedEvent::NewOrder(order.order_number.clone()));
    }
}

pub struct TestHarness {
    pub repo: Arc<InMemoryOrderRepository>,
    pub feed: Arc<RecordingFeed>,
    pub command: DynOrderCommandService,
    pub query: DynOrderQueryService,
}

pub fn harness() -> TestHarness {
    let repo = Arc::new(InMemoryOrderRepository::default());
    let feed = Arc::new(RecordingFeed::default());
    let mut registry = Registry::default();

    let command = Arc::new(OrderCommandService::new(
        OrderCommandServiceDeps {
            command: repo.clone() as DynOrderCommandRepository,
            query: repo.clone() as DynOrderQueryRepository,
            feed: feed.clone() as DynOrderFeed,
        },
        &mut registry,
    )) as DynOrderCommandService;

    let query = Arc::new(OrderQueryService::new(
        repo.clone() as DynOrderQueryRepository,
        &mut registry,
    )) as DynOrderQueryService;

    TestHarness {
        repo,
        feed,
        command,
        query,
    }
}

pub fn test_address() -> CreateAddressRequest {
    CreateAddressRequest {
        label: None,
        line1: "42 MG Road".into(),
        line2: None,
        city: "Pune".into(),
        state: "Maharashtra".into(),
        pincode: "411001".into(),
        phone: "9876543210".into(),
    }
}

/// Guest order with the given (quantity, unit_price) line items.
pub fn guest_order_request(items: &[(i32, i64)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: items
            .iter()
            .enumerate()
            .map(|(i, (quantity, unit_price))| CreateOrderItemRequest {
                title: format!("Veg Thali #{i}"),
                quantity: *quantity,
                unit_price: *unit_price,
            })
            .collect(),
        address: test_address(),
        user_id: None,
        guest_name: Some("Asha".into()),
        guest_phone: Some("9876543210".into()),
        payment_method: PaymentMethod::Cash,
    }
}
