mod support;

use shared::{
    abstract_trait::{OrderCommandServiceTrait as _, OrderQueryServiceTrait as _},
    domain::requests::TransitionStatusRequest,
    errors::ServiceError,
    model::OrderStatus,
};
use support::{RecordedEvent, guest_order_request, harness};

fn transition(status: OrderStatus) -> TransitionStatusRequest {
    TransitionStatusRequest { status, note: None }
}

#[tokio::test]
async fn create_order_starts_pending_with_one_log_and_summed_total() {
    let h = harness();

    let response = h
        .command
        .create_order(&guest_order_request(&[(2, 100), (1, 70)]))
        .await
        .unwrap();
    let order = response.data;

    assert_eq!(order.total_amount, 270);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.status_logs.len(), 1);
    assert_eq!(order.status_logs[0].status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);

    let item_sum: i64 = order.items.iter().map(|i| i.total_price).sum();
    assert_eq!(item_sum, order.total_amount);

    // The "new order" signal goes to the admin channel only.
    assert_eq!(
        h.feed.events().await,
        vec![RecordedEvent::NewOrder(order.order_number.clone())]
    );
}

#[tokio::test]
async fn kitchen_flow_follows_the_table() {
    let h = harness();

    let order = h
        .command
        .create_order(&guest_order_request(&[(2, 100), (1, 70)]))
        .await
        .unwrap()
        .data;
    let id = order.id;

    let accepted = h.command.transition_status(id, &transition(OrderStatus::Accepted)).await;
    assert_eq!(accepted.unwrap().data.status, OrderStatus::Accepted);

    // Skipping ahead is rejected, and the rejection names both sides.
    let skipped = h
        .command
        .transition_status(id, &transition(OrderStatus::OutForDelivery))
        .await;
    match skipped {
        Err(ServiceError::InvalidTransition { current, requested }) => {
            assert_eq!(current, OrderStatus::Accepted);
            assert_eq!(requested, OrderStatus::OutForDelivery);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
    assert_eq!(h.repo.log_count(id).await, 2);

    let preparing = h.command.transition_status(id, &transition(OrderStatus::Preparing)).await;
    assert_eq!(preparing.unwrap().data.status, OrderStatus::Preparing);

    let cancelled = h
        .command
        .transition_status(
            id,
            &TransitionStatusRequest {
                status: OrderStatus::Cancelled,
                note: Some("customer called in".into()),
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.status_logs[0].note.as_deref(), Some("customer called in"));

    // Cancelled is terminal.
    for target in OrderStatus::ALL {
        let result = h.command.transition_status(id, &transition(target)).await;
        assert!(
            matches!(result, Err(ServiceError::InvalidTransition { .. })),
            "CANCELLED -> {target} should be rejected"
        );
    }
    assert_eq!(h.repo.log_count(id).await, 4);
}

#[tokio::test]
async fn transition_matrix_matches_flow_table() {
    let h = harness();

    let id = h
        .command
        .create_order(&guest_order_request(&[(1, 100)]))
        .await
        .unwrap()
        .data
        .id;

    for from in OrderStatus::ALL {
        for to in OrderStatus::ALL {
            h.repo.force_status(id, from).await;
            let logs_before = h.repo.log_count(id).await;

            let result = h.command.transition_status(id, &transition(to)).await;

            if from.can_transition_to(to) {
                let detail = result.unwrap().data;
                assert_eq!(detail.status, to, "{from} -> {to}");
                assert_eq!(h.repo.log_count(id).await, logs_before + 1);
            } else {
                match result {
                    Err(ServiceError::InvalidTransition { current, requested }) => {
                        assert_eq!(current, from);
                        assert_eq!(requested, to);
                    }
                    other => panic!("expected InvalidTransition for {from} -> {to}, got {other:?}"),
                }
                // No mutation on rejection.
                assert_eq!(h.repo.current_status(id).await, from);
                assert_eq!(h.repo.log_count(id).await, logs_before);
            }
        }
    }
}

#[tokio::test]
async fn transition_on_missing_order_is_not_found() {
    let h = harness();

    let result = h.command.transition_status(999, &transition(OrderStatus::Accepted)).await;
    assert!(matches!(result, Err(ServiceError::OrderNotFound)));
    assert!(h.feed.events().await.is_empty());
}

#[tokio::test]
async fn guest_identity_is_required_without_a_user() {
    let h = harness();

    let mut req = guest_order_request(&[(1, 100)]);
    req.guest_phone = None;

    let result = h.command.create_order(&req).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert!(h.feed.events().await.is_empty());
}

#[tokio::test]
async fn a_user_order_drops_stray_guest_fields() {
    let h = harness();

    let mut req = guest_order_request(&[(1, 100)]);
    req.user_id = Some(7);

    let order = h.command.create_order(&req).await.unwrap().data;
    assert_eq!(order.user_id, Some(7));
    assert_eq!(order.guest_name, None);
    assert_eq!(order.guest_phone, None);
}

#[tokio::test]
async fn accepted_transition_is_published_to_the_feed() {
    let h = harness();

    let order = h
        .command
        .create_order(&guest_order_request(&[(1, 100)]))
        .await
        .unwrap()
        .data;

    h.command
        .transition_status(order.id, &transition(OrderStatus::Accepted))
        .await
        .unwrap();

    assert_eq!(
        h.feed.events().await,
        vec![
            RecordedEvent::NewOrder(order.order_number.clone()),
            RecordedEvent::StatusChange(order.order_number.clone(), OrderStatus::Accepted),
        ]
    );
}

#[tokio::test]
async fn tracking_query_returns_the_full_history() {
    let h = harness();

    let order = h
        .command
        .create_order(&guest_order_request(&[(1, 250)]))
        .await
        .unwrap()
        .data;

    h.command
        .transition_status(order.id, &transition(OrderStatus::Accepted))
        .await
        .unwrap();

    let fetched = h
        .query
        .find_by_order_number(&order.order_number)
        .await
        .unwrap()
        .data;

    assert_eq!(fetched.status, OrderStatus::Accepted);
    // Most recent first.
    assert_eq!(fetched.status_logs.len(), 2);
    assert_eq!(fetched.status_logs[0].status, OrderStatus::Accepted);
    assert_eq!(fetched.status_logs[1].status, OrderStatus::Pending);

    let missing = h.query.find_by_order_number("JF000000XXXX").await;
    assert!(matches!(missing, Err(ServiceError::OrderNotFound)));
}
