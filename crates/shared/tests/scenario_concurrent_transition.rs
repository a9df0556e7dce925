mod support;

use shared::{
    abstract_trait::OrderCommandServiceTrait as _,
    domain::requests::TransitionStatusRequest,
    errors::ServiceError,
    model::OrderStatus,
};
use support::{guest_order_request, harness};

/// Two simultaneous transitions on the same PENDING order must yield
/// exactly one success and one InvalidTransition, never two successes and
/// never a corrupted status or log.
#[tokio::test]
async fn racing_transitions_yield_one_success_and_one_rejection() {
    let h = harness();

    for round in 0..25 {
        let id = h
            .command
            .create_order(&guest_order_request(&[(1, 100)]))
            .await
            .unwrap()
            .data
            .id;

        let accept = {
            let command = h.command.clone();
            tokio::spawn(async move {
                command
                    .transition_status(
                        id,
                        &TransitionStatusRequest {
                            status: OrderStatus::Accepted,
                            note: None,
                        },
                    )
                    .await
            })
        };

        let cancel = {
            let command = h.command.clone();
            tokio::spawn(async move {
                command
                    .transition_status(
                        id,
                        &TransitionStatusRequest {
                            status: OrderStatus::Cancelled,
                            note: Some("customer changed their mind".into()),
                        },
                    )
                    .await
            })
        };

        let accept_result = accept.await.unwrap();
        let cancel_result = cancel.await.unwrap();

        let successes =
            usize::from(accept_result.is_ok()) + usize::from(cancel_result.is_ok());
        assert_eq!(successes, 1, "round {round}: exactly one writer may win");

        let loser = if accept_result.is_err() {
            accept_result.unwrap_err()
        } else {
            cancel_result.unwrap_err()
        };
        assert!(
            matches!(
                loser,
                ServiceError::InvalidTransition {
                    current: OrderStatus::Accepted | OrderStatus::Cancelled,
                    ..
                }
            ),
            "round {round}: loser saw {loser:?}"
        );

        // One creation log plus exactly one transition log.
        assert_eq!(h.repo.log_count(id).await, 2, "round {round}");

        let final_status = h.repo.current_status(id).await;
        assert!(
            matches!(final_status, OrderStatus::Accepted | OrderStatus::Cancelled),
            "round {round}: final status {final_status}"
        );
    }
}
