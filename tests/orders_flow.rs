mod common;

use common::{create_food, create_user, order_request, setup_state, stats};
use food_rescue_api::{
    dto::orders::SubmitOrderRequest,
    entity::{
        audit_logs::{Column as AuditCol, Entity as AuditLogs},
        food_items::{Entity as FoodItems, FoodKind, FoodStatus},
        orders::{Column as OrderCol, Entity as Orders, OrderStatus},
    },
    error::AppError,
    lifecycle::Transition,
    money::AmountInput,
    routes::params::{MyOrdersQuery, NegotiationQuery},
    services::order_service,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

async fn food_status(state: &food_rescue_api::state::AppState, id: i64) -> anyhow::Result<FoodStatus> {
    let food = FoodItems::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("food item {id} missing"))?;
    Ok(food.status)
}

// Offer at or above the minimum confirms immediately and credits the consumer once.
#[tokio::test]
async fn direct_offer_confirms_and_credits_consumer() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let resp = order_service::submit_order(&state, &consumer, order_request(food_id, Some(12_000))).await?;
    assert_eq!(resp.order_status, OrderStatus::Confirmed);
    assert!(!resp.is_negotiation);
    assert_eq!(resp.data.order_amount, 12_000);

    assert_eq!(stats(&state, &consumer).await?, (24_000, 500));
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Ordered);

    // Completing does not credit again.
    order_service::apply_transition(&state, &consumer, resp.data.id, Transition::Complete).await?;
    assert_eq!(stats(&state, &consumer).await?, (24_000, 500));
    Ok(())
}

#[tokio::test]
async fn negotiation_is_credited_only_on_payment() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let food_id = create_food(&state, &provider, "Rp 10.000", 300, FoodKind::Donasi).await?;

    let resp = order_service::submit_order(&state, &consumer, order_request(food_id, Some(5_000))).await?;
    assert_eq!(resp.order_status, OrderStatus::Pending);
    assert!(resp.is_negotiation);
    let order_id = resp.data.id;
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Available);

    let offers = order_service::list_negotiations(
        &state,
        &provider,
        NegotiationQuery { food_item_id: Some(food_id) },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("no negotiations"))?;
    assert!(offers.items.iter().any(|offer| offer.id == order_id));

    let approved = order_service::apply_transition(&state, &provider, order_id, Transition::Approve).await?;
    assert_eq!(approved.data.map(|o| o.status), Some(OrderStatus::Approved));
    assert_eq!(stats(&state, &consumer).await?, (0, 0));

    let paid = order_service::apply_transition(&state, &consumer, order_id, Transition::ConfirmPayment).await?;
    assert_eq!(paid.data.map(|o| o.status), Some(OrderStatus::Confirmed));
    assert_eq!(stats(&state, &consumer).await?, (10_000, 300));
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Ordered);

    // A second confirmation finds the order in the wrong state.
    let err = order_service::apply_transition(&state, &consumer, order_id, Transition::ConfirmPayment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(stats(&state, &consumer).await?, (10_000, 300));
    Ok(())
}

#[tokio::test]
async fn rejected_offer_leaves_item_open_for_others() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let first = create_user(&state, "first").await?;
    let second = create_user(&state, "second").await?;
    let food_id = create_food(&state, &provider, "8.000", 400, FoodKind::Donasi).await?;

    let offer = order_service::submit_order(&state, &first, order_request(food_id, Some(1_000))).await?;
    let rejected = order_service::apply_transition(&state, &provider, offer.data.id, Transition::Reject).await?;
    assert_eq!(rejected.data.map(|o| o.status), Some(OrderStatus::Cancelled));
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Available);
    assert_eq!(stats(&state, &first).await?, (0, 0));

    let resp = order_service::submit_order(&state, &second, order_request(food_id, Some(8_000))).await?;
    assert_eq!(resp.order_status, OrderStatus::Confirmed);

    let offers = order_service::list_negotiations(
        &state,
        &provider,
        NegotiationQuery { food_item_id: Some(food_id) },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("no negotiations"))?;
    assert_eq!(offers.items.len(), 1);
    assert_eq!(offers.items[0].user_id, second.user_id);
    Ok(())
}

#[tokio::test]
async fn provider_cannot_order_own_listing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let err = order_service::submit_order(&state, &provider, order_request(food_id, Some(10_000)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.to_string(), "Tidak bisa memesan makanan sendiri.");
    Ok(())
}

#[tokio::test]
async fn ordering_unavailable_item_creates_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let winner = create_user(&state, "winner").await?;
    let late = create_user(&state, "late").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    order_service::submit_order(&state, &winner, order_request(food_id, Some(10_000))).await?;

    let err = order_service::submit_order(&state, &late, order_request(food_id, Some(50_000)))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Makanan tidak tersedia.");

    let late_orders = Orders::find()
        .filter(OrderCol::FoodItemId.eq(food_id))
        .filter(OrderCol::UserId.eq(late.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(late_orders, 0);

    let missing = order_service::submit_order(&state, &late, order_request(i64::MAX, Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn donation_without_offer_is_rejected() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let err = order_service::submit_order(&state, &consumer, order_request(food_id, None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "order_amount is required");
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Available);
    Ok(())
}

#[tokio::test]
async fn concurrent_purchases_of_sale_item_admit_one() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "seller").await?;
    let food_id = create_food(&state, &provider, "15.000", 700, FoodKind::Jualan).await?;

    let mut handles = Vec::new();
    for i in 0..4 {
        let state = state.clone();
        let buyer = create_user(&state, &format!("buyer{i}")).await?;
        handles.push(tokio::spawn(async move {
            order_service::submit_order(&state, &buyer, order_request(food_id, None)).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await? {
            Ok(resp) => {
                assert_eq!(resp.order_status, OrderStatus::Confirmed);
                assert_eq!(resp.data.order_amount, 15_000);
                succeeded += 1;
            }
            Err(err) => assert!(matches!(err, AppError::Conflict(_)), "unexpected error: {err:?}"),
        }
    }
    assert_eq!(succeeded, 1);

    let holders = Orders::find()
        .filter(OrderCol::FoodItemId.eq(food_id))
        .count(&state.orm)
        .await?;
    assert_eq!(holders, 1);
    Ok(())
}

#[tokio::test]
async fn only_the_right_party_may_transition() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let stranger = create_user(&state, "stranger").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let offer = order_service::submit_order(&state, &consumer, order_request(food_id, Some(2_000))).await?;
    let order_id = offer.data.id;

    // Consumers cannot approve their own offers; strangers cannot touch them.
    let err = order_service::apply_transition(&state, &consumer, order_id, Transition::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = order_service::apply_transition(&state, &stranger, order_id, Transition::Cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = order_service::get_order_detail(&state, &stranger, order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Right party, wrong state.
    let err = order_service::apply_transition(&state, &consumer, order_id, Transition::ConfirmPayment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = order_service::apply_transition(&state, &provider, i64::MAX, Transition::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let detail = order_service::get_order_detail(&state, &provider, order_id)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("no detail"))?;
    assert_eq!(detail.status, OrderStatus::Pending);
    assert_eq!(detail.provider_id, provider.user_id);
    Ok(())
}

#[tokio::test]
async fn consumer_can_withdraw_before_payment() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let offer = order_service::submit_order(&state, &consumer, order_request(food_id, Some(3_000))).await?;
    order_service::apply_transition(&state, &provider, offer.data.id, Transition::Approve).await?;
    let cancelled = order_service::apply_transition(&state, &consumer, offer.data.id, Transition::Cancel).await?;
    assert_eq!(cancelled.data.map(|o| o.status), Some(OrderStatus::Cancelled));

    let err = order_service::apply_transition(&state, &consumer, offer.data.id, Transition::ConfirmPayment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(food_status(&state, food_id).await?, FoodStatus::Available);
    Ok(())
}

#[tokio::test]
async fn payment_after_item_was_claimed_changes_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let negotiator = create_user(&state, "negotiator").await?;
    let buyer = create_user(&state, "buyer").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let offer = order_service::submit_order(&state, &negotiator, order_request(food_id, Some(5_000))).await?;
    order_service::apply_transition(&state, &provider, offer.data.id, Transition::Approve).await?;

    order_service::submit_order(&state, &buyer, order_request(food_id, Some(10_000))).await?;

    let err = order_service::apply_transition(&state, &negotiator, offer.data.id, Transition::ConfirmPayment)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Makanan tidak tersedia.");

    let order = Orders::find_by_id(offer.data.id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("order missing"))?;
    assert_eq!(order.status, OrderStatus::Approved);
    assert_eq!(stats(&state, &negotiator).await?, (0, 0));
    assert_eq!(stats(&state, &buyer).await?, (20_000, 500));
    Ok(())
}

#[tokio::test]
async fn my_orders_filter_by_status() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let cheap = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;
    let other = create_food(&state, &provider, "5.000", 200, FoodKind::Donasi).await?;

    order_service::submit_order(&state, &consumer, order_request(cheap, Some(1_000))).await?;
    order_service::submit_order(&state, &consumer, order_request(other, Some(5_000))).await?;

    let all = order_service::list_my_orders(&state, &consumer, MyOrdersQuery::default())
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("no orders"))?;
    assert_eq!(all.items.len(), 2);

    let pending = order_service::list_my_orders(
        &state,
        &consumer,
        MyOrdersQuery { status: Some(OrderStatus::Pending) },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("no orders"))?;
    assert_eq!(pending.items.len(), 1);
    assert_eq!(pending.items[0].food_item_id, cheap);
    Ok(())
}

#[tokio::test]
async fn sale_purchase_ignores_malformed_offer() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "seller").await?;
    let buyer = create_user(&state, "buyer").await?;
    let food_id = create_food(&state, &provider, "15.000", 700, FoodKind::Jualan).await?;

    let resp = order_service::submit_order(
        &state,
        &buyer,
        SubmitOrderRequest {
            food_item_id: Some(food_id),
            order_amount: Some(AmountInput::from("bukan angka")),
        },
    )
    .await?;
    assert_eq!(resp.order_status, OrderStatus::Confirmed);
    assert_eq!(resp.data.order_amount, 15_000);
    assert_eq!(stats(&state, &buyer).await?, (30_000, 700));
    Ok(())
}

#[tokio::test]
async fn lifecycle_actions_leave_audit_rows() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let provider = create_user(&state, "provider").await?;
    let consumer = create_user(&state, "consumer").await?;
    let food_id = create_food(&state, &provider, "10.000", 500, FoodKind::Donasi).await?;

    let offer = order_service::submit_order(&state, &consumer, order_request(food_id, Some(4_000))).await?;
    let order_id = offer.data.id;
    order_service::apply_transition(&state, &provider, order_id, Transition::Approve).await?;
    order_service::apply_transition(&state, &consumer, order_id, Transition::ConfirmPayment).await?;

    let expected = [
        (consumer.user_id, "order_submit"),
        (provider.user_id, Transition::Approve.audit_action()),
        (consumer.user_id, Transition::ConfirmPayment.audit_action()),
    ];
    for (user_id, action) in expected {
        let rows = AuditLogs::find()
            .filter(AuditCol::UserId.eq(user_id))
            .filter(AuditCol::Action.eq(action))
            .all(&state.orm)
            .await?;
        assert_eq!(rows.len(), 1, "audit rows for {action}");
        let metadata = rows[0]
            .metadata
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("{action} has no metadata"))?;
        assert_eq!(metadata["order_id"], order_id);
        assert_eq!(rows[0].resource.as_deref(), Some("orders"));
    }
    Ok(())
}
