//! Unit tests for the order lifecycle fan-out

use std::sync::Arc;

use sendy_shared::config::{AdminConfig, PolicyConfig};

use crate::domain::entities::order::{OrderSnapshot, OrderStatus};
use crate::domain::entities::user::{ApprovalStatus, UserRole, UserSnapshot};
use crate::services::notify::{EntityChange, NotificationService};
use crate::services::policy::PolicyProvider;

use super::mocks::{user, MockDirectory, MockEmail, MockLog, MockPush, StaticSource};

struct Fixture {
    push: Arc<MockPush>,
    service: NotificationService<MockDirectory, MockPush, MockEmail, MockLog, StaticSource>,
}

fn fixture(users: Vec<UserSnapshot>, push: MockPush) -> Fixture {
    let directory = Arc::new(MockDirectory::new(users));
    let push = Arc::new(push);
    let email = Arc::new(MockEmail::new(false));
    let log = Arc::new(MockLog::new());
    let policy = Arc::new(PolicyProvider::new(Arc::new(StaticSource {
        config: PolicyConfig {
            admin: AdminConfig {
                recipients: vec!["ops@sendy.app".to_string()],
                from_address: "alerts@sendy.app".to_string(),
            },
            ..Default::default()
        },
    })));

    let service = NotificationService::new(directory, Arc::clone(&push), email, log, policy);
    Fixture { push, service }
}

fn restaurant(city: Option<&str>) -> UserSnapshot {
    let mut r = user("r1", UserRole::Restaurant);
    r.business_name = Some("Chez Fatima".to_string());
    r.city = city.map(|c| c.to_string());
    r
}

fn courier(id: &str, city: &str) -> UserSnapshot {
    let mut c = user(id, UserRole::Delivery);
    c.city = Some(city.to_string());
    c
}

fn order(status: OrderStatus) -> OrderSnapshot {
    OrderSnapshot {
        status,
        client_id: "c1".to_string(),
        restaurant_id: "r1".to_string(),
        delivery_person_id: None,
        item_count: 3,
        total: 120.5,
        address: Some("12 Rue des Fleurs".to_string()),
    }
}

fn change(before: Option<OrderSnapshot>, after: Option<OrderSnapshot>) -> EntityChange {
    EntityChange::Order {
        id: "o1".to_string(),
        before,
        after,
    }
}

#[tokio::test]
async fn test_new_order_notifies_the_restaurant() {
    let f = fixture(
        vec![restaurant(Some("Casablanca")), user("c1", UserRole::Client)],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(None, Some(order(OrderStatus::Created))))
        .await;

    let delivered = f.push.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "token-r1");
    assert_eq!(delivered[0].1.title, "New order");
    assert!(delivered[0].1.body.contains("3 items"));
    assert!(delivered[0].1.body.contains("120.50"));
}

#[tokio::test]
async fn test_accepted_broadcasts_to_couriers_in_the_restaurant_city() {
    let f = fixture(
        vec![
            restaurant(Some("Casablanca")),
            courier("d1", "Casablanca"),
            courier("d2", "Casablanca"),
            courier("d3", "Rabat"),
        ],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    let mut tokens = f.push.delivered_tokens();
    tokens.sort();
    assert_eq!(tokens, vec!["token-d1", "token-d2"]);

    let (_, message) = &f.push.delivered()[0];
    assert_eq!(message.title, "Delivery available");
    assert!(message.body.contains("12 Rue des Fleurs"));
}

#[tokio::test]
async fn test_accepted_without_restaurant_city_broadcasts_to_all_couriers() {
    let f = fixture(
        vec![
            restaurant(None),
            courier("d1", "Casablanca"),
            courier("d2", "Rabat"),
            courier("d3", "Tangier"),
        ],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    assert_eq!(f.push.delivered_tokens().len(), 3);
}

#[tokio::test]
async fn test_accepted_excludes_unapproved_couriers() {
    let mut pending = courier("d2", "Casablanca");
    pending.approval = ApprovalStatus::Pending;

    let f = fixture(
        vec![restaurant(Some("Casablanca")), courier("d1", "Casablanca"), pending],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    assert_eq!(f.push.delivered_tokens(), vec!["token-d1"]);
}

#[tokio::test]
async fn test_unchanged_status_dispatches_nothing() {
    let f = fixture(
        vec![restaurant(Some("Casablanca")), courier("d1", "Casablanca")],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Accepted)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    assert_eq!(f.push.attempt_count(), 0);
}

#[tokio::test]
async fn test_one_courier_failure_does_not_block_the_others() {
    let f = fixture(
        vec![
            restaurant(Some("Casablanca")),
            courier("d1", "Casablanca"),
            courier("d2", "Casablanca"),
            courier("d3", "Casablanca"),
            courier("d4", "Casablanca"),
            courier("d5", "Casablanca"),
        ],
        MockPush::failing_for(&["token-d3"]),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    // All five sends were attempted; four landed
    assert_eq!(f.push.attempt_count(), 5);
    let mut tokens = f.push.delivered_tokens();
    tokens.sort();
    assert_eq!(tokens, vec!["token-d1", "token-d2", "token-d4", "token-d5"]);
}

#[tokio::test]
async fn test_courier_without_token_is_skipped_silently() {
    let mut tokenless = courier("d2", "Casablanca");
    tokenless.push_token = None;

    let f = fixture(
        vec![restaurant(Some("Casablanca")), courier("d1", "Casablanca"), tokenless],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    assert_eq!(f.push.attempt_count(), 1);
    assert_eq!(f.push.delivered_tokens(), vec!["token-d1"]);
}

#[tokio::test]
async fn test_picked_up_requires_an_assigned_courier() {
    let f = fixture(
        vec![restaurant(Some("Casablanca")), user("c1", UserRole::Client)],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::Accepted)),
            Some(order(OrderStatus::PickedUp)),
        ))
        .await;
    assert_eq!(f.push.attempt_count(), 0);

    let mut after = order(OrderStatus::PickedUp);
    after.delivery_person_id = Some("d1".to_string());
    f.service
        .on_entity_changed(change(Some(order(OrderStatus::Accepted)), Some(after)))
        .await;

    let delivered = f.push.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "token-c1");
    assert_eq!(delivered[0].1.title, "Order in progress");
}

#[tokio::test]
async fn test_delivered_notifies_the_client() {
    let f = fixture(
        vec![restaurant(Some("Casablanca")), user("c1", UserRole::Client)],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::PickedUp)),
            Some(order(OrderStatus::Delivered)),
        ))
        .await;

    let delivered = f.push.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "token-c1");
    assert_eq!(delivered[0].1.title, "Order delivered");
}

#[tokio::test]
async fn test_client_without_token_is_a_noop() {
    let mut client = user("c1", UserRole::Client);
    client.push_token = None;

    let f = fixture(vec![restaurant(Some("Casablanca")), client], MockPush::new());

    f.service
        .on_entity_changed(change(
            Some(order(OrderStatus::PickedUp)),
            Some(order(OrderStatus::Delivered)),
        ))
        .await;

    assert_eq!(f.push.attempt_count(), 0);
}

#[tokio::test]
async fn test_order_deletion_dispatches_nothing() {
    let f = fixture(
        vec![restaurant(Some("Casablanca")), user("c1", UserRole::Client)],
        MockPush::new(),
    );

    f.service
        .on_entity_changed(change(Some(order(OrderStatus::Delivered)), None))
        .await;

    assert_eq!(f.push.attempt_count(), 0);
}

#[tokio::test]
async fn test_directory_failure_is_swallowed() {
    let directory = Arc::new(MockDirectory::failing());
    let push = Arc::new(MockPush::new());
    let email = Arc::new(MockEmail::new(false));
    let log = Arc::new(MockLog::new());
    let policy = Arc::new(PolicyProvider::new(Arc::new(StaticSource {
        config: PolicyConfig::default(),
    })));
    let service =
        NotificationService::new(directory, Arc::clone(&push), email, log, policy);

    // Must not panic or error out
    service
        .on_entity_changed(change(
            Some(order(OrderStatus::Created)),
            Some(order(OrderStatus::Accepted)),
        ))
        .await;

    assert_eq!(push.attempt_count(), 0);
}
