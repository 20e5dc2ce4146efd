use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use puris_forms::prelude::*;
use puris_forms::{allowed_transitions, same_day, validate_transition, DraftSource};
use puris_model::{
    Delivery, DeliveryField, DemandCapacityNotification, NotificationField, Production,
    ProductionField, Record,
};
use puris_test_utils::{
    at, delivery_departing, production_completing, valid_delivery, valid_notification,
    valid_production,
};
use std::sync::Arc;
use uuid::Uuid;

mock! {
    pub DeliveryGateway {}

    #[async_trait]
    impl PersistenceGateway<Delivery> for DeliveryGateway {
        async fn create(&self, record: &Delivery) -> Result<(), GatewayError>;
        async fn update(&self, record: &Delivery) -> Result<(), GatewayError>;
        async fn delete(&self, id: Uuid) -> Result<(), GatewayError>;
    }
}

mock! {
    pub ProductionGateway {}

    #[async_trait]
    impl PersistenceGateway<Production> for ProductionGateway {
        async fn create(&self, record: &Production) -> Result<(), GatewayError>;
        async fn update(&self, record: &Production) -> Result<(), GatewayError>;
        async fn delete(&self, id: Uuid) -> Result<(), GatewayError>;
    }
}

type EventLog = Arc<Mutex<Vec<&'static str>>>;

struct Recorder(EventLog);

impl ModalListener for Recorder {
    fn on_save(&self) {
        self.0.lock().push("on_save");
    }

    fn on_close(&self) {
        self.0.lock().push("on_close");
    }
}

fn delivery_modal(
    gateway: MockDeliveryGateway,
    log: &EventLog,
) -> Modal<Delivery, MockDeliveryGateway, Utc> {
    Modal::new(gateway, &FormsConfig::default())
        .with_listener(Arc::new(Recorder(Arc::clone(log))))
        .in_zone(Utc)
}

fn delivery_clearing(field: usize) -> DeliveryField {
    match field {
        0 => DeliveryField::OwnMaterialNumber(None),
        1 => DeliveryField::OriginBpns(None),
        2 => DeliveryField::PartnerBpnl(None),
        3 => DeliveryField::DestinationBpns(None),
        4 => DeliveryField::Quantity(None),
        5 => DeliveryField::MeasurementUnit(None),
        6 => DeliveryField::DateOfDeparture(None),
        _ => DeliveryField::DateOfArrival(None),
    }
}

fn production_clearing(field: usize) -> ProductionField {
    match field {
        0 => ProductionField::EstimatedTimeOfCompletion(None),
        1 => ProductionField::Quantity(None),
        2 => ProductionField::MeasurementUnit(None),
        _ => ProductionField::Partner(None),
    }
}

fn notification_clearing(field: usize) -> NotificationField {
    match field {
        0 => NotificationField::PartnerBpnl(None),
        1 => NotificationField::Effect(None),
        2 => NotificationField::Status(None),
        _ => NotificationField::StartDateOfEffect(None),
    }
}

fn order_part() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Z0-9]{1,6}".prop_map(Some),
    ]
}

fn modal_state() -> impl Strategy<Value = ModalState> {
    let mode = prop_oneof![
        Just(ModalMode::Create),
        Just(ModalMode::Edit),
        Just(ModalMode::React),
    ];
    prop_oneof![
        Just(ModalState::Closed),
        mode.clone().prop_map(ModalState::Editing),
        mode.prop_map(ModalState::Submitting),
    ]
}

proptest! {
    #[test]
    fn prop_delivery_missing_required_field_rejected(
        cleared in proptest::sample::subsequence((0..8usize).collect::<Vec<_>>(), 1..=8)
    ) {
        let mut draft = valid_delivery();
        draft.apply(cleared.into_iter().map(delivery_clearing));
        prop_assert!(!draft.is_submittable());
    }

    #[test]
    fn prop_production_missing_required_field_rejected(
        cleared in proptest::sample::subsequence((0..4usize).collect::<Vec<_>>(), 1..=4)
    ) {
        let mut draft = valid_production();
        draft.apply(cleared.into_iter().map(production_clearing));
        prop_assert!(!draft.is_submittable());
    }

    #[test]
    fn prop_notification_missing_required_field_rejected(
        cleared in proptest::sample::subsequence((0..4usize).collect::<Vec<_>>(), 1..=4)
    ) {
        let mut draft = valid_notification();
        draft.apply(cleared.into_iter().map(notification_clearing));
        prop_assert!(!draft.is_submittable());
    }

    #[test]
    fn prop_order_reference_all_or_nothing(
        customer in order_part(),
        position in order_part(),
        supplier in order_part(),
    ) {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        let count = [&customer, &position, &supplier].into_iter().filter(|v| filled(v)).count();

        let draft = Delivery {
            customer_order_number: customer,
            customer_order_position_number: position,
            supplier_order_number: supplier,
            ..valid_delivery()
        };
        prop_assert_eq!(draft.is_submittable(), count == 0 || count == 3);
    }

    #[test]
    fn prop_transitions_match_table(from in modal_state(), to in modal_state()) {
        let allowed = allowed_transitions(from);
        prop_assert_eq!(validate_transition(from, to).is_ok(), allowed.contains(&to));
    }
}

#[test]
fn order_reference_examples() {
    let with = |c: &str, p: &str, s: &str| Delivery {
        customer_order_number: Some(c.to_string()),
        customer_order_position_number: Some(p.to_string()),
        supplier_order_number: Some(s.to_string()),
        ..valid_delivery()
    };
    assert!(!with("A", "1", "").is_submittable());
    assert!(with("A", "1", "S").is_submittable());
    assert!(valid_delivery().is_submittable());
}

#[test]
fn daily_grouping_keeps_same_day_in_order() {
    let records = vec![
        production_completing(at(2024, 1, 5, 8, 0)),
        production_completing(at(2024, 1, 5, 20, 0)),
        production_completing(at(2024, 1, 6, 1, 0)),
    ];
    let grouped = same_day(&records, Some(at(2024, 1, 5, 12, 0)), Utc::now(), &Utc);
    assert_eq!(grouped, records[..2].to_vec());
}

#[test]
fn effect_window_ordering() {
    let reversed = DemandCapacityNotification {
        start_date_of_effect: Some(at(2024, 2, 1, 0, 0)),
        expected_end_date_of_effect: Some(at(2024, 1, 30, 0, 0)),
        ..valid_notification()
    };
    let report = reversed.validate();
    assert!(report.end_before_start);
    assert!(!report.is_valid());

    let open_ended = DemandCapacityNotification {
        start_date_of_effect: Some(at(2024, 2, 1, 0, 0)),
        expected_end_date_of_effect: None,
        ..valid_notification()
    };
    assert!(open_ended.is_submittable());
}

#[tokio::test]
async fn conflicting_create_posts_conflict_notification() {
    let log: EventLog = Arc::default();
    let mut gateway = MockDeliveryGateway::new();
    let gateway_log = Arc::clone(&log);
    gateway.expect_create().times(1).returning(move |_| {
        gateway_log.lock().push("gateway");
        Err(GatewayError::from_status(409, "Delivery already exists. Use PUT instead."))
    });
    gateway.expect_update().never();

    let mut modal = delivery_modal(gateway, &log);
    modal.open(ModalMode::Create, Some(valid_delivery())).unwrap();
    let outcome = modal.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_conflict()));
    assert_eq!(*log.lock(), vec!["gateway", "on_close"]);
    assert_eq!(modal.notifications().len(), 1);
    let n = modal.notifications().get(0).unwrap();
    assert_eq!(n.severity, Severity::Error);
    assert_eq!(n.title, "Conflict");
}

#[tokio::test]
async fn successful_create_refreshes_once_before_close() {
    let log: EventLog = Arc::default();
    let mut gateway = MockDeliveryGateway::new();
    let gateway_log = Arc::clone(&log);
    gateway.expect_create().times(1).returning(move |_| {
        gateway_log.lock().push("gateway");
        Ok(())
    });

    let mut modal = delivery_modal(gateway, &log);
    modal.open(ModalMode::Create, Some(valid_delivery())).unwrap();
    assert!(modal.submit().await.unwrap().is_saved());

    assert_eq!(*log.lock(), vec!["gateway", "on_save", "on_close"]);
    assert_eq!(modal.state(), ModalState::Closed);
    let n = modal.notifications().get(0).unwrap();
    assert_eq!(n.severity, Severity::Success);
}

#[tokio::test]
async fn server_message_reaches_error_notification() {
    let log: EventLog = Arc::default();
    let mut gateway = MockProductionGateway::new();
    gateway
        .expect_update()
        .times(1)
        .returning(|_| Err(GatewayError::from_status(400, "Production is invalid.")));

    let mut modal = Modal::new(gateway, &FormsConfig::default())
        .with_listener(Arc::new(Recorder(Arc::clone(&log))));
    modal
        .open(ModalMode::Edit, Some(production_completing(at(2024, 1, 5, 8, 0))))
        .unwrap();
    modal.submit().await.unwrap();

    let n = modal.notifications().get(0).unwrap();
    assert_eq!(n.title, "Error requesting update");
    assert_eq!(n.description, "Production is invalid.");
    assert_eq!(*log.lock(), vec!["on_close"]);
}

#[tokio::test]
async fn invalid_submit_sends_nothing() {
    let log: EventLog = Arc::default();
    let mut gateway = MockDeliveryGateway::new();
    gateway.expect_create().never();

    let mut modal = delivery_modal(gateway, &log);
    modal.open(ModalMode::Create, None).unwrap();
    let outcome = modal.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(modal.state().is_open());
    assert!(log.lock().is_empty());
}

#[test]
fn reopening_with_other_target_leaves_no_trace() {
    let log: EventLog = Arc::default();
    let mut modal = delivery_modal(MockDeliveryGateway::new(), &log);

    let first = delivery_departing(at(2024, 1, 5, 8, 0));
    modal.open(ModalMode::Edit, Some(first)).unwrap();
    modal
        .update([
            DeliveryField::TrackingNumber(Some("EDITED".to_string())),
            DeliveryField::Quantity(Some(1.0)),
        ])
        .unwrap();

    let second = Delivery {
        tracking_number: None,
        ..delivery_departing(at(2024, 1, 9, 8, 0))
    };
    modal.open(ModalMode::Edit, Some(second.clone())).unwrap();
    assert_eq!(modal.draft(), &second);

    modal.cancel().unwrap();
    let third = Delivery {
        uuid: second.uuid,
        ..Delivery::default()
    };
    modal.open(ModalMode::Edit, Some(third.clone())).unwrap();
    assert_eq!(modal.draft(), &third);
    assert_eq!(DraftSource::of(Some(modal.draft())), DraftSource::Existing(second.uuid.unwrap()));
}
