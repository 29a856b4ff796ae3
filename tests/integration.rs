//! Integration tests for the CRM facade and services.

use chrono::{Duration, NaiveDate, Utc};
use pipeline_crm::{
    filter_activities, filter_contacts, find_by_id, ActivityDraft, ActivityQuery, ActivityType,
    ContactDraft, ContactPatch, ContactQuery, ContactSort, Crm, CrmConfig, CrmEvent, DealDraft,
    DealPatch, EntityKind, Latency, RecordId, RecordService, Stage, SubscriptionFilter,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn test_crm() -> Crm {
    init_tracing();
    Crm::new(CrmConfig::in_memory()).unwrap()
}

fn close_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

async fn add_contact(crm: &Crm, name: &str, company: &str) -> RecordId {
    crm.add_contact(ContactDraft::new(
        name,
        format!("{}@{}.com", name.to_lowercase(), company.to_lowercase()),
        "555-0100",
        company,
    ))
    .await
    .unwrap()
    .id
}

// --- Realistic Workflow Tests ---

#[tokio::test]
async fn test_deal_through_pipeline_workflow() {
    let crm = test_crm();
    let contact = add_contact(&crm, "Ana", "Acme").await;

    let deal = crm
        .add_deal(
            DealDraft::new("Deal X", 1000.0, contact, close_date())
                .with_stage(Stage::Lead)
                .with_probability(10),
        )
        .await
        .unwrap();

    let listed = crm.deals().get_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].stage, Stage::Lead);

    let moved = crm.move_deal(deal.id, "Qualified").await.unwrap();
    assert_eq!(moved.probability, 30);

    let board = crm.pipeline().await.unwrap();
    let qualified = board.rollup()[1];
    assert_eq!(qualified.stage, Stage::Qualified);
    assert_eq!(qualified.count, 1);
    assert_eq!(qualified.value, 1000.0);
    assert_eq!(board.column(Stage::Lead).count(), 0);
}

#[tokio::test]
async fn test_probability_override_on_stage_change() {
    let crm = test_crm();
    let contact = add_contact(&crm, "Ana", "Acme").await;
    let deal = crm
        .add_deal(DealDraft::new("Deal X", 1000.0, contact, close_date()))
        .await
        .unwrap();

    let edited = crm
        .edit_deal(deal.id, DealPatch::stage(Stage::Qualified).with_probability(45))
        .await
        .unwrap();
    assert_eq!(edited.stage, Stage::Qualified);
    assert_eq!(edited.probability, 45);

    // Same stage again keeps the overridden value.
    let again = crm.move_deal(deal.id, "qualified").await.unwrap();
    assert_eq!(again.probability, 45);
}

#[tokio::test]
async fn test_contact_search_workflow() {
    let crm = test_crm();
    add_contact(&crm, "Bob", "Acme").await;
    add_contact(&crm, "alice", "Acme").await;
    add_contact(&crm, "Carol", "Globex").await;

    let contacts = crm.contacts().get_all().await.unwrap();
    let found = filter_contacts(&contacts, &ContactQuery::new("acme", ContactSort::Company));
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "alice"]);

    let by_name = filter_contacts(&contacts, &ContactQuery::new("", ContactSort::Name));
    let names: Vec<_> = by_name.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "Bob", "Carol"]);
}

#[tokio::test]
async fn test_activity_log_workflow() {
    let crm = test_crm();
    let contact = add_contact(&crm, "Ana", "Acme").await;
    let deal = crm
        .add_deal(DealDraft::new("Deal X", 500.0, contact, close_date()))
        .await
        .unwrap();

    let now = Utc::now();
    let call = crm
        .log_activity(
            ActivityDraft::new(ActivityType::Call, "Kickoff call")
                .for_contact(contact)
                .for_deal(deal.id)
                .at(now + Duration::minutes(5))
                .lasting(90),
        )
        .await
        .unwrap();
    crm.log_activity(
        ActivityDraft::new(ActivityType::Note, "Budget confirmed")
            .for_contact(contact)
            .at(now - Duration::days(2)),
    )
    .await
    .unwrap();

    assert_eq!(call.duration_label().as_deref(), Some("1h 30m"));

    let activities = crm.activities().get_all().await.unwrap();
    assert_eq!(activities[0].id, call.id);

    let calls = filter_activities(&activities, &ActivityQuery::new("").of_type(ActivityType::Call));
    assert_eq!(calls.len(), 1);

    let stamped = crm.contacts().get_by_id(contact).await.unwrap();
    assert_eq!(stamped.last_activity, Some(call.timestamp));

    let deals = crm.deals().get_all().await.unwrap();
    let resolved = find_by_id(&deals, call.deal_id.unwrap()).unwrap();
    assert_eq!(resolved.title, "Deal X");
}

#[tokio::test]
async fn test_dashboard_over_fixtures() {
    init_tracing();
    let mut config = CrmConfig::in_memory();
    config.seed_fixtures = true;
    let crm = Crm::new(config).unwrap();

    let dashboard = crm.dashboard().await.unwrap();
    let snapshot = crm.snapshot().await.unwrap();

    assert_eq!(dashboard.total_contacts, snapshot.contacts.len());
    assert_eq!(dashboard.deals.total_deals, snapshot.deals.len());
    assert_eq!(dashboard.stages.len(), 5);
    assert!(dashboard.upcoming_deals.len() <= 5);
    assert!(dashboard.upcoming_deals.iter().all(|d| d.is_open()));
    assert!(dashboard
        .upcoming_deals
        .windows(2)
        .all(|w| w[0].expected_close <= w[1].expected_close));
    assert!(dashboard
        .recent_activities
        .windows(2)
        .all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(dashboard.activities.total, snapshot.activities.len());
}

#[tokio::test]
async fn test_ids_restart_after_emptying() {
    let crm = test_crm();
    let a = add_contact(&crm, "Ana", "Acme").await;
    let b = add_contact(&crm, "Ben", "Acme").await;
    assert_eq!((a, b), (RecordId(1), RecordId(2)));

    crm.contacts().delete(b).await.unwrap();
    assert_eq!(add_contact(&crm, "Cy", "Acme").await, RecordId(2));

    crm.contacts().delete(RecordId(1)).await.unwrap();
    assert_eq!(add_contact(&crm, "Di", "Acme").await, RecordId(3));

    crm.contacts().delete(RecordId(2)).await.unwrap();
    crm.contacts().delete(RecordId(3)).await.unwrap();
    assert_eq!(add_contact(&crm, "Ed", "Acme").await, RecordId(1));
}

#[tokio::test]
async fn test_returned_records_are_copies() {
    let crm = test_crm();
    let id = add_contact(&crm, "Ana", "Acme").await;

    let mut copy = crm.contacts().get_by_id(id).await.unwrap();
    copy.name = "Mutated".into();

    assert_eq!(crm.contacts().get_by_id(id).await.unwrap().name, "Ana");
}

#[tokio::test]
async fn test_update_ignores_id_in_patch_json() {
    let crm = test_crm();
    let id = add_contact(&crm, "Ana", "Acme").await;

    let patch: ContactPatch = serde_json::from_str(r#"{"Id": 99, "role": "CFO"}"#).unwrap();
    let updated = crm.edit_contact(id, patch).await.unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.role, "CFO");
    assert!(crm.contacts().get_by_id(RecordId(99)).await.is_err());
}

// --- Events ---

#[tokio::test]
async fn test_events_for_deal_lifecycle() {
    let crm = test_crm();
    let contact = add_contact(&crm, "Ana", "Acme").await;
    let handle = crm.subscribe(SubscriptionFilter {
        include_stage_changes: true,
        ..SubscriptionFilter::kinds(vec![EntityKind::Deal])
    });

    let deal = crm
        .add_deal(DealDraft::new("Deal X", 1000.0, contact, close_date()))
        .await
        .unwrap();
    crm.move_deal(deal.id, "Closed Won").await.unwrap();
    crm.deals().delete(deal.id).await.unwrap();

    let events = handle.drain();
    assert_eq!(
        events,
        vec![
            CrmEvent::Created {
                kind: EntityKind::Deal,
                id: deal.id,
                label: "Deal X".into()
            },
            CrmEvent::Updated {
                kind: EntityKind::Deal,
                id: deal.id
            },
            CrmEvent::StageChanged {
                deal: deal.id,
                from: Stage::Lead,
                to: Stage::ClosedWon,
                probability: 100
            },
            CrmEvent::Deleted {
                kind: EntityKind::Deal,
                id: deal.id
            },
        ]
    );
}

#[tokio::test]
async fn test_notification_preferences_filter_stage_changes() {
    init_tracing();
    let mut config = CrmConfig::in_memory();
    config.preferences.notifications.deal_updates = false;
    let crm = Crm::new(config).unwrap();
    let handle = crm.subscribe_notifications();

    let contact = add_contact(&crm, "Ana", "Acme").await;
    let deal = crm
        .add_deal(DealDraft::new("Deal X", 1000.0, contact, close_date()))
        .await
        .unwrap();
    crm.deals().advance(deal.id).await.unwrap();

    let events = handle.drain();
    assert_eq!(events.len(), 3);
    assert!(events
        .iter()
        .all(|e| !matches!(e, CrmEvent::StageChanged { .. })));
}

// --- Concurrency ---

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_unique_ids() {
    use std::collections::HashSet;
    use std::sync::Arc;

    let crm = Arc::new(test_crm());
    let mut tasks = Vec::new();
    for i in 0..40 {
        let crm = Arc::clone(&crm);
        tasks.push(tokio::spawn(async move {
            crm.add_contact(ContactDraft::new(
                format!("C{i}"),
                format!("c{i}@acme.io"),
                "555",
                "Acme",
            ))
            .await
            .unwrap()
            .id
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        assert!(ids.insert(task.await.unwrap()));
    }
    assert_eq!(ids.len(), 40);
    assert_eq!(crm.contacts().len(), 40);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_loads_collections_concurrently() {
    init_tracing();
    let config = CrmConfig::in_memory().with_latency(Latency::fixed(300));
    let crm = Crm::new(config).unwrap();

    let start = tokio::time::Instant::now();
    crm.snapshot().await.unwrap();
    let elapsed = start.elapsed();

    // Three sequential loads would take 900ms.
    assert!(elapsed >= std::time::Duration::from_millis(300));
    assert!(elapsed < std::time::Duration::from_millis(600));
}
