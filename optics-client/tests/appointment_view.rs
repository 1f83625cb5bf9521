// optics-client/tests/appointment_view.rs
// Appointment view against the in-memory store

use chrono::{Days, Local, NaiveDate};
use optics_client::appointments::view::{DELETED_NOTICE, UPDATED_NOTICE};
use optics_client::appointments::{EditForm, Notice};
use optics_client::{
    AppointmentRecord, AppointmentStatus, AppointmentView, MemoryStore, MutationAction,
    RecordStore, ViewError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn seed() -> Vec<AppointmentRecord> {
    vec![
        AppointmentRecord::new("abc", "2024-06-05T08:00:00")
            .with_name("Jane", "Doe")
            .with_email("a@x.com")
            .with_status(AppointmentStatus::Pending),
        AppointmentRecord::new("def", "2024-06-11T08:00:00")
            .with_name("Jane", "Doe")
            .with_email("b@x.com")
            .with_status(AppointmentStatus::Confirmed),
        AppointmentRecord::new("ghi", "2024-06-10T08:00:00")
            .with_name("Ravi", "Kumar")
            .with_email("ravi@x.com")
            .with_status(AppointmentStatus::Completed),
    ]
}

async fn loaded_view() -> AppointmentView<MemoryStore> {
    let mut view = AppointmentView::new(MemoryStore::new(seed()));
    assert_eq!(view.load().await.unwrap(), 3);
    view
}

fn ids(records: &[AppointmentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[tokio::test]
async fn test_load_and_priority_order() {
    let view = loaded_view().await;
    assert!(view.load_error().is_none());
    assert_eq!(ids(&view.visible_on(today())), vec!["ghi", "def", "abc"]);
}

#[tokio::test]
async fn test_visible_uses_current_local_date() {
    let today = Local::now().date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    let at = |date: NaiveDate, time: &str| format!("{}T{}", date.format("%Y-%m-%d"), time);

    let records = vec![
        AppointmentRecord::new("past", "2000-01-01T09:00:00"),
        AppointmentRecord::new("tomorrow", at(tomorrow, "07:00:00")),
        AppointmentRecord::new("today", at(today, "23:00:00")),
        AppointmentRecord::new("future", "2999-01-01T09:00:00"),
    ];
    let mut view = AppointmentView::new(MemoryStore::new(records));
    view.load().await.unwrap();

    assert_eq!(
        ids(&view.visible()),
        vec!["today", "tomorrow", "past", "future"]
    );
}

#[tokio::test]
async fn test_load_failure_is_blocking() {
    let mut view = loaded_view().await;
    view.store().fail_with("connection reset");

    let err = view.load().await.unwrap_err();
    assert!(err.is_blocking());
    assert_eq!(err.user_message(), "connection reset");
    assert_eq!(view.load_error(), Some(&err));
    assert!(view.records().is_empty());
    assert!(view.visible_on(today()).is_empty());

    view.store().recover();
    view.load().await.unwrap();
    assert!(view.load_error().is_none());
    assert_eq!(view.records().len(), 3);
}

#[tokio::test]
async fn test_filter_setters() {
    let mut view = loaded_view().await;

    view.set_search("jane");
    assert_eq!(ids(&view.visible_on(today())), vec!["def", "abc"]);

    view.set_status("confirmed");
    assert_eq!(ids(&view.visible_on(today())), vec!["def"]);

    view.set_status("cancelled");
    assert!(view.visible_on(today()).is_empty());

    view.reset_filters();
    view.set_date_range("2024-06-06", "2024-06-12");
    assert_eq!(ids(&view.visible_on(today())), vec!["ghi", "def"]);

    view.set_date_range("2024-06-06", "");
    assert_eq!(view.visible_on(today()).len(), 3);
}

#[tokio::test]
async fn test_delete_success_removes_from_cache() {
    let mut view = loaded_view().await;

    view.apply_delete("abc").await.unwrap();

    assert!(view.get("abc").is_none());
    assert_eq!(view.records().len(), 2);
    assert_eq!(view.notice(), Some(&Notice::Success(DELETED_NOTICE.into())));
    assert!(view.store().rows().iter().all(|r| r.id != "abc"));

    view.clear_notice();
    assert!(view.notice().is_none());
}

#[tokio::test]
async fn test_delete_failure_leaves_cache() {
    let mut view = loaded_view().await;
    let before = view.records().to_vec();
    view.store().fail_with("");

    let err = view.apply_delete("abc").await.unwrap_err();

    assert_eq!(
        err,
        ViewError::Mutation {
            action: MutationAction::Delete,
            message: "Failed to delete the appointment.".into(),
        }
    );
    assert!(!err.is_blocking());
    assert_eq!(view.records(), before.as_slice());
    assert_eq!(
        view.notice(),
        Some(&Notice::Error("Failed to delete the appointment.".into()))
    );
}

#[tokio::test]
async fn test_edit_replaces_in_place() {
    let mut view = loaded_view().await;

    let mut form = EditForm::from_record(view.get("def").unwrap());
    form.slot = "15:00".into();
    form.record.status = Some(AppointmentStatus::Completed);
    assert!(form.select_service("Follow-up Consultation"));
    let edited = form.into_record();

    let stored = view.apply_edit(&edited).await.unwrap();

    assert_eq!(stored.appointment_datetime, "2024-06-11T15:00:00");
    assert_eq!(view.get("def"), Some(&stored));
    assert_eq!(view.records().len(), 3);
    assert_eq!(view.records()[1].id, "def");
    assert_eq!(view.notice().map(Notice::message), Some(UPDATED_NOTICE));
}

#[tokio::test]
async fn test_edit_failure_leaves_cache() {
    let mut view = loaded_view().await;
    let before = view.records().to_vec();
    view.store().fail_with("duplicate key value");

    let mut edited = view.get("abc").unwrap().clone();
    edited.first_name = Some("Janet".into());
    let err = view.apply_edit(&edited).await.unwrap_err();

    assert_eq!(err.user_message(), "duplicate key value");
    assert_eq!(view.records(), before.as_slice());
    assert_eq!(view.store().rows(), before);
}

#[tokio::test]
async fn test_edit_unknown_id_does_not_insert() {
    let mut view = loaded_view().await;

    let stranger = AppointmentRecord::new("zzz", "2024-06-12T10:00:00");
    let err = view.apply_edit(&stranger).await.unwrap_err();

    assert!(matches!(err, ViewError::Mutation { action: MutationAction::Update, .. }));
    assert!(view.get("zzz").is_none());
    assert_eq!(view.records().len(), 3);
}

#[tokio::test]
async fn test_store_trait_object() {
    let store: Box<dyn RecordStore> = Box::new(MemoryStore::new(seed()));
    assert_eq!(store.fetch_all().await.unwrap().len(), 3);
    store.delete("ghi").await.unwrap();
    assert_eq!(store.fetch_all().await.unwrap().len(), 2);
}
