use chrono::{TimeDelta, TimeZone, Utc};
use todolist_core::{
    Category, DueUrgency, NoopNotifier, NotifierError, ReminderNotifier, ReminderRequest,
    TodoDraft, TodoItem,
};
use uuid::Uuid;

struct GrantingNotifier;

impl ReminderNotifier for GrantingNotifier {
    fn request_permission(&self) -> bool {
        true
    }

    fn schedule(&self, _request: &ReminderRequest) -> Result<(), NotifierError> {
        Ok(())
    }

    fn cancel(&self, _reminder_id: &str) -> Result<(), NotifierError> {
        Ok(())
    }
}

#[test]
fn new_item_sets_defaults() {
    let due = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let item = TodoItem::new("Buy milk", Category::Work, due);

    assert!(!item.id.is_nil());
    assert_eq!(item.title, "Buy milk");
    assert!(!item.is_complete);
    assert_eq!(item.category, Category::Work);
    assert_eq!(item.notes, None);
    assert!(!item.should_remind);
    assert_eq!(item.reminder_id, None);
}

#[test]
fn completed_item_displays_as_completed_regardless_of_stored_category() {
    let due = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let mut item = TodoItem::new("Ship release", Category::Work, due);
    item.is_complete = true;
    assert_eq!(item.tag_category(), Category::Completed);
    assert_eq!(item.category, Category::Work);

    let personal = TodoItem::new("Call mom", Category::Personal, due);
    assert_eq!(personal.tag_category(), Category::Personal);
}

#[test]
fn equality_is_by_id_only() {
    let due = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let a = TodoItem::with_id(id, "first title", Category::Work, due);
    let b = TodoItem::with_id(id, "renamed", Category::Personal, due + TimeDelta::days(1));
    let c = TodoItem::new("first title", Category::Work, due);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn due_urgency_classifies_open_items() {
    let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let overdue = TodoItem::new("late", Category::Work, now - TimeDelta::minutes(1));
    let soon = TodoItem::new("soon", Category::Work, now + TimeDelta::hours(3));
    let later = TodoItem::new("later", Category::Work, now + TimeDelta::days(3));
    let mut done = TodoItem::new("done", Category::Work, now - TimeDelta::days(1));
    done.is_complete = true;

    assert_eq!(overdue.due_urgency(now), DueUrgency::Overdue);
    assert_eq!(soon.due_urgency(now), DueUrgency::DueSoon);
    assert_eq!(later.due_urgency(now), DueUrgency::None);
    assert_eq!(done.due_urgency(now), DueUrgency::None);
}

#[test]
fn new_entry_draft_defaults_to_personal_due_tomorrow() {
    let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let draft = TodoDraft::new_entry(now);

    assert_eq!(draft.id, None);
    assert_eq!(draft.category, Category::Personal);
    assert_eq!(draft.due_date, now + TimeDelta::hours(24));
    assert!(!draft.should_remind);
    assert!(!draft.can_save());
}

#[test]
fn draft_mints_reminder_id_only_when_reminders_are_on() {
    let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();

    let mut quiet = TodoDraft::new_entry(now);
    quiet.title = "No reminder".to_string();
    let quiet = quiet.into_item();
    assert_eq!(quiet.reminder_id, None);

    let mut loud = TodoDraft::new_entry(now);
    loud.title = "Remind me".to_string();
    assert!(loud.enable_reminder(&GrantingNotifier));
    let loud = loud.into_item();
    assert!(loud.should_remind);
    assert!(loud.reminder_id.is_some());
}

#[test]
fn denied_permission_leaves_reminders_off() {
    let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let mut draft = TodoDraft::new_entry(now);

    assert!(!draft.enable_reminder(&NoopNotifier));
    assert!(!draft.should_remind);
}

#[test]
fn reenabling_reminders_reuses_the_recorded_reminder_id() {
    let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let mut draft = TodoDraft::new_entry(now);
    draft.title = "Dentist".to_string();
    draft.enable_reminder(&GrantingNotifier);
    let item = draft.into_item();
    let original_id = item.reminder_id.clone().unwrap();

    let mut edit = TodoDraft::from_item(&item);
    edit.disable_reminder();
    let disabled = edit.into_item();
    assert!(!disabled.should_remind);
    assert_eq!(disabled.reminder_id.as_deref(), Some(original_id.as_str()));

    let mut edit = TodoDraft::from_item(&disabled);
    edit.enable_reminder(&GrantingNotifier);
    let reenabled = edit.into_item();
    assert_eq!(reenabled.reminder_id.as_deref(), Some(original_id.as_str()));
    assert_eq!(reenabled.id, item.id);
}

#[test]
fn draft_from_completed_category_saves_as_personal() {
    let due = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
    let mut item = TodoItem::new("legacy", Category::Work, due);
    item.category = Category::Completed;

    let saved = TodoDraft::from_item(&item).into_item();
    assert_eq!(saved.category, Category::Personal);
}
