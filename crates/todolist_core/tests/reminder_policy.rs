use chrono::{TimeDelta, TimeZone, Utc};
use todolist_core::{reconcile, Category, ReminderIntent, TodoItem, REMINDER_TITLE};

fn reminding_item(due_offset: TimeDelta) -> (TodoItem, chrono::DateTime<Utc>) {
    let now = Utc.with_ymd_and_hms(2030, 4, 10, 18, 0, 0).unwrap();
    let mut item = TodoItem::new("Pay rent", Category::Personal, now + due_offset);
    item.should_remind = true;
    item.reminder_id = Some("rent-reminder".to_string());
    (item, now)
}

#[test]
fn open_future_item_with_reminder_is_scheduled() {
    let (item, now) = reminding_item(TimeDelta::days(1) + TimeDelta::seconds(42));

    let ReminderIntent::Schedule(request) = reconcile(&item, now) else {
        panic!("expected schedule intent");
    };
    assert_eq!(request.reminder_id, "rent-reminder");
    assert_eq!(request.item_id, item.id);
    assert_eq!(request.title, REMINDER_TITLE);
    assert_eq!(request.body, "Pay rent");
    assert_eq!(request.fire_at, now + TimeDelta::days(1));
}

#[test]
fn completing_the_item_cancels() {
    let (mut item, now) = reminding_item(TimeDelta::days(1));
    item.is_complete = true;

    assert_eq!(
        reconcile(&item, now),
        ReminderIntent::Cancel("rent-reminder".to_string())
    );
}

#[test]
fn disabling_reminders_cancels_recorded_id() {
    let (mut item, now) = reminding_item(TimeDelta::days(1));
    item.should_remind = false;

    assert_eq!(
        reconcile(&item, now),
        ReminderIntent::Cancel("rent-reminder".to_string())
    );
}

#[test]
fn past_due_date_cancels() {
    let (item, now) = reminding_item(-TimeDelta::hours(2));

    assert_eq!(
        reconcile(&item, now),
        ReminderIntent::Cancel("rent-reminder".to_string())
    );
}

#[test]
fn no_recorded_reminder_id_means_nothing_to_do() {
    let (mut item, now) = reminding_item(TimeDelta::days(1));
    item.reminder_id = None;
    assert_eq!(reconcile(&item, now), ReminderIntent::None);

    item.should_remind = false;
    assert_eq!(reconcile(&item, now), ReminderIntent::None);
}
