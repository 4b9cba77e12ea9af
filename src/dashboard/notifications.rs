use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
  Booking,
  Payment,
  Maintenance,
  System,
  New,
  Pending,
}

impl NotificationCategory {
  pub fn as_str(&self) -> &'static str {
    match self {
      NotificationCategory::Booking => "booking",
      NotificationCategory::Payment => "payment",
      NotificationCategory::Maintenance => "maintenance",
      NotificationCategory::System => "system",
      NotificationCategory::New => "new",
      NotificationCategory::Pending => "pending",
    }
  }
}

/// Display-only notification. Built fresh for every render and never
/// stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub id: u32,
  pub category: NotificationCategory,
  pub message: &'static str,
  pub time_ago: &'static str,
}

impl Notification {
  pub fn category_name(&self) -> &'static str {
    self.category.as_str()
  }
}

const fn notification(
  id: u32,
  category: NotificationCategory,
  message: &'static str,
  time_ago: &'static str,
) -> Notification {
  Notification {
    id,
    category,
    message,
    time_ago,
  }
}

pub fn admin_notifications() -> Vec<Notification> {
  use NotificationCategory::*;
  vec![
    notification(
      1,
      Booking,
      "New booking #1042 for a Toyota Corolla",
      "5 min ago",
    ),
    notification(
      2,
      Payment,
      "Payment received for booking #1038",
      "1 hour ago",
    ),
    notification(
      3,
      Maintenance,
      "BMW X5 is due for its 30,000 km service",
      "3 hours ago",
    ),
    notification(4, System, "Nightly database backup completed", "1 day ago"),
  ]
}

pub fn employee_notifications() -> Vec<Notification> {
  use NotificationCategory::*;
  vec![
    notification(1, New, "New booking request from John Smith", "10 min ago"),
    notification(
      2,
      New,
      "Customer asked about SUV availability this weekend",
      "30 min ago",
    ),
    notification(
      3,
      Pending,
      "Honda Civic returned, inspection pending",
      "2 hours ago",
    ),
    notification(
      4,
      Pending,
      "Booking #1040 awaiting confirmation",
      "4 hours ago",
    ),
  ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationBadge {
  pub new: usize,
  pub pending: usize,
  pub total: usize,
}

impl NotificationBadge {
  pub fn count(notifications: &[Notification]) -> Self {
    notifications.iter().fold(
      Self {
        total: notifications.len(),
        ..Self::default()
      },
      |mut badge, notification| {
        match notification.category {
          NotificationCategory::New => badge.new += 1,
          NotificationCategory::Pending => badge.pending += 1,
          _ => {}
        }
        badge
      },
    )
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn test_employee_badge_splits_new_and_pending() {
    let badge = NotificationBadge::count(&employee_notifications());

    assert_eq!(
      badge,
      NotificationBadge {
        new: 2,
        pending: 2,
        total: 4
      }
    );
  }

  #[test]
  fn test_admin_badge_counts_total_only() {
    let badge = NotificationBadge::count(&admin_notifications());

    assert_eq!(badge.total, 4);
    assert_eq!(badge.new + badge.pending, 0);
  }

  #[test]
  fn test_notification_ids_are_unique() {
    for list in [admin_notifications(), employee_notifications()] {
      let ids: HashSet<_> = list.iter().map(|n| n.id).collect();
      assert_eq!(ids.len(), list.len());
    }
  }

  #[test]
  fn test_category_serializes_lowercase() {
    let json = serde_json::to_value(&employee_notifications()[2]).unwrap();
    assert_eq!(json["category"], "pending");
    assert_eq!(json["timeAgo"], "2 hours ago");
  }
}
