use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
  pub label: &'static str,
  pub href: &'static str,
  pub icon: &'static str,
  #[serde(skip)]
  pub summary: &'static str,
}

const fn item(
  label: &'static str,
  href: &'static str,
  icon: &'static str,
  summary: &'static str,
) -> NavItem {
  NavItem {
    label,
    href,
    icon,
    summary,
  }
}

pub const ADMIN_NAVIGATION: &[NavItem] = &[
  item(
    "Dashboard",
    "/dashboard",
    "home",
    "Fleet utilisation and revenue at a glance.",
  ),
  item(
    "Cars",
    "/dashboard/cars",
    "car",
    "Add, retire and price vehicles in the fleet.",
  ),
  item(
    "Bookings",
    "/dashboard/bookings",
    "calendar",
    "Every reservation, past and upcoming.",
  ),
  item(
    "Customers",
    "/dashboard/customers",
    "users",
    "Customer accounts and rental history.",
  ),
  item(
    "Employees",
    "/dashboard/employees",
    "id-card",
    "Staff accounts and their roles.",
  ),
  item(
    "Payments",
    "/dashboard/payments",
    "credit-card",
    "Deposits, charges and refunds.",
  ),
  item(
    "Reports",
    "/dashboard/reports",
    "bar-chart",
    "Monthly revenue and occupancy reports.",
  ),
  item(
    "Settings",
    "/dashboard/settings",
    "settings",
    "Branch, pricing and account settings.",
  ),
];

pub const EMPLOYEE_NAVIGATION: &[NavItem] = &[
  item("Dashboard", "/dashboard", "home", "Today's pick-ups and returns."),
  item(
    "Bookings",
    "/dashboard/bookings",
    "calendar",
    "Confirm, extend or close reservations.",
  ),
  item("Cars", "/dashboard/cars", "car", "Vehicle availability and condition."),
  item(
    "Customers",
    "/dashboard/customers",
    "users",
    "Look up customers at the counter.",
  ),
];

/// Strips trailing slashes so `/dashboard/cars/` and `/dashboard/cars` name
/// the same route. The root path stays `/`.
pub fn normalize_path(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() {
    "/"
  } else {
    trimmed
  }
}

pub fn is_active(item: &NavItem, current_path: &str) -> bool {
  item.href == normalize_path(current_path)
}

/// Index of the link matching `current_path`, if any. At most one link
/// matches because hrefs are unique within a navigation set.
pub fn active_index(items: &[NavItem], current_path: &str) -> Option<usize> {
  items.iter().position(|item| is_active(item, current_path))
}
