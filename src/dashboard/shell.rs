use askama::Template;
use serde::Serialize;
use url::form_urlencoded;

use super::navigation::{
  active_index, normalize_path, NavItem, ADMIN_NAVIGATION, EMPLOYEE_NAVIGATION,
};
use super::notifications::{
  admin_notifications, employee_notifications, Notification, NotificationBadge,
};
use super::view_state::{SidebarState, Theme};
use crate::auth::token::AccessTokenClaims;
use crate::shared::role::Role;

pub const LOGOUT_HREF: &str = "/login?logout=1";
pub const PROFILE_HREF: &str = "/dashboard/profile";
const SETTINGS_HREF: &str = "/dashboard/settings";

/// Which dashboard layout wraps the page. Chosen from the signed-in role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
  Admin,
  Employee,
}

impl Shell {
  pub fn for_role(role: Role) -> Self {
    match role {
      Role::Admin => Shell::Admin,
      Role::Employee => Shell::Employee,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Shell::Admin => "admin",
      Shell::Employee => "employee",
    }
  }

  pub fn brand(self) -> &'static str {
    match self {
      Shell::Admin => "RentDesk Admin",
      Shell::Employee => "RentDesk Staff",
    }
  }

  pub fn navigation(self) -> &'static [NavItem] {
    match self {
      Shell::Admin => ADMIN_NAVIGATION,
      Shell::Employee => EMPLOYEE_NAVIGATION,
    }
  }

  pub fn notifications(self) -> Vec<Notification> {
    match self {
      Shell::Admin => admin_notifications(),
      Shell::Employee => employee_notifications(),
    }
  }

  /// The employee header shows separate "new" and "pending" counts.
  pub fn splits_badge(self) -> bool {
    matches!(self, Shell::Employee)
  }

  /// Page content for a route reachable from this shell's navigation or
  /// its user menu.
  pub fn page(self, path: &str) -> Option<PageContent> {
    if normalize_path(path) == PROFILE_HREF {
      return Some(PageContent {
        title: "Profile".to_string(),
        body: "Your account details and password.".to_string(),
      });
    }
    let navigation = self.navigation();
    active_index(navigation, path).map(|index| PageContent {
      title: navigation[index].label.to_string(),
      body: navigation[index].summary.to_string(),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
  pub title: String,
  pub body: String,
}

impl PageContent {
  pub fn not_found(path: &str) -> Self {
    Self {
      title: "Page not found".to_string(),
      body: format!("Nothing lives at {}.", normalize_path(path)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMenu {
  pub name: String,
  pub role_label: &'static str,
  pub initials: String,
}

impl From<&AccessTokenClaims> for UserMenu {
  fn from(claims: &AccessTokenClaims) -> Self {
    let initials = claims
      .sub
      .split_whitespace()
      .filter_map(|word| word.chars().next())
      .take(2)
      .flat_map(char::to_uppercase)
      .collect();
    Self {
      name: claims.sub.clone(),
      role_label: claims.role.label(),
      initials,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLinkView {
  pub label: &'static str,
  pub href: &'static str,
  pub url: String,
  pub icon: &'static str,
  pub active: bool,
}

/// Per-request inputs of a shell render.
#[derive(Debug, Clone)]
pub struct ShellContext {
  pub current_path: String,
  pub sidebar: SidebarState,
  pub theme: Theme,
  pub search: String,
  pub user: UserMenu,
}

#[derive(Debug, Clone, Serialize, Template)]
#[template(path = "dashboard.html")]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
  pub shell: Shell,
  pub brand: &'static str,
  pub current_path: String,
  pub home_url: String,
  pub nav: Vec<NavLinkView>,
  pub sidebar: SidebarState,
  pub sidebar_collapsed: bool,
  pub sidebar_width_class: &'static str,
  pub sidebar_width_px: u16,
  pub sidebar_toggle_href: String,
  pub theme: Theme,
  pub theme_toggle_href: String,
  pub search: String,
  pub notifications: Vec<Notification>,
  pub badge: NotificationBadge,
  pub split_badge: bool,
  pub user: UserMenu,
  pub profile_url: String,
  pub has_settings: bool,
  pub settings_url: String,
  pub logout_href: &'static str,
  pub page: PageContent,
}

/// Query string carrying the view state. `search` is only kept on links
/// that stay on the current page.
fn state_query(sidebar: SidebarState, theme: Theme, search: &str) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());
  query
    .append_pair("sidebar", sidebar.as_str())
    .append_pair("theme", theme.as_str());
  if !search.is_empty() {
    query.append_pair("q", search);
  }
  format!("?{}", query.finish())
}

impl ShellView {
  pub fn build(shell: Shell, context: ShellContext, page: PageContent) -> Self {
    let ShellContext {
      current_path,
      sidebar,
      theme,
      search,
      user,
    } = context;
    let current_path = normalize_path(&current_path).to_string();
    let active = active_index(shell.navigation(), &current_path);
    let link_query = state_query(sidebar, theme, "");
    let sidebar_toggle_href = format!(
      "{}{}",
      current_path,
      state_query(sidebar.toggle(), theme, &search)
    );
    let theme_toggle_href = format!(
      "{}{}",
      current_path,
      state_query(sidebar, theme.toggle(), &search)
    );

    let nav = shell
      .navigation()
      .iter()
      .enumerate()
      .map(|(index, item)| NavLinkView {
        label: item.label,
        href: item.href,
        url: format!("{}{}", item.href, link_query),
        icon: item.icon,
        active: active == Some(index),
      })
      .collect();

    let notifications = shell.notifications();
    let badge = NotificationBadge::count(&notifications);
    let has_settings = shell
      .navigation()
      .iter()
      .any(|item| item.href == SETTINGS_HREF);

    Self {
      shell,
      brand: shell.brand(),
      home_url: format!("{}{}", shell.navigation()[0].href, link_query),
      profile_url: format!("{}{}", PROFILE_HREF, link_query),
      has_settings,
      settings_url: format!("{}{}", SETTINGS_HREF, link_query),
      sidebar_toggle_href,
      theme_toggle_href,
      current_path,
      nav,
      sidebar,
      sidebar_collapsed: sidebar == SidebarState::Collapsed,
      sidebar_width_class: sidebar.width_class(),
      sidebar_width_px: sidebar.width_px(),
      theme,
      search,
      notifications,
      badge,
      split_badge: shell.splits_badge(),
      user,
      logout_href: LOGOUT_HREF,
      page,
    }
  }

  pub fn active_link(&self) -> Option<&NavLinkView> {
    self.nav.iter().find(|link| link.active)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::auth::token::TokenType;

  fn claims(role: Role, name: &str) -> AccessTokenClaims {
    AccessTokenClaims {
      uuid: "u-1".to_string(),
      role,
      sub: name.to_string(),
      typ: TokenType::Access,
      iat: 0,
      exp: 0,
    }
  }

  fn context(path: &str, sidebar: SidebarState) -> ShellContext {
    ShellContext {
      current_path: path.to_string(),
      sidebar,
      theme: Theme::Light,
      search: String::new(),
      user: UserMenu::from(&claims(Role::Admin, "Ada Lovelace")),
    }
  }

  fn view(shell: Shell, path: &str, sidebar: SidebarState) -> ShellView {
    let page =
      shell.page(path).unwrap_or_else(|| PageContent::not_found(path));
    ShellView::build(shell, context(path, sidebar), page)
  }

  #[test]
  fn test_shell_follows_role() {
    assert_eq!(Shell::for_role(Role::Admin), Shell::Admin);
    assert_eq!(Shell::for_role(Role::Employee), Shell::Employee);
  }

  #[test]
  fn test_sidebar_toggle_does_not_move_active_link() {
    for shell in [Shell::Admin, Shell::Employee] {
      for item in shell.navigation() {
        let expanded = view(shell, item.href, SidebarState::Expanded);
        let collapsed = view(shell, item.href, SidebarState::Collapsed);

        assert_eq!(expanded.active_link().map(|l| l.href), Some(item.href));
        assert_eq!(collapsed.active_link().map(|l| l.href), Some(item.href));
        assert_ne!(expanded.sidebar_width_px, collapsed.sidebar_width_px);
      }
    }
  }

  #[test]
  fn test_toggle_href_flips_only_sidebar() {
    let view = view(Shell::Admin, "/dashboard/cars/", SidebarState::Expanded);

    assert_eq!(view.current_path, "/dashboard/cars");
    assert_eq!(
      view.sidebar_toggle_href,
      "/dashboard/cars?sidebar=collapsed&theme=light"
    );
    assert_eq!(
      view.theme_toggle_href,
      "/dashboard/cars?sidebar=expanded&theme=dark"
    );
    assert_eq!(
      view.nav[2].url,
      "/dashboard/bookings?sidebar=expanded&theme=light"
    );
  }

  #[test]
  fn test_toggle_hrefs_keep_search() {
    let mut context = context("/dashboard/cars", SidebarState::Expanded);
    context.search = "sedan & suv".to_string();
    let page = Shell::Admin.page("/dashboard/cars").unwrap();

    let view = ShellView::build(Shell::Admin, context, page);

    assert_eq!(
      view.sidebar_toggle_href,
      "/dashboard/cars?sidebar=collapsed&theme=light&q=sedan+%26+suv"
    );
    assert_eq!(
      view.theme_toggle_href,
      "/dashboard/cars?sidebar=expanded&theme=dark&q=sedan+%26+suv"
    );
    assert!(view.nav.iter().all(|link| !link.url.contains("q=")));
  }

  #[test]
  fn test_unknown_route_has_no_active_link() {
    let view =
      view(Shell::Employee, "/dashboard/reports", SidebarState::Expanded);

    assert!(view.active_link().is_none());
    assert_eq!(view.page.title, "Page not found");
  }

  #[test]
  fn test_employee_view_splits_badge() {
    let employee = view(Shell::Employee, "/dashboard", SidebarState::Expanded);
    let admin = view(Shell::Admin, "/dashboard", SidebarState::Expanded);

    assert!(employee.split_badge);
    assert_eq!((employee.badge.new, employee.badge.pending), (2, 2));
    assert!(!admin.split_badge);
    assert_eq!(admin.badge.total, admin.notifications.len());
  }

  #[test]
  fn test_user_menu_initials() {
    let menu = UserMenu::from(&claims(Role::Employee, "grace brewster hopper"));

    assert_eq!(menu.initials, "GB");
    assert_eq!(menu.role_label, "Employee");
  }

  #[test]
  fn test_render_escapes_search_and_marks_active_link() {
    let mut context = context("/dashboard/bookings", SidebarState::Collapsed);
    context.search = "<script>".to_string();
    let page = Shell::Admin.page("/dashboard/bookings").unwrap();

    let html = ShellView::build(Shell::Admin, context, page).render().unwrap();

    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains(r#"data-sidebar="collapsed""#));
    assert!(html.contains(r#"class="w-20"#));
    assert!(html.contains(r#"aria-current="page">"#));
    assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
  }
}
