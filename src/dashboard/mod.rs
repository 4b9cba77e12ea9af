pub mod navigation;
pub mod notifications;
pub mod shell;
pub mod view_state;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use askama::Template;
use serde::Deserialize;
use shell::{PageContent, Shell, ShellContext, ShellView, UserMenu};
use view_state::{SidebarState, Theme};

use crate::auth::token::AccessTokenClaims;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
  pub sidebar: Option<String>,
  pub theme: Option<String>,
  pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShellQuery {
  pub path: Option<String>,
  #[serde(flatten)]
  pub view: DashboardQuery,
}

/// Builds the shell for the caller's role around the page at `path`.
/// Routes outside the shell's navigation get the not-found content.
fn shell_view(
  claims: &AccessTokenClaims,
  path: &str,
  query: &DashboardQuery,
) -> (StatusCode, ShellView) {
  let shell = Shell::for_role(claims.role);
  let (status, page) = match shell.page(path) {
    Some(page) => (StatusCode::OK, page),
    None => (StatusCode::NOT_FOUND, PageContent::not_found(path)),
  };
  let context = ShellContext {
    current_path: path.to_string(),
    sidebar: SidebarState::parse(query.sidebar.as_deref()),
    theme: Theme::parse(query.theme.as_deref()),
    search: query.q.clone().unwrap_or_default(),
    user: UserMenu::from(claims),
  };
  (status, ShellView::build(shell, context, page))
}

pub async fn render_dashboard(
  request: HttpRequest,
  claims: web::ReqData<AccessTokenClaims>,
  query: web::Query<DashboardQuery>,
) -> impl Responder {
  let (status, view) = shell_view(&claims, request.path(), &query);
  if status == StatusCode::NOT_FOUND {
    tracing::debug!(
      path = request.path(),
      shell = ?view.shell,
      "no page for route"
    );
  }

  match view.render() {
    Ok(html) => HttpResponse::build(status)
      .content_type("text/html; charset=utf-8")
      .body(html),
    Err(error) => {
      tracing::error!(%error, "failed to render dashboard");
      HttpResponse::InternalServerError().finish()
    }
  }
}

/// The same view model as `render_dashboard`, as JSON for client-side
/// rendering. `path` defaults to the dashboard home.
pub async fn describe_shell(
  claims: web::ReqData<AccessTokenClaims>,
  query: web::Query<ShellQuery>,
) -> impl Responder {
  let query = query.into_inner();
  let path = query.path.as_deref().unwrap_or("/dashboard");
  let (status, view) = shell_view(&claims, path, &query.view);
  HttpResponse::build(status).json(view)
}

#[cfg(test)]
mod tests {
  use actix_web::{test, App};

  use super::*;
  use crate::helpers::tests::{app_state, bearer, seeded_user};
  use crate::shared::role::Role;

  async fn body_string(response: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[actix_web::test]
  async fn test_admin_gets_admin_shell() {
    let state = app_state();
    let admin =
      seeded_user(&state, "boss@example.com", "correct-horse", Role::Admin)
        .await;
    let app = test::init_service(
      App::new().configure(|cfg| crate::configure(cfg, state.clone())),
    )
    .await;

    let request = test::TestRequest::get()
      .uri("/dashboard/employees")
      .insert_header(bearer(&state, &admin))
      .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("dashboard-admin"));
    assert!(html.contains("<h1>Employees</h1>"));
    assert!(html.contains("Administrator user"));
  }

  #[actix_web::test]
  async fn test_employee_gets_employee_shell_with_split_badge() {
    let state = app_state();
    let employee =
      seeded_user(&state, "desk@example.com", "correct-horse", Role::Employee)
        .await;
    let app = test::init_service(
      App::new().configure(|cfg| crate::configure(cfg, state.clone())),
    )
    .await;

    let request = test::TestRequest::get()
      .uri("/dashboard?sidebar=collapsed")
      .insert_header(bearer(&state, &employee))
      .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("dashboard-employee"));
    assert!(html.contains("badge-new"));
    assert!(html.contains("badge-pending"));
    assert!(html.contains(r#"data-sidebar="collapsed""#));
    assert!(!html.contains("/dashboard/employees"));
  }

  #[actix_web::test]
  async fn test_employee_cannot_reach_admin_pages() {
    let state = app_state();
    let employee =
      seeded_user(&state, "desk@example.com", "correct-horse", Role::Employee)
        .await;
    let app = test::init_service(
      App::new().configure(|cfg| crate::configure(cfg, state.clone())),
    )
    .await;

    let request = test::TestRequest::get()
      .uri("/dashboard/reports")
      .insert_header(bearer(&state, &employee))
      .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("Page not found"));
    assert!(html.contains("dashboard-employee"));
  }

  #[actix_web::test]
  async fn test_dashboard_requires_token() {
    let state = app_state();
    let app = test::init_service(
      App::new().configure(|cfg| crate::configure(cfg, state.clone())),
    )
    .await;

    let request = test::TestRequest::get().uri("/dashboard").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn test_describe_shell_as_json() {
    let state = app_state();
    let admin =
      seeded_user(&state, "boss@example.com", "correct-horse", Role::Admin)
        .await;
    let app = test::init_service(
      App::new().configure(|cfg| crate::configure(cfg, state.clone())),
    )
    .await;

    let request = test::TestRequest::get()
      .uri("/v1/dashboard/shell?path=/dashboard/cars&theme=dark")
      .insert_header(bearer(&state, &admin))
      .to_request();
    let body: serde_json::Value =
      test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["shell"], "admin");
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["sidebarWidthPx"], 256);
    assert_eq!(body["page"]["title"], "Cars");
    let active: Vec<_> = body["nav"]
      .as_array()
      .unwrap()
      .iter()
      .filter(|link| link["active"] == true)
      .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["href"], "/dashboard/cars");
  }
}
