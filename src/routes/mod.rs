//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_web::HttpResponse;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::Context;

use crate::domain::criteria::QueryCriteria;

pub mod api;
pub mod customers;
pub mod main;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Resolves the signed-in user id, or a `401` for anonymous visitors.
///
/// Page scopes are wrapped in [`crate::middleware::RedirectUnauthorized`],
/// which turns the `401` into a redirect to the sign-in page.
pub fn ensure_signed_in(user: Option<Identity>) -> Result<String, HttpResponse> {
    let Some(user) = user else {
        return Err(HttpResponse::Unauthorized().finish());
    };

    user.id().map_err(|err| {
        log::warn!("Failed to read identity: {err}");
        HttpResponse::Unauthorized().finish()
    })
}

/// `(content, alert class)` pairs rendered by the base template.
pub fn alerts<'a, I>(messages: I) -> Vec<(&'a str, &'static str)>
where
    I: IntoIterator<Item = &'a FlashMessage>,
{
    messages
        .into_iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every page: alerts, current user and navigation.
///
/// The identity here is the plain session id, so this stays local instead of
/// the JWT-based helper in `pushkind_common::routes`.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_user: &str,
    current_page: &str,
    home_url: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages.iter()));
    context.insert("current_user", current_user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

/// Query string carrying the criteria across form posts, without the `?`.
pub fn criteria_query(criteria: &QueryCriteria) -> String {
    serde_html_form::to_string(&criteria.to_params()).unwrap_or_else(|err| {
        log::error!("Failed to encode criteria: {err}");
        String::new()
    })
}

/// Directory page URL preserving the criteria.
pub fn directory_url(criteria: &QueryCriteria) -> String {
    with_query("/customers", &criteria_query(criteria))
}

pub fn customer_url(customer_id: i32, criteria: &QueryCriteria) -> String {
    with_query(&format!("/customers/{customer_id}"), &criteria_query(criteria))
}

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
