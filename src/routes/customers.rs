//! Directory pages: list with filters, add, details, edit and delete.
//!
//! Every handler builds a [`DirectoryController`] for the criteria in the
//! query string. Mutations that land on the list render it straight from the
//! controller, so the page shows the reconciled records together with the
//! outcome of the operation. Everything else redirects and hands the
//! collected notifications to the flash framework.

use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::controller::{DirectoryController, FlashNotifier};
use crate::domain::criteria::{CriteriaChange, CriteriaParams, QueryCriteria};
use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::dto::customers::FilterOption;
use crate::forms::customers::{AddCustomerForm, DeleteCustomerForm, SaveCustomerForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    alerts, base_context, criteria_query, customer_url, directory_url, ensure_signed_in,
};

type Controller = DirectoryController<DieselRepository, FlashNotifier>;

fn controller(repo: web::Data<DieselRepository>, criteria: QueryCriteria) -> Controller {
    DirectoryController::with_criteria(repo.into_inner(), FlashNotifier::default(), criteria)
}

/// Controller whose list has been loaded for `criteria`.
async fn loaded_controller(
    repo: web::Data<DieselRepository>,
    criteria: QueryCriteria,
) -> Controller {
    let directory = DirectoryController::new(repo.into_inner(), FlashNotifier::default());
    directory.set_criteria(CriteriaChange::Replace(criteria));
    directory.settle().await;
    directory
}

/// Flushes the controller's notifications and redirects to `location`.
fn redirect_with_flash(directory: &Controller, location: &str) -> HttpResponse {
    directory.notifier().flush();
    redirect(location)
}

/// Renders the list page from the controller state.
fn render_directory(
    directory: &Controller,
    flash_messages: &IncomingFlashMessages,
    current_user: &str,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let view = directory.snapshot();
    let pending = directory.notifier().take();

    let mut context = base_context(
        flash_messages,
        current_user,
        "customers",
        &server_config.auth_service_url,
    );
    context.insert("alerts", &alerts(flash_messages.iter().chain(pending.iter())));
    context.insert("sort_options", &FilterOption::sort_options(&view.criteria));
    context.insert("status_options", &FilterOption::status_options(&view.criteria));
    context.insert("query", &criteria_query(&view.criteria));
    context.insert("directory", &view);

    render_template(tera, "customers/index.html", &context)
}

#[get("/customers")]
pub async fn show_customers(
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let current_user = match ensure_signed_in(user) {
        Ok(current_user) => current_user,
        Err(response) => return response,
    };

    let directory = loaded_controller(repo, QueryCriteria::from_params(&params)).await;

    render_directory(
        &directory,
        &flash_messages,
        &current_user,
        &server_config,
        &tera,
    )
}

#[post("/customers/add")]
pub async fn add_customer(
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddCustomerForm>,
) -> impl Responder {
    let current_user = match ensure_signed_in(user) {
        Ok(current_user) => current_user,
        Err(response) => return response,
    };

    let criteria = QueryCriteria::from_params(&params);

    let new_customer = match NewCustomer::try_from(form) {
        Ok(new_customer) => new_customer,
        Err(err) => {
            log::warn!("Rejected customer form: {err}");
            FlashMessage::error(format!("Failed to add customer: {err}")).send();
            return redirect(&directory_url(&criteria));
        }
    };

    let directory = loaded_controller(repo, criteria).await;
    if let Err(err) = directory.add_customer(new_customer).await {
        log::debug!("Add customer reported to the user: {err}");
    }

    render_directory(
        &directory,
        &flash_messages,
        &current_user,
        &server_config,
        &tera,
    )
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let current_user = match ensure_signed_in(user) {
        Ok(current_user) => current_user,
        Err(response) => return response,
    };

    let criteria = QueryCriteria::from_params(&params);
    let back = directory_url(&criteria);

    let Ok(customer_id) = CustomerId::new(customer_id.into_inner()) else {
        FlashMessage::error("Failed to load customer").send();
        return redirect(&back);
    };

    let query = criteria_query(&criteria);
    let directory = controller(repo, criteria);
    let customer = match directory.customer(customer_id).await {
        Ok(customer) => customer,
        Err(_) => return redirect_with_flash(&directory, &back),
    };

    let mut context = base_context(
        &flash_messages,
        &current_user,
        "customers",
        &server_config.auth_service_url,
    );
    context.insert("customer", &customer);
    context.insert("query", &query);
    context.insert("back_url", &back);

    render_template(&tera, "customers/details.html", &context)
}

#[post("/customers/{customer_id}/update")]
pub async fn update_customer(
    customer_id: web::Path<i32>,
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SaveCustomerForm>,
) -> impl Responder {
    let current_user = match ensure_signed_in(user) {
        Ok(current_user) => current_user,
        Err(response) => return response,
    };

    let criteria = QueryCriteria::from_params(&params);
    let raw_id = customer_id.into_inner();
    let details = customer_url(raw_id, &criteria);

    let Ok(customer_id) = CustomerId::new(raw_id) else {
        FlashMessage::error("Failed to update customer").send();
        return redirect(&directory_url(&criteria));
    };

    let updates = match UpdateCustomer::try_from(form) {
        Ok(updates) => updates,
        Err(err) => {
            log::warn!("Rejected customer update form: {err}");
            FlashMessage::error(format!("Failed to update customer: {err}")).send();
            return redirect(&details);
        }
    };

    let directory = controller(repo, criteria);
    match directory.update_customer(customer_id, updates).await {
        Ok(()) => render_directory(
            &directory,
            &flash_messages,
            &current_user,
            &server_config,
            &tera,
        ),
        Err(_) => redirect_with_flash(&directory, &details),
    }
}

#[post("/customers/{customer_id}/delete")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<DeleteCustomerForm>,
) -> impl Responder {
    let current_user = match ensure_signed_in(user) {
        Ok(current_user) => current_user,
        Err(response) => return response,
    };

    let criteria = QueryCriteria::from_params(&params);
    let raw_id = customer_id.into_inner();
    let back = directory_url(&criteria);
    let details = customer_url(raw_id, &criteria);

    let Ok(customer_id) = CustomerId::new(raw_id) else {
        FlashMessage::error("Failed to delete customer").send();
        return redirect(&back);
    };

    let directory = controller(repo, criteria);
    match directory.remove_customer(customer_id, &form).await {
        Ok(true) => render_directory(
            &directory,
            &flash_messages,
            &current_user,
            &server_config,
            &tera,
        ),
        Ok(false) => redirect(&details),
        Err(_) => redirect_with_flash(&directory, &back),
    }
}
