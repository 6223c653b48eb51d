use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::criteria::{CriteriaParams, QueryCriteria};
use crate::dto::customers::CustomersResponse;
use crate::repository::DieselRepository;
use crate::routes::ensure_signed_in;
use crate::services::directory;

/// Filtered customer list as JSON. Anonymous callers get `401`.
#[get("/v1/customers")]
pub async fn api_v1_customers(
    params: web::Query<CriteriaParams>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_signed_in(user) {
        return response;
    }

    let criteria = QueryCriteria::from_params(&params);

    match directory::list_customers(repo.get_ref(), &criteria) {
        Ok(customers) => HttpResponse::Ok().json(CustomersResponse {
            total: customers.len(),
            criteria,
            customers,
        }),
        Err(err) => {
            log::error!("Failed to list customers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
