use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::routes::render_template;
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_signed_in};
use crate::services::dashboard;

#[get("/")]
pub async fn show_index(
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

    match dashboard::load_dashboard(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &current_user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("dashboard", &data);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
