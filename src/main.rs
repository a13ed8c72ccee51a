use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use myblog::db::establish_connection_pool;
use myblog::email::{EmailQueue, LogMailer, SmtpMailer};
use myblog::models::config::ServerConfig;
use myblog::repository::DieselRepository;
use myblog::routes::api::api_v1_blog;
use myblog::routes::contact::submit_contact_form;
use myblog::routes::pages::show_page;
use myblog::routes::sitemap::show_sitemap;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new(&format!("{}/**/*", server_config.templates_dir)) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &server_config.secret_key {
        Some(secret) => match Key::try_from(secret.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                log::error!("Invalid secret key: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("No secret key configured, flash messages will not survive a restart");
            Key::generate()
        }
    };

    let capacity = server_config.email.queue_capacity;
    let email_queue = match &server_config.email.smtp_host {
        Some(host) => match SmtpMailer::new(host, &server_config.email) {
            Ok(mailer) => EmailQueue::start(mailer, capacity),
            Err(e) => {
                log::error!("Failed to configure SMTP transport: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No SMTP host configured, emails will be logged");
            EmailQueue::start(LogMailer, capacity)
        }
    };

    let bind_address = (server_config.bind_address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        App::new()
            .wrap(message_framework)
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(email_queue.clone()))
            .service(api_v1_blog)
            .service(show_sitemap)
            .service(Files::new("/assets", &server_config.static_dir))
            .service(submit_contact_form)
            .service(show_page)
    })
    .bind(bind_address)?
    .run()
    .await
}
