use actix::Actor;
use actix_cors::Cors;
use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, RedisCache},
    middlewares::{authentication, authorization},
    modules::{
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        invitation::{repository_pg::InvitationRepositoryPg, service::InvitationService},
        notification::ws::WsGateway,
        playdate::{repository_pg::PlaydateRepositoryPg, service::PlaydateService},
        user::{repository_pg::UserRepositoryPg, schema::UserRole, service::UserService},
        websocket::{handler::websocket_handler, presence::PresenceService, server::WebSocketServer},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .map_err(|e| std::io::Error::other(format!("Migration error: {e}")))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let user_repo = UserRepositoryPg::new(db_pool.clone());
    let friend_repo = FriendRepositoryPg::new(db_pool.clone());
    let playdate_repo = PlaydateRepositoryPg::new(db_pool.clone());
    let invitation_repo = InvitationRepositoryPg::new(db_pool.clone());

    let ws_server = WebSocketServer::new().start();
    let presence_service = PresenceService::new(redis_pool.pool());
    let gateway = Arc::new(WsGateway::new(ws_server.clone()));

    let user_service = UserService::with_dependencies(
        Arc::new(user_repo.clone()),
        Arc::new(redis_pool.clone()),
    );
    let friend_service = FriendService::with_dependencies(
        Arc::new(friend_repo.clone()),
        Arc::new(user_repo.clone()),
        gateway.clone(),
    );
    let playdate_service = PlaydateService::with_dependencies(
        Arc::new(playdate_repo.clone()),
        gateway.clone(),
        gateway.clone(),
    );
    let invitation_service = InvitationService::with_dependencies(
        Arc::new(invitation_repo),
        Arc::new(playdate_repo),
        Arc::new(user_repo),
        gateway.clone(),
        gateway,
    );

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(playdate_service.clone()))
            .app_data(web::Data::new(invitation_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(ws_server.clone()))
            .app_data(web::Data::new(presence_service.clone()))
            .app_data(web::Data::new(friend_repo.clone()))
            .service(health_check)
            .route("/ws", web::get().to(websocket_handler))
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authorization(vec![UserRole::User, UserRole::Admin])))
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::friend::route::configure)
                        .configure(modules::playdate::route::configure)
                        .configure(modules::invitation::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
