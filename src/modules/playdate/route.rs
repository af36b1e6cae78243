use crate::modules::playdate::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/playdates")
            .service(create_playdate)
            .service(list_playdates)
            .service(join_playdate)
            .service(leave_playdate)
            .service(get_playdate)
            .service(update_playdate)
            .service(cancel_playdate),
    );
}
