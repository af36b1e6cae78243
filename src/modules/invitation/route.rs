use crate::modules::invitation::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/invitations")
            .service(send_invitation)
            .service(list_invitations)
            .service(accept_invitation)
            .service(decline_invitation)
            .service(cancel_invitation),
    );
}
