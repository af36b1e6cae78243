use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        invitation::{
            model::{InvitationBody, InvitationResponse},
            repository_pg::InvitationRepositoryPg,
            schema::PlaydateInvitationEntity,
            service::InvitationService,
        },
        playdate::repository_pg::PlaydateRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type InvitationSvc =
    InvitationService<InvitationRepositoryPg, PlaydateRepositoryPg, UserRepositoryPg>;

#[post("/")]
pub async fn send_invitation(
    invitation_service: web::Data<InvitationSvc>,
    body: ValidatedJson<InvitationBody>,
    req: HttpRequest,
) -> Result<success::Success<PlaydateInvitationEntity>, error::Error> {
    let sender_id = get_claims(&req).ok().map(|c| c.sub);
    let invitation = invitation_service
        .send_invitation(sender_id, body.0.playdate_id, body.0.recipient_id, body.0.message)
        .await?;

    Ok(success::Success::created(Some(invitation)).message("Invitation sent successfully"))
}

#[get("/")]
pub async fn list_invitations(
    invitation_service: web::Data<InvitationSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<InvitationResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let invitations = invitation_service.get_invitations(user_id).await?;

    Ok(success::Success::ok(Some(invitations)).message("Invitations retrieved successfully"))
}

#[post("/{invitation_id}/accept")]
pub async fn accept_invitation(
    invitation_service: web::Data<InvitationSvc>,
    invitation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<PlaydateInvitationEntity>, error::Error> {
    let recipient_id = get_claims(&req)?.sub;
    let invitation =
        invitation_service.respond_to_invitation(recipient_id, *invitation_id, true).await?;

    Ok(success::Success::ok(Some(invitation)).message("Invitation accepted successfully"))
}

#[post("/{invitation_id}/decline")]
pub async fn decline_invitation(
    invitation_service: web::Data<InvitationSvc>,
    invitation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<PlaydateInvitationEntity>, error::Error> {
    let recipient_id = get_claims(&req)?.sub;
    let invitation =
        invitation_service.respond_to_invitation(recipient_id, *invitation_id, false).await?;

    Ok(success::Success::ok(Some(invitation)).message("Invitation declined successfully"))
}

#[delete("/{invitation_id}")]
pub async fn cancel_invitation(
    invitation_service: web::Data<InvitationSvc>,
    invitation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    invitation_service.cancel_invitation(sender_id, *invitation_id).await?;
    Ok(success::Success::no_content())
}
