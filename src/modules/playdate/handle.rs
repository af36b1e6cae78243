use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::playdate::{
        model::{CreatePlaydateModel, PlaydateDetail, UpdatePlaydateModel},
        repository_pg::PlaydateRepositoryPg,
        schema::PlaydateEntity,
        service::PlaydateService,
    },
    utils::ValidatedJson,
};

pub type PlaydateSvc = PlaydateService<PlaydateRepositoryPg>;

#[post("/")]
pub async fn create_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    body: ValidatedJson<CreatePlaydateModel>,
    req: HttpRequest,
) -> Result<success::Success<PlaydateDetail>, error::Error> {
    let host_id = get_claims(&req)?.sub;
    let playdate = playdate_service.create_playdate(host_id, body.0).await?;

    Ok(success::Success::created(Some(playdate)).message("Playdate created successfully"))
}

#[get("/")]
pub async fn list_playdates(
    playdate_service: web::Data<PlaydateSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PlaydateEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let playdates = playdate_service.get_playdates_for_user(user_id).await?;

    Ok(success::Success::ok(Some(playdates)).message("Playdates retrieved successfully"))
}

#[get("/{playdate_id}")]
pub async fn get_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    playdate_id: web::Path<Uuid>,
) -> Result<success::Success<PlaydateDetail>, error::Error> {
    let playdate = playdate_service.get_playdate(*playdate_id).await?;

    Ok(success::Success::ok(Some(playdate)).message("Playdate retrieved successfully"))
}

#[patch("/{playdate_id}")]
pub async fn update_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    playdate_id: web::Path<Uuid>,
    body: ValidatedJson<UpdatePlaydateModel>,
    req: HttpRequest,
) -> Result<success::Success<PlaydateEntity>, error::Error> {
    let host_id = get_claims(&req)?.sub;
    let playdate = playdate_service.update_playdate(host_id, *playdate_id, body.0).await?;

    Ok(success::Success::ok(Some(playdate)).message("Playdate updated successfully"))
}

#[delete("/{playdate_id}")]
pub async fn cancel_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    playdate_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let host_id = get_claims(&req)?.sub;
    playdate_service.cancel_playdate(host_id, *playdate_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{playdate_id}/join")]
pub async fn join_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    playdate_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    playdate_service.join_playdate(user_id, *playdate_id).await?;
    Ok(success::Success::ok(None).message("Joined playdate successfully"))
}

#[post("/{playdate_id}/leave")]
pub async fn leave_playdate(
    playdate_service: web::Data<PlaydateSvc>,
    playdate_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    playdate_service.leave_playdate(user_id, *playdate_id).await?;
    Ok(success::Success::ok(None).message("Left playdate successfully"))
}
