use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::get_user_itineraries::*;
use tripline_domain::{Itinerary, ID};
use tripline_infra::TriplineContext;

pub async fn get_user_itineraries_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetUserItinerariesUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|itineraries| HttpResponse::Ok().json(APIResponse::new(itineraries)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct GetUserItinerariesUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserItinerariesUseCase {
    type Response = Vec<Itinerary>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserItineraries";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        Ok(ctx.repos.itineraries.find_by_user(&self.user_id).await)
    }
}
