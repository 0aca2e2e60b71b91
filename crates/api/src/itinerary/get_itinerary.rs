use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::get_itinerary::*;
use tripline_domain::{Itinerary, ID};
use tripline_infra::TriplineContext;

pub async fn get_itinerary_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetItineraryUseCase {
        itinerary_id: path_params.itinerary_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|itinerary| HttpResponse::Ok().json(APIResponse::new(itinerary)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct GetItineraryUseCase {
    pub itinerary_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(itinerary_id) => Self::NotFound(format!(
                "The itinerary with id: {}, was not found.",
                itinerary_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetItineraryUseCase {
    type Response = Itinerary;

    type Error = UseCaseError;

    const NAME: &'static str = "GetItinerary";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.itineraries.find(&self.itinerary_id).await {
            Some(itinerary) => Ok(itinerary),
            None => Err(UseCaseError::NotFound(self.itinerary_id.clone())),
        }
    }
}
