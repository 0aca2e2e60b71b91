use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::create_itinerary::*;
use tripline_domain::{Itinerary, ID};
use tripline_infra::TriplineContext;

pub async fn create_itinerary_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateItineraryUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        destination: body.destination,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|itinerary| HttpResponse::Created().json(APIResponse::new(itinerary)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct CreateItineraryUseCase {
    pub user_id: ID,
    pub title: String,
    pub destination: String,
    pub start_ts: i64,
    pub end_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    EmptyTitle,
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::EmptyTitle => {
                Self::BadClientData("The itinerary title cannot be empty".into())
            }
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The trip cannot end before it starts".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateItineraryUseCase {
    type Response = Itinerary;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateItinerary";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if self.end_ts < self.start_ts {
            return Err(UseCaseError::InvalidTimespan);
        }

        let itinerary = Itinerary {
            id: Default::default(),
            user_id: user.id,
            title: self.title.clone(),
            destination: self.destination.clone(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            reminder_sent: false,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .itineraries
            .insert(&itinerary)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(itinerary)
    }
}
