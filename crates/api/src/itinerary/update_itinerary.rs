use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::update_itinerary::*;
use tripline_domain::{Itinerary, ID};
use tripline_infra::TriplineContext;

pub async fn update_itinerary_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateItineraryUseCase {
        itinerary_id: path_params.itinerary_id.clone(),
        title: body.title,
        destination: body.destination,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|itinerary| HttpResponse::Ok().json(APIResponse::new(itinerary)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct UpdateItineraryUseCase {
    pub itinerary_id: ID,
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyTitle,
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(itinerary_id) => Self::NotFound(format!(
                "The itinerary with id: {}, was not found.",
                itinerary_id
            )),
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
impl UseCase for UpdateItineraryUseCase {
    type Response = Itinerary;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateItinerary";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        let mut itinerary = match ctx.repos.itineraries.find(&self.itinerary_id).await {
            Some(itinerary) => itinerary,
            None => return Err(UseCaseError::NotFound(self.itinerary_id.clone())),
        };

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            itinerary.title = title.clone();
        }
        if let Some(destination) = &self.destination {
            itinerary.destination = destination.clone();
        }
        if let Some(start_ts) = self.start_ts {
            if start_ts != itinerary.start_ts {
                // The trip was moved, the owner should be reminded about the
                // new start date even if the old one was already notified.
                itinerary.reminder_sent = false;
            }
            itinerary.start_ts = start_ts;
        }
        if let Some(end_ts) = self.end_ts {
            itinerary.end_ts = end_ts;
        }

        if itinerary.end_ts < itinerary.start_ts {
            return Err(UseCaseError::InvalidTimespan);
        }

        itinerary.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .itineraries
            .save(&itinerary)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(itinerary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tripline_domain::User;

    async fn setup_with_notified_itinerary() -> (TriplineContext, Itinerary) {
        let ctx = TriplineContext::create_inmemory();
        let user = User::new("mover@example.com".into(), "Mover".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let itinerary = Itinerary {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Surf camp".into(),
            destination: "Ericeira".into(),
            start_ts: 10_000,
            end_ts: 20_000,
            reminder_sent: true,
            created: 0,
            updated: 0,
        };
        ctx.repos.itineraries.insert(&itinerary).await.unwrap();
        (ctx, itinerary)
    }

    #[actix_web::main]
    #[test]
    async fn moving_the_trip_start_resets_the_reminder_flag() {
        let (ctx, itinerary) = setup_with_notified_itinerary().await;

        let usecase = UpdateItineraryUseCase {
            itinerary_id: itinerary.id.clone(),
            title: None,
            destination: None,
            start_ts: Some(15_000),
            end_ts: None,
        };
        let updated = execute(usecase, &ctx).await.expect("To update itinerary");
        assert_eq!(updated.start_ts, 15_000);
        assert!(!updated.reminder_sent);
    }

    #[actix_web::main]
    #[test]
    async fn unrelated_update_keeps_the_reminder_flag() {
        let (ctx, itinerary) = setup_with_notified_itinerary().await;

        let usecase = UpdateItineraryUseCase {
            itinerary_id: itinerary.id.clone(),
            title: Some("Surf and yoga camp".into()),
            destination: None,
            start_ts: None,
            end_ts: None,
        };
        let updated = execute(usecase, &ctx).await.expect("To update itinerary");
        assert!(updated.reminder_sent);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_timespan() {
        let (ctx, itinerary) = setup_with_notified_itinerary().await;

        let usecase = UpdateItineraryUseCase {
            itinerary_id: itinerary.id.clone(),
            title: None,
            destination: None,
            start_ts: Some(30_000),
            end_ts: None,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidTimespan
        );
    }
}
