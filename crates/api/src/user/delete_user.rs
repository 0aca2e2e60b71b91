use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;
use tripline_api_structs::delete_user::*;
use tripline_domain::{User, ID};
use tripline_infra::TriplineContext;

pub async fn delete_user_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let usecase = DeleteUserUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct DeleteUserUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.user_id.clone()));
        }

        // The postgres schema cascades these deletes, the explicit calls keep
        // every store implementation behaving the same.
        let itineraries = ctx
            .repos
            .itineraries
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let posts = ctx
            .repos
            .posts
            .delete_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Deleting user: {} together with {} itineraries and {} posts",
            self.user_id, itineraries.deleted_count, posts.deleted_count
        );

        match ctx.repos.users.delete(&self.user_id).await {
            Some(user) => Ok(user),
            None => Err(UseCaseError::NotFound(self.user_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tripline_domain::Itinerary;

    #[actix_web::main]
    #[test]
    async fn deletes_user_and_owned_resources() {
        let ctx = TriplineContext::create_inmemory();

        let user = User::new("leaver@example.com".into(), "Leaver".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let itinerary = Itinerary {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Last trip".into(),
            destination: "Lisbon".into(),
            start_ts: 10,
            end_ts: 20,
            reminder_sent: false,
            created: 0,
            updated: 0,
        };
        ctx.repos.itineraries.insert(&itinerary).await.unwrap();

        let usecase = DeleteUserUseCase {
            user_id: user.id.clone(),
        };
        execute(usecase, &ctx).await.expect("To delete user");

        assert!(ctx.repos.users.find(&user.id).await.is_none());
        assert!(ctx.repos.itineraries.find(&itinerary.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_user() {
        let ctx = TriplineContext::create_inmemory();

        let usecase = DeleteUserUseCase {
            user_id: Default::default(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
