use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::create_user::*;
use tripline_domain::{is_valid_email, User};
use tripline_infra::TriplineContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateUserUseCase {
        email: body.email,
        full_name: body.full_name,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEmail(String),
    EmptyName,
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("The email: {}, is not a valid email address", email))
            }
            UseCaseError::EmptyName => Self::BadClientData("The full name cannot be empty".into()),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with the email: {}, already exists",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        if !is_valid_email(&self.email) {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }
        if self.full_name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        if ctx.repos.users.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::EmailTaken(self.email.clone()));
        }

        let user = User::new(
            self.email.clone(),
            self.full_name.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
