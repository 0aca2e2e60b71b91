use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::get_post::*;
use tripline_domain::{Post, ID};
use tripline_infra::TriplineContext;

pub async fn get_post_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetPostUseCase {
        post_id: path_params.post_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|post| HttpResponse::Ok().json(APIResponse::new(post)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct GetPostUseCase {
    pub post_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(post_id) => {
                Self::NotFound(format!("The post with id: {}, was not found.", post_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPostUseCase {
    type Response = Post;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPost";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.posts.find(&self.post_id).await {
            Some(post) => Ok(post),
            None => Err(UseCaseError::NotFound(self.post_id.clone())),
        }
    }
}
