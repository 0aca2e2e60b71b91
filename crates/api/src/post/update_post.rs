use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::update_post::*;
use tripline_domain::{Post, ID};
use tripline_infra::TriplineContext;

pub async fn update_post_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdatePostUseCase {
        post_id: path_params.post_id.clone(),
        title: body.title,
        body: body.body,
    };

    execute(usecase, &ctx)
        .await
        .map(|post| HttpResponse::Ok().json(APIResponse::new(post)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct UpdatePostUseCase {
    pub post_id: ID,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(post_id) => {
                Self::NotFound(format!("The post with id: {}, was not found.", post_id))
            }
            UseCaseError::EmptyTitle => Self::BadClientData("The post title cannot be empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePostUseCase {
    type Response = Post;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePost";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        let mut post = match ctx.repos.posts.find(&self.post_id).await {
            Some(post) => post,
            None => return Err(UseCaseError::NotFound(self.post_id.clone())),
        };

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            post.title = title.clone();
        }
        if let Some(body) = &self.body {
            post.body = body.clone();
        }
        post.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .posts
            .save(&post)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(post)
    }
}
