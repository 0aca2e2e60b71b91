use crate::error::TriplineError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tripline_api_structs::create_post::*;
use tripline_domain::{Post, ID};
use tripline_infra::TriplineContext;

pub async fn create_post_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreatePostUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        body: body.body,
    };

    execute(usecase, &ctx)
        .await
        .map(|post| HttpResponse::Created().json(APIResponse::new(post)))
        .map_err(TriplineError::from)
}

#[derive(Debug)]
pub struct CreatePostUseCase {
    pub user_id: ID,
    pub title: String,
    pub body: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::EmptyTitle => Self::BadClientData("The post title cannot be empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreatePostUseCase {
    type Response = Post;

    type Error = UseCaseError;

    const NAME: &'static str = "CreatePost";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let post = Post {
            id: Default::default(),
            user_id: user.id,
            title: self.title.clone(),
            body: self.body.clone(),
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .posts
            .insert(&post)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(post)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tripline_domain::User;

    #[actix_web::main]
    #[test]
    async fn creates_post_for_existing_user() {
        let ctx = TriplineContext::create_inmemory();
        let user = User::new("writer@example.com".into(), "Writer".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = CreatePostUseCase {
            user_id: user.id.clone(),
            title: "Three days in Rome".into(),
            body: "We started at the Pantheon...".into(),
        };
        let post = execute(usecase, &ctx).await.expect("To create post");
        assert_eq!(post.user_id, user.id);

        let usecase = CreatePostUseCase {
            user_id: Default::default(),
            title: "Ghost post".into(),
            body: "".into(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::UserNotFound(_)
        ));
    }
}
