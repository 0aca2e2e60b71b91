mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use tripline_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use crate::TriplineContext;
    use tripline_domain::User;

    #[tokio::test]
    async fn crud_roundtrip() {
        let ctx = TriplineContext::create_inmemory();

        let mut user = User::new("nomad@example.com".into(), "Nomad".into(), 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let found = ctx.repos.users.find(&user.id).await.expect("To find user");
        assert_eq!(found, user);
        assert_eq!(
            ctx.repos
                .users
                .find_by_email("nomad@example.com")
                .await
                .expect("To find user by email")
                .id,
            user.id
        );

        user.full_name = "Seasoned Nomad".into();
        ctx.repos.users.save(&user).await.expect("To save user");
        assert_eq!(
            ctx.repos.users.find(&user.id).await.unwrap().full_name,
            "Seasoned Nomad"
        );

        let deleted = ctx.repos.users.delete(&user.id).await.expect("To delete user");
        assert_eq!(deleted.id, user.id);
        assert!(ctx.repos.users.find(&user.id).await.is_none());
    }
}
