mod itinerary;
mod notification;
mod post;
mod shared;
mod user;

pub use itinerary::Itinerary;
pub use notification::EmailMessage;
pub use post::Post;
pub use shared::entity::{Entity, ID};
pub use user::{is_valid_email, User};
