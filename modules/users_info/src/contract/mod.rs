pub mod model;

pub use model::{Attributes, User, UserId, UserPayload};
