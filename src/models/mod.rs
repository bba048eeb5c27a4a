pub mod post;
pub mod signup;
pub mod user;

pub use post::*;
pub use signup::*;
pub use user::*;
