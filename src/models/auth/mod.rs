pub mod requests;
pub mod responses;

pub use requests::{ForgotPasswordRequest, LoginRequest};
pub use responses::LoginResponse;
