pub mod auth;
pub mod courses;
pub mod questions;
pub mod submissions;
pub mod users;
pub mod views;

pub use auth::AuthService;
pub use courses::CourseService;
pub use questions::QuestionService;
pub use submissions::SubmissionService;
pub use users::UserService;
pub use views::ViewService;
