pub mod auth;

pub mod users;

pub mod courses;

pub mod submissions;

pub mod views;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use frontend::configure_frontend_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;
pub use views::configure_view_routes;
