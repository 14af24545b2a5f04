pub use super::course_members::Entity as CourseMembers;
pub use super::courses::Entity as Courses;
pub use super::questions::Entity as Questions;
pub use super::schools::Entity as Schools;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
