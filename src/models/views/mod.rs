pub mod responses;

pub use responses::{
    CourseTab, CourseViewModel, MemberEntry, PeopleTab, SubmissionViewModel,
    UserManagementViewModel,
};
