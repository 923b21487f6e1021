pub mod salary_detail;
pub mod user;
