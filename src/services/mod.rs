pub mod export_service;
pub mod salary_service;
