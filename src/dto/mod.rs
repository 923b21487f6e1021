pub mod salary_dto;
