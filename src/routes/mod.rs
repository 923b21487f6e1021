pub mod docs;
pub mod export;
pub mod health;
pub mod salary;
