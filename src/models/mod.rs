pub mod balances;
pub mod messages;
pub mod route;
