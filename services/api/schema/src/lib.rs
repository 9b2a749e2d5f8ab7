//! sea-orm entities for the Foodbook API service.

pub mod recipes;
pub mod users;
