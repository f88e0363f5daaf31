mod components;
mod layout;
mod panel;
mod repository;
pub mod types;
pub mod utils;
mod view_model;

pub use panel::OvertimeRoute;
