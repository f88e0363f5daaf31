pub mod overtime;

pub use overtime::OvertimeRoute;
