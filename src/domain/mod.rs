pub mod milestone;
pub mod scenario;
pub mod timeline;
pub mod truck;
pub mod year_week;
