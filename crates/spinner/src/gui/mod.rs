pub mod app;
pub mod rows;
pub mod theme;
pub mod wheel;
