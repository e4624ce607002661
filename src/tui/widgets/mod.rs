pub mod chart;
pub mod day;
pub mod header;
pub mod schedule;
pub mod statusbar;
pub mod summary;
