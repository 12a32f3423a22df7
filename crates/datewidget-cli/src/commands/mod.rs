pub mod config;
pub mod date;
pub mod pad;
pub mod screen;
pub mod widget;
