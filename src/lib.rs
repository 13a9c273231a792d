pub mod api;
pub mod config;
pub mod debounce;
pub mod display;
pub mod hero;
pub mod home;
pub mod models;
pub mod nav;
pub mod session;
pub mod view;
