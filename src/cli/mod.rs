pub mod activities;
pub mod admin;
pub mod contact;
pub mod details;
pub mod listings;
pub mod options;
pub mod setup;
pub mod ui;
