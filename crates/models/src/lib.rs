pub mod alert;
pub mod client;
pub mod dataset;
pub mod finance;
pub mod meeting;
pub mod project;
pub mod reminder;
pub mod settings;
pub mod task;
