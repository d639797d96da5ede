#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod view_model;

pub use app::CommenterApp;
pub use client::{GenerateRequest, GenerateResponse};
pub use config::Endpoint;
pub use download::DownloadFile;
pub use error::{ClientError, DownloadError};
pub use view_model::PageState;
