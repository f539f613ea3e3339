pub mod client;
pub mod types;

pub use client::ContentClient;
pub use types::{
    Extraction,
    UploadFile,
};
