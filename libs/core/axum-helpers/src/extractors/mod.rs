//! Custom extractors for Axum handlers.

pub mod multipart_form;

pub use multipart_form::{MultipartForm, UploadedFile};
