//! Buffered multipart form extractor.

use crate::errors::AppError;
use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;
use std::collections::HashMap;

/// A file part read from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file arrived under
    pub field_name: String,
    /// Client-supplied file name (may be empty)
    pub file_name: String,
    /// Declared content type, `application/octet-stream` when absent
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Multipart body buffered into text fields and file parts.
///
/// A part counts as a file when it carries a `filename`. Text fields keep the
/// last value seen for a name; files keep arrival order.
///
/// The whole body is buffered, so pair this with a `DefaultBodyLimit` layer
/// sized for the route.
///
/// ```ignore
/// async fn upload(mut form: MultipartForm) -> Result<(), AppError> {
///     form.reject_unknown_files(&["avatar"])?;
///     let avatar = form.take_files("avatar", 1)?.into_iter().next();
///     let caption = form.text("caption");
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drain an axum [`Multipart`] stream.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await?;
                    tracing::debug!(field = %name, file = %file_name, size = data.len(), "Received file part");
                    form.files.push(UploadedFile {
                        field_name: name,
                        file_name,
                        content_type,
                        data,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Remove and return every file sent under `field`, rejecting more than `max`.
    pub fn take_files(&mut self, field: &str, max: usize) -> Result<Vec<UploadedFile>, AppError> {
        let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| f.field_name == field);
        self.files = rest;

        if taken.len() > max {
            return Err(AppError::BadRequest(format!(
                "Too many files for field '{}' (max {})",
                field, max
            )));
        }
        Ok(taken)
    }

    /// Fail if any file arrived under a field not listed in `allowed`.
    pub fn reject_unknown_files(&self, allowed: &[&str]) -> Result<(), AppError> {
        match self
            .files
            .iter()
            .find(|f| !allowed.contains(&f.field_name.as_str()))
        {
            Some(file) => Err(AppError::BadRequest(format!(
                "Unexpected file field '{}'",
                file.field_name
            ))),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(fields: HashMap<String, String>, files: Vec<UploadedFile>) -> Self {
        Self { fields, files }
    }
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::read(multipart).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(field: &str, name: &str) -> UploadedFile {
        UploadedFile {
            field_name: field.to_string(),
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn test_take_files_partitions_by_field() {
        let mut form = MultipartForm::from_parts(
            HashMap::new(),
            vec![file("cover", "a.png"), file("extra", "b.png"), file("extra", "c.png")],
        );

        let extra = form.take_files("extra", 5).unwrap();
        assert_eq!(extra.len(), 2);
        assert_eq!(extra[0].file_name, "b.png");

        let cover = form.take_files("cover", 1).unwrap();
        assert_eq!(cover.len(), 1);
        assert!(form.take_files("cover", 1).unwrap().is_empty());
    }

    #[test]
    fn test_take_files_rejects_over_limit() {
        let mut form =
            MultipartForm::from_parts(HashMap::new(), vec![file("cover", "a.png"), file("cover", "b.png")]);
        let err = form.take_files("cover", 1).unwrap_err();
        assert!(err.to_string().contains("max 1"));
    }

    #[test]
    fn test_reject_unknown_files() {
        let form = MultipartForm::from_parts(HashMap::new(), vec![file("avatar", "a.png")]);
        assert!(form.reject_unknown_files(&["avatar"]).is_ok());
        assert!(form.reject_unknown_files(&["cover"]).is_err());
    }

    #[test]
    fn test_text_lookup() {
        let fields = HashMap::from([("name".to_string(), "Red Jacket".to_string())]);
        let form = MultipartForm::from_parts(fields, vec![]);
        assert_eq!(form.text("name"), Some("Red Jacket"));
        assert_eq!(form.text("type"), None);
    }
}
