//! Form parsing and validation.
//!
//! Validation is pure: it never touches the database or the filesystem.
//! Failures produce [`FieldErrors`] which the handlers feed back into the
//! form renderer with an HTTP 200 status; persistence only happens in the
//! handlers, after validation succeeds.

use axum::extract::Multipart;
use image::ImageFormat;
use serde::Deserialize;

/// Error attached to the `image` field when an upload is not a usable image.
pub const IMAGE_ERROR: &str = "the uploaded file is corrupted or is not an image.";

/// Error attached to a missing required text field.
pub const REQUIRED_ERROR: &str = "this field is required.";

/// Error attached to the `group` field when the selection is not a group.
pub const GROUP_ERROR: &str = "select a valid group.";

/// Per-field validation errors, in field order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, &'static str)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push((field, message));
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| *msg)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw "new post" / "edit post" submission, as parsed from multipart.
#[derive(Debug, Default, Clone)]
pub struct PostForm {
    pub text: String,
    /// Raw group selector value; empty means no group.
    pub group: String,
    /// Uploaded file, if the file field was non-empty.
    pub image: Option<Upload>,
}

/// An uploaded file before validation.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A validated image upload.
#[derive(Debug, Clone)]
pub struct ValidImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ValidImage {
    /// File extension for the sniffed format.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            _ => "gif",
        }
    }
}

/// A "new post" submission that passed validation.
#[derive(Debug, Clone)]
pub struct ValidPostForm {
    pub text: String,
    pub group_id: Option<i64>,
    pub image: Option<ValidImage>,
}

impl PostForm {
    /// Read a multipart body into a raw form.
    ///
    /// Unknown fields are ignored; an image part without a filename or with
    /// zero bytes counts as "no upload" (an untouched file input submits an
    /// empty part).
    pub async fn from_multipart(mut multipart: Multipart) -> anyhow::Result<Self> {
        let mut form = PostForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| anyhow::anyhow!("malformed multipart body: {e}"))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("text") => form.text = field.text().await?,
                Some("group") => form.group = field.text().await?,
                Some("image") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?.to_vec();
                    if !filename.is_empty() && !bytes.is_empty() {
                        form.image = Some(Upload { filename, bytes });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validate the submission.
    ///
    /// On failure returns the raw form back alongside the field errors so the
    /// handler can re-render it with the entered values intact.
    pub fn validate(self) -> Result<ValidPostForm, (PostForm, FieldErrors)> {
        let mut errors = FieldErrors::default();

        if self.text.trim().is_empty() {
            errors.push("text", REQUIRED_ERROR);
        }

        let group_id = match self.group.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("group", GROUP_ERROR);
                    None
                }
            },
        };

        let image = match &self.image {
            None => None,
            Some(upload) => match validate_image(&upload.bytes) {
                Some(format) => Some(ValidImage {
                    bytes: upload.bytes.clone(),
                    format,
                }),
                None => {
                    errors.push("image", IMAGE_ERROR);
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(ValidPostForm {
                text: self.text,
                group_id,
                image,
            })
        } else {
            Err((self, errors))
        }
    }
}

/// Sniff and decode an upload, accepting PNG, JPEG, and GIF.
///
/// The magic-byte sniff alone would accept a truncated file, so the bytes
/// must also fully decode.
fn validate_image(bytes: &[u8]) -> Option<ImageFormat> {
    let format = image::guess_format(bytes).ok()?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif
    ) {
        return None;
    }
    image::load_from_memory_with_format(bytes, format).ok()?;
    Some(format)
}

/// Comment submission (urlencoded, single field).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<&str, FieldErrors> {
        if self.text.trim().is_empty() {
            let mut errors = FieldErrors::default();
            errors.push("text", REQUIRED_ERROR);
            return Err(errors);
        }
        Ok(self.text.as_str())
    }
}
