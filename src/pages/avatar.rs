//! Avatar image selection, preview and upload.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::api::{ApiError, AvatarUpload};

/// An image read from disk and ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarDraft {
    path: Utf8PathBuf,
    upload: AvatarUpload,
}

impl AvatarDraft {
    /// Builds a draft from bytes already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when the file is empty or its
    /// extension does not name an image type.
    pub fn from_bytes(path: &Utf8Path, bytes: Vec<u8>) -> Result<Self, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput {
                message: format!("{path} is empty"),
            });
        }
        let mime = mime_guess::from_path(path.as_std_path())
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .ok_or_else(|| ApiError::InvalidInput {
                message: format!("{path} is not a recognised image file"),
            })?;
        let file_name = path.file_name().unwrap_or("avatar").to_owned();
        Ok(Self {
            path: path.to_owned(),
            upload: AvatarUpload {
                file_name,
                mime_type: mime.essence_str().to_owned(),
                bytes,
            },
        })
    }

    /// Path the image was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Guessed MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.upload.mime_type
    }

    /// Image size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.upload.bytes.len()
    }

    /// Always false; empty files are rejected when the draft is built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upload.bytes.is_empty()
    }

    /// Local preview as a `data:` URL.
    #[must_use]
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.upload.mime_type,
            STANDARD.encode(&self.upload.bytes)
        )
    }

    /// Borrows the multipart payload.
    #[must_use]
    pub const fn upload(&self) -> &AvatarUpload {
        &self.upload
    }
}

/// Reads an image file without blocking the caller's thread.
///
/// # Errors
///
/// Returns [`ApiError::Io`] when the file cannot be read, or
/// [`ApiError::InvalidInput`] when it is not an image.
pub async fn read_avatar(path: &Utf8Path) -> Result<AvatarDraft, ApiError> {
    let bytes = tokio::fs::read(path.as_std_path())
        .await
        .map_err(|error| ApiError::Io {
            message: format!("read {path}: {error}"),
        })?;
    debug!(path = %path, bytes = bytes.len(), "avatar image read");
    AvatarDraft::from_bytes(path, bytes)
}

/// Progress of the avatar selection on a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvatarPreview {
    /// Nothing selected.
    #[default]
    Empty,
    /// The file is being read.
    Reading(Utf8PathBuf),
    /// The file was read and can be uploaded.
    Ready(AvatarDraft),
    /// The file could not be used.
    Failed {
        /// Selected path.
        path: Utf8PathBuf,
        /// Why it was refused.
        message: String,
    },
}

impl AvatarPreview {
    /// Borrows the ready draft.
    #[must_use]
    pub const fn draft(&self) -> Option<&AvatarDraft> {
        match self {
            Self::Ready(draft) => Some(draft),
            Self::Empty | Self::Reading(_) | Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;

    use super::{AvatarDraft, read_avatar};
    use crate::api::ApiError;

    #[rstest]
    #[case("me.png", "image/png")]
    #[case("me.JPG", "image/jpeg")]
    #[case("me.gif", "image/gif")]
    fn guesses_image_types(#[case] name: &str, #[case] expected: &str) {
        let draft =
            AvatarDraft::from_bytes(Utf8Path::new(name), vec![1, 2, 3]).expect("image accepted");
        assert_eq!(draft.mime_type(), expected);
    }

    #[test]
    fn rejects_non_images() {
        let error = AvatarDraft::from_bytes(Utf8Path::new("notes.txt"), vec![1])
            .expect_err("text is not an image");
        assert!(matches!(error, ApiError::InvalidInput { .. }));
    }

    #[test]
    fn preview_is_a_base64_data_url() {
        let draft = AvatarDraft::from_bytes(Utf8Path::new("a.png"), b"abc".to_vec())
            .expect("image accepted");
        assert_eq!(draft.preview_data_url(), "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("me.png")).expect("utf-8 temp path");
        std::fs::write(&path, [0x89_u8, 0x50, 0x4e, 0x47]).expect("write image");

        let draft = read_avatar(&path).await.expect("file should be read");

        assert_eq!(draft.len(), 4);
        assert_eq!(draft.upload().file_name, "me.png");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let error = read_avatar(Utf8Path::new("/definitely/missing/me.png"))
            .await
            .expect_err("file is missing");
        assert!(matches!(error, ApiError::Io { .. }));
    }
}
