// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal `multipart/form-data` body builder, for calls that upload files.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Assembles a `multipart/form-data` request body one part at a time.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Starts a new form with a random boundary.
    pub fn new() -> MultipartForm {
        let boundary: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(30)
            .map(char::from)
            .collect();
        MultipartForm::with_boundary(boundary)
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> MultipartForm {
        MultipartForm {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// The boundary string separating the parts of this form.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `Content-Type` header to send this form with.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Adds a plain text field.
    pub fn add_text(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quotes(name)
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Adds a file field, sent as `application/octet-stream`.
    pub fn add_file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.open_part();
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quotes(name),
                escape_quotes(filename)
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Closes the form and returns the finished body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--\r\n");
        self.body
    }

    fn open_part(&mut self) {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_layout() {
        let form = MultipartForm::with_boundary("XYZ")
            .add_text("status", "hello")
            .add_file("media[]", "cat \"1\".png", b"\x89PNG");

        assert_eq!(form.content_type(), "multipart/form-data; boundary=XYZ");

        let body = form.finish();
        let expected: &[u8] = b"--XYZ\r\n\
            Content-Disposition: form-data; name=\"status\"\r\n\r\n\
            hello\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"media[]\"; filename=\"cat \\\"1\\\".png\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            \x89PNG\r\n\
            --XYZ--\r\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn random_boundaries_differ() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_eq!(a.boundary().len(), 30);
        assert_ne!(a.boundary(), b.boundary());
    }
}
