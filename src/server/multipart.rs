//! Minimal `multipart/form-data` reader for image uploads.

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.to_ascii_lowercase().starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    /// Present for file inputs, even when the browser sends `filename=""`.
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<Part>,
}

impl MultipartForm {
    /// Parts without a `Content-Disposition` name are skipped.
    pub fn parse(body: &[u8], boundary: &str) -> MultipartForm {
        let delimiter = format!("--{}", boundary);
        let mut parts = Vec::new();

        for raw in split_on(body, delimiter.as_bytes()) {
            let raw = raw.strip_prefix(b"\r\n").unwrap_or(raw);
            let sep = b"\r\n\r\n";
            let Some(sep_pos) = find_subsequence(raw, sep) else { continue };
            let headers = String::from_utf8_lossy(&raw[..sep_pos]);
            let Some(disposition) = headers
                .lines()
                .find(|l| l.to_ascii_lowercase().starts_with("content-disposition:"))
            else {
                continue;
            };
            let Some(name) = disposition_param(disposition, "name") else { continue };
            let data = &raw[sep_pos + sep.len()..];
            let data = data.strip_suffix(b"\r\n").unwrap_or(data);
            parts.push(Part { name, filename: disposition_param(disposition, "filename"), data: data.to_vec() });
        }
        MultipartForm { parts }
    }

    /// Bytes of the file input named `field`; `None` if absent or empty.
    pub fn file(&self, field: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == field && p.filename.is_some())
            .map(|p| p.data.as_slice())
            .filter(|d| !d.is_empty())
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.parts
            .iter()
            .find(|p| p.name == field && p.filename.is_none())
            .and_then(|p| String::from_utf8(p.data.clone()).ok())
    }
}

/// Value of `key="..."` (or an unquoted `key=value`) among the `;`-separated
/// parameters of a Content-Disposition line.
fn disposition_param(line: &str, key: &str) -> Option<String> {
    line.split(';').skip(1).find_map(|param| {
        let (k, v) = param.trim().split_once('=')?;
        if k.trim().eq_ignore_ascii_case(key) {
            Some(v.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
pub(crate) fn build_body(boundary: &str, fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, f
                )
                .as_bytes(),
            ),
            None => body
                .extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes()),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_from_content_type() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=----WebKitFormBoundaryAbc").as_deref(),
            Some("----WebKitFormBoundaryAbc")
        );
        assert_eq!(extract_boundary("multipart/form-data; boundary=\"xyz\"").as_deref(), Some("xyz"));
        assert_eq!(extract_boundary("application/json"), None);
    }

    #[test]
    fn file_and_text_parts_by_name() {
        let body = build_body(
            "XX",
            &[("lang", None, &b"ta"[..]), ("leaf", Some("leaf.png"), &b"\x89PNG\r\n\x1a\nbytes"[..])],
        );
        let form = MultipartForm::parse(&body, "XX");
        assert_eq!(form.text("lang").as_deref(), Some("ta"));
        assert_eq!(form.file("leaf"), Some(&b"\x89PNG\r\n\x1a\nbytes"[..]));
        assert_eq!(form.file("lang"), None);
        assert_eq!(form.text("leaf"), None);
    }

    #[test]
    fn filename_does_not_masquerade_as_field_name() {
        let body = build_body("B", &[("other", Some("leaf"), &b"data"[..])]);
        let form = MultipartForm::parse(&body, "B");
        assert_eq!(form.file("leaf"), None);
        assert!(form.file("other").is_some());
    }

    #[test]
    fn empty_file_counts_as_missing() {
        let body = build_body("B", &[("image", Some(""), &b""[..])]);
        assert_eq!(MultipartForm::parse(&body, "B").file("image"), None);
    }
}
