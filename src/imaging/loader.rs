//! Image loading from any addressable source.
//!
//! | Source | How it is read |
//! |---|---|
//! | `data:image/...;base64,...` | base64 payload decoded in memory |
//! | `http://` / `https://` | blocking GET via `reqwest` |
//! | anything else | filesystem path |
//! | raw bytes | used as-is |
//!
//! The bytes are then decoded by the `image` crate, which sniffs the format
//! from the content rather than trusting an extension or MIME type. Nothing
//! is cached and nothing is retried: a failed load is reported to the caller,
//! who may simply call [`load`] again.

use super::raster::Raster;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),
    #[error("Image source is empty")]
    Empty,
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Where an encoded image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    DataUrl(String),
    Url(String),
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Classify a textual reference: `data:` URLs, `http(s)://` URLs, or a path.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        if trimmed.starts_with("data:") {
            ImageSource::DataUrl(trimmed.to_string())
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Short human-readable description for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::DataUrl(url) => {
                let header = url.split(',').next().unwrap_or("data:");
                format!("{header},… ({} bytes)", url.len())
            }
            ImageSource::Url(url) => url.clone(),
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(reference: &str) -> Self {
        Self::parse(reference)
    }
}

/// Fetch and decode an image.
pub fn load(source: &ImageSource) -> Result<Raster, LoadError> {
    let bytes = read_bytes(source)?;
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    let decoded = image::load_from_memory(&bytes)?;
    debug!(
        source = %source.describe(),
        width = decoded.width(),
        height = decoded.height(),
        "Decoded image"
    );
    Ok(Raster::from(decoded))
}

fn read_bytes(source: &ImageSource) -> Result<Vec<u8>, LoadError> {
    match source {
        ImageSource::DataUrl(url) => decode_data_url(url),
        ImageSource::Url(url) => fetch(url),
        ImageSource::Path(path) => Ok(std::fs::read(path)?),
        ImageSource::Bytes(bytes) => Ok(bytes.clone()),
    }
}

/// Extract the payload of a `data:[<mime>][;base64],<data>` URL.
///
/// Only base64 payloads are accepted; image data is binary and never
/// percent-encoded in practice.
fn decode_data_url(url: &str) -> Result<Vec<u8>, LoadError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::MalformedDataUrl("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::MalformedDataUrl("missing ',' separator".into()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::MalformedDataUrl(format!(
            "expected a base64 payload, got header '{header}'"
        )));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadError::MalformedDataUrl(e.to_string()))
}

fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let fetch_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(fetch_err)?;
    fetch_with(&client, url)
}

fn fetch_with(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, LoadError> {
    debug!(url, "Fetching remote image");
    let fetch_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().map_err(fetch_err)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::{BufRead, BufReader, Cursor, Write};
    use std::net::TcpListener;
    use std::thread;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, 128, 255])
        });
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn local_client() -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap()
    }

    /// Serve one request on a local port with a canned response.
    fn serve_once(response: Vec<u8>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/suit.png", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = reader.into_inner();
            stream.write_all(&response).unwrap();
        });
        (url, handle)
    }

    // =========================================================================
    // Source classification
    // =========================================================================

    #[test]
    fn parse_classifies_references() {
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,AAAA"),
            ImageSource::DataUrl(_)
        ));
        assert!(matches!(
            ImageSource::parse("https://example.com/suit.png"),
            ImageSource::Url(_)
        ));
        assert!(matches!(
            ImageSource::parse("http://example.com/suit.png"),
            ImageSource::Url(_)
        ));
        assert_eq!(
            ImageSource::parse("  photos/me.jpg "),
            ImageSource::Path(PathBuf::from("photos/me.jpg"))
        );
    }

    #[test]
    fn describe_truncates_data_urls() {
        let source = ImageSource::parse("data:image/png;base64,AAAAAAAA");
        assert_eq!(source.describe(), "data:image/png;base64,… (30 bytes)");
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_from_bytes() {
        let raster = load(&ImageSource::Bytes(png_bytes(12, 7))).unwrap();
        assert_eq!(raster.dimensions(), (12, 7));
        assert_eq!(raster.pixel(1, 2), Rgba([10, 20, 128, 255]));
    }

    #[test]
    fn load_from_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(5, 4)));
        let raster = load(&ImageSource::parse(&url)).unwrap();
        assert_eq!(raster.dimensions(), (5, 4));
    }

    #[test]
    fn load_from_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        std::fs::write(&path, png_bytes(9, 9)).unwrap();

        let raster = load(&ImageSource::Path(path)).unwrap();
        assert_eq!(raster.dimensions(), (9, 9));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load(&ImageSource::parse("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn load_corrupt_bytes_is_decode_error() {
        let result = load(&ImageSource::Bytes(b"definitely not an image".to_vec()));
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }

    #[test]
    fn load_empty_bytes_is_rejected() {
        let result = load(&ImageSource::Bytes(Vec::new()));
        assert!(matches!(result, Err(LoadError::Empty)));
    }

    #[test]
    fn fetch_refused_connection_is_fetch_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/x.png");
        let result = fetch_with(&local_client(), &url);
        assert!(matches!(result, Err(LoadError::Fetch { url: ref u, .. }) if *u == url));
    }

    #[test]
    fn fetch_not_found_is_http_status_error() {
        let response = b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        let (url, server) = serve_once(response.to_vec());
        let result = fetch_with(&local_client(), &url);
        server.join().unwrap();
        assert!(matches!(
            result,
            Err(LoadError::HttpStatus { status: 404, .. })
        ));
    }

    #[test]
    fn fetch_success_returns_body() {
        let body = png_bytes(3, 2);
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(&body);

        let (url, server) = serve_once(response);
        let fetched = fetch_with(&local_client(), &url).unwrap();
        server.join().unwrap();
        assert_eq!(fetched, body);
    }

    #[test]
    fn data_url_without_base64_marker_is_malformed() {
        let result = load(&ImageSource::parse("data:image/png,rawbytes"));
        assert!(matches!(result, Err(LoadError::MalformedDataUrl(_))));
    }

    #[test]
    fn data_url_without_separator_is_malformed() {
        let result = load(&ImageSource::parse("data:image/png;base64"));
        assert!(matches!(result, Err(LoadError::MalformedDataUrl(_))));
    }

    #[test]
    fn data_url_with_bad_base64_is_malformed() {
        let result = load(&ImageSource::parse("data:image/png;base64,@@@@"));
        assert!(matches!(result, Err(LoadError::MalformedDataUrl(_))));
    }
}
