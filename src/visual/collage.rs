//! Album art collage.
//!
//! A `size x size` grid of 300px tiles. Tiles are fetched concurrently and
//! anything that can't be fetched or decoded becomes a grey placeholder, so a
//! collage is produced as long as at least one URL slot exists.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use futures::stream::{self, StreamExt};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Error, Result, ResultExt};

/// Tile edge in pixels.
pub const TILE: u32 = 300;

const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
const PLACEHOLDER: Rgb<u8> = Rgb([50, 50, 50]);

/// Tiles downloaded at once
const CONCURRENT_FETCHES: usize = 8;

/// Grid dimension offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GridSize {
    #[default]
    #[value(name = "3")]
    Three,
    #[value(name = "5")]
    Five,
}

impl GridSize {
    pub fn edge(self) -> u32 {
        match self {
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    pub fn cells(self) -> usize {
        (self.edge() * self.edge()) as usize
    }
}

/// Build a PNG collage from image URLs, in grid order.
///
/// `Ok(None)` when `urls` is empty. Extra URLs beyond the grid are ignored,
/// missing ones are padded with placeholders.
pub async fn create_collage(
    http_client: &reqwest::Client,
    urls: &[Option<String>],
    size: GridSize,
) -> Result<Option<Vec<u8>>> {
    if urls.is_empty() {
        return Ok(None);
    }

    let tiles: Vec<Option<RgbImage>> = stream::iter(urls.iter().take(size.cells()))
        .map(|url| async move {
            match url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => fetch_tile(http_client, url).await,
                None => None,
            }
        })
        .buffered(CONCURRENT_FETCHES)
        .collect()
        .await;

    let canvas = compose(&tiles, size.edge());
    encode_png(&canvas).map(Some)
}

/// Write collage bytes to `path`. The parent directory must already exist.
pub fn save_collage(path: &Path, png: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty())
        && !dir.is_dir()
    {
        return Err(Error::file_not_found(dir));
    }

    fs::write(path, png).with_context(format!("Failed to write collage to {}", path.display()))
}

async fn fetch_tile(http_client: &reqwest::Client, url: &str) -> Option<RgbImage> {
    let response = match http_client.get(url).send().await {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::debug!("Collage tile {} returned HTTP {}", url, r.status());
            return None;
        }
        Err(e) => {
            tracing::debug!("Collage tile {} failed: {}", url, e);
            return None;
        }
    };

    let bytes = response.bytes().await.ok()?;
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(imageops::resize(&img.to_rgb8(), TILE, TILE, FilterType::Triangle)),
        Err(e) => {
            tracing::debug!("Collage tile {} is not an image: {}", url, e);
            None
        }
    }
}

/// Lay tiles out row by row on the background canvas.
fn compose(tiles: &[Option<RgbImage>], edge: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(edge * TILE, edge * TILE, BACKGROUND);
    let placeholder = RgbImage::from_pixel(TILE, TILE, PLACEHOLDER);

    for cell in 0..edge * edge {
        let tile = tiles
            .get(cell as usize)
            .and_then(Option::as_ref)
            .unwrap_or(&placeholder);
        let x = (cell % edge) * TILE;
        let y = (cell / edge) * TILE;
        imageops::replace(&mut canvas, tile, i64::from(x), i64::from(y));
    }

    canvas
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| Error::image(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn solid(color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(TILE, TILE, Rgb(color))
    }

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        encode_png(&RgbImage::from_pixel(width, height, Rgb(color))).unwrap()
    }

    #[test]
    fn test_save_collage() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("collage.png");
        let png = png_bytes(2, 2, [20, 20, 20]);

        save_collage(&output, &png).unwrap();

        assert_eq!(fs::read(&output).unwrap(), png);
    }

    #[test]
    fn test_save_collage_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");

        let err = save_collage(&missing.join("collage.png"), b"png").unwrap_err();

        assert!(matches!(&err, Error::FileNotFound(p) if *p == missing));
    }

    #[test]
    fn test_save_collage_write_failure_has_context() {
        let dir = tempfile::TempDir::new().unwrap();

        // The target is a directory, so the write itself fails
        let err = save_collage(dir.path(), b"png").unwrap_err();

        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().starts_with("Failed to write collage to"));
    }

    #[test]
    fn test_compose_places_tiles_row_major() {
        let red = solid([255, 0, 0]);
        let blue = solid([0, 0, 255]);
        let tiles = vec![Some(red), None, Some(blue)];

        let canvas = compose(&tiles, 3);

        assert_eq!(canvas.dimensions(), (900, 900));
        assert_eq!(canvas.get_pixel(10, 10), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(310, 10), &PLACEHOLDER);
        assert_eq!(canvas.get_pixel(610, 10), &Rgb([0, 0, 255]));
        // Second row was never supplied
        assert_eq!(canvas.get_pixel(10, 310), &PLACEHOLDER);
        assert_eq!(canvas.get_pixel(899, 899), &PLACEHOLDER);
    }

    #[test]
    fn test_grid_sizes() {
        assert_eq!(GridSize::Three.cells(), 9);
        assert_eq!(GridSize::Five.edge(), 5);
        assert_eq!(GridSize::default(), GridSize::Three);
    }

    #[tokio::test]
    async fn test_no_urls_is_none() {
        let client = reqwest::Client::new();
        assert!(create_collage(&client, &[], GridSize::Three).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collage_fetches_and_resizes_tiles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/green.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(png_bytes(64, 64, [0, 200, 0])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.png"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
            .mount(&server)
            .await;

        let urls = vec![
            Some(format!("{}/green.png", server.uri())),
            Some(format!("{}/broken.png", server.uri())),
            Some(format!("{}/missing.png", server.uri())),
            None,
        ];
        let client = reqwest::Client::new();

        let png = create_collage(&client, &urls, GridSize::Three)
            .await
            .unwrap()
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), (900, 900));
        assert_eq!(decoded.get_pixel(150, 150), &Rgb([0, 200, 0]));
        assert_eq!(decoded.get_pixel(450, 150), &PLACEHOLDER);
        assert_eq!(decoded.get_pixel(750, 150), &PLACEHOLDER);
        assert_eq!(decoded.get_pixel(150, 450), &PLACEHOLDER);
    }
}
