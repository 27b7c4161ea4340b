//! Card ingestion pipeline: upload → merge → extract → scrape.
//!
//! Progress is published to the status board under the caller's request id
//! so the client can follow along on the status stream.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domains::cards::data::{CardAnalysis, CardExtraction};
use crate::domains::cards::images::stack_vertically;
use crate::domains::scraping::ScrapeOutcome;
use crate::kernel::status_board::COMPLETE;
use crate::kernel::ServerDeps;

pub const UPLOADING: &str = "Uploading image...";
pub const MERGING: &str = "Merging images...";
pub const EXTRACTING: &str = "Extracting card details...";
pub const SCRAPING: &str = "Scraping website...";

/// Public prefix under which stored images are served.
pub const PUBLIC_UPLOAD_PREFIX: &str = "uploads";

/// An uploaded card image as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// A stored image: where it lives on disk and how clients address it.
#[derive(Debug, Clone)]
struct StoredImage {
    disk_path: PathBuf,
    public_path: String,
}

/// Run the full pipeline for one card (optionally with its back side).
///
/// Extraction and scraping faults never fail the request; they are folded
/// into the returned record. Only storage faults before extraction do, and
/// those are published as an `Error: ...` status first.
pub async fn analyze_card(
    request_id: &str,
    front: UploadedImage,
    back: Option<UploadedImage>,
    deps: &ServerDeps,
) -> Result<CardAnalysis> {
    let status = &deps.status;

    let (images, image_path) = match prepare_images(request_id, front, back, deps).await {
        Ok(prepared) => prepared,
        Err(e) => {
            status.publish(request_id, format!("Error: {}", e)).await;
            return Err(e);
        }
    };

    status.publish(request_id, EXTRACTING).await;
    let card: CardExtraction = deps.card_extractor.extract_card(&images).await;
    if card.is_error() {
        warn!(request_id, name = %card.name, detail = %card.contact, "Card extraction failed");
    }

    let scrape = if card.website.trim().is_empty() {
        ScrapeOutcome::Skipped
    } else {
        status.publish(request_id, SCRAPING).await;
        deps.scraper().scrape(&card.website).await
    };

    let analysis = CardAnalysis::assemble(card, image_path, &scrape);
    info!(
        request_id,
        vendor = %analysis.name,
        scrape_status = %analysis.scrape_status,
        "Card analysed"
    );

    status.publish(request_id, COMPLETE).await;
    Ok(analysis)
}

/// Store the uploads and merge front/back when both are present.
///
/// Returns the images to send for extraction and the public path recorded
/// on the vendor.
async fn prepare_images(
    request_id: &str,
    front: UploadedImage,
    back: Option<UploadedImage>,
    deps: &ServerDeps,
) -> Result<(Vec<PathBuf>, String)> {
    deps.status.publish(request_id, UPLOADING).await;

    tokio::fs::create_dir_all(&deps.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", deps.upload_dir.display()))?;

    let front = store_upload(&deps.upload_dir, &front).await?;
    let Some(back) = back else {
        return Ok((vec![front.disk_path], front.public_path));
    };
    let back = store_upload(&deps.upload_dir, &back).await?;

    deps.status.publish(request_id, MERGING).await;

    let file_name = format!("{}.png", Uuid::new_v4());
    let merged_path = deps.upload_dir.join(&file_name);
    let (front_path, back_path, output) = (
        front.disk_path.clone(),
        back.disk_path.clone(),
        merged_path.clone(),
    );

    let merged = tokio::task::spawn_blocking(move || {
        stack_vertically(&front_path, &back_path, &output)
    })
    .await
    .context("Image merge task panicked")
    .and_then(|result| result);

    match merged {
        Ok(()) => Ok((vec![merged_path], public_path(&file_name))),
        Err(e) => {
            warn!(request_id, error = %e, "Merge failed, extracting from both sides");
            Ok((vec![front.disk_path, back.disk_path], front.public_path))
        }
    }
}

async fn store_upload(dir: &Path, upload: &UploadedImage) -> Result<StoredImage> {
    let file_name = format!(
        "{}.{}",
        Uuid::new_v4(),
        file_extension(upload.file_name.as_deref())
    );
    let disk_path = dir.join(&file_name);

    tokio::fs::write(&disk_path, &upload.bytes)
        .await
        .with_context(|| format!("Failed to save upload to {}", disk_path.display()))?;

    Ok(StoredImage {
        disk_path,
        public_path: public_path(&file_name),
    })
}

fn public_path(file_name: &str) -> String {
    format!("{}/{}", PUBLIC_UPLOAD_PREFIX, file_name)
}

/// Extension of the client's file name, `jpg` when missing or odd.
fn file_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_comes_from_file_name() {
        assert_eq!(file_extension(Some("card.PNG")), "png");
        assert_eq!(file_extension(Some("scan.final.webp")), "webp");
        assert_eq!(file_extension(Some("no_extension")), "jpg");
        assert_eq!(file_extension(Some("weird.p/ng")), "jpg");
        assert_eq!(file_extension(None), "jpg");
    }

    #[test]
    fn public_paths_live_under_uploads() {
        assert_eq!(public_path("a.png"), "uploads/a.png");
    }
}
