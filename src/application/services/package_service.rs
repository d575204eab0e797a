//! Package intake, listing, editing and export.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use super::occupancy::{shelf_deltas, sync_shelves};
use crate::domain::entities::preset::label_for;
use crate::domain::entities::{
    LastEntry, NewPackage, Package, PackageFilter, PackagePatch, PackageStatus, StatusLabel,
};
use crate::domain::repositories::{PackageRepository, PresetRepository, ShelfRepository};
use crate::error::AppError;
use crate::utils::id::generate_id;

const BOM: &str = "\u{feff}";

const CSV_HEADER: [&str; 9] = [
    "No.",
    "Tracking Number",
    "Owner",
    "Shelf",
    "Tags",
    "Status",
    "Entry Time",
    "Weight",
    "Notes",
];

/// Result of a batch operation over package ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub affected: Vec<String>,
    pub not_found: Vec<String>,
}

impl BatchOutcome {
    fn from_ids(requested: &[String], affected: Vec<String>) -> Self {
        let not_found = requested
            .iter()
            .filter(|id| !affected.contains(id))
            .cloned()
            .collect();
        Self {
            affected,
            not_found,
        }
    }
}

/// A rendered CSV download.
#[derive(Debug, Clone)]
pub struct PackageExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

fn validate_weight(weight: f64) -> Result<(), AppError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(AppError::bad_request(
            "Weight must be greater than zero",
            json!({ "weight": weight }),
        ));
    }
    Ok(())
}

fn clean_tracking_number(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "Tracking number is required",
            json!({ "field": "tracking_number" }),
        ));
    }
    Ok(trimmed.to_string())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn format_weight(weight: Option<f64>) -> String {
    weight.map(|w| w.to_string()).unwrap_or_default()
}

/// Service for the package collection.
///
/// Keeps shelf counters and last-entry memory in step with package changes.
pub struct PackageService<P: PackageRepository, S: ShelfRepository, R: PresetRepository> {
    packages: Arc<P>,
    shelves: Arc<S>,
    presets: Arc<R>,
}

impl<P, S, R> PackageService<P, S, R>
where
    P: PackageRepository,
    S: ShelfRepository,
    R: PresetRepository,
{
    pub fn new(packages: Arc<P>, shelves: Arc<S>, presets: Arc<R>) -> Self {
        Self {
            packages,
            shelves,
            presets,
        }
    }

    /// Registers a newly arrived package.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the tracking number is blank or the
    /// weight is not positive.
    pub async fn intake(&self, input: NewPackage) -> Result<Package, AppError> {
        let tracking_number = clean_tracking_number(&input.tracking_number)?;
        if let Some(weight) = input.weight {
            validate_weight(weight)?;
        }

        let package = Package {
            id: generate_id(),
            tracking_number,
            owner: input.owner.trim().to_string(),
            shelf: input.shelf.trim().to_string(),
            tags: clean_tags(input.tags),
            status: input.status.unwrap_or(PackageStatus::InStock),
            entry_time: Utc::now(),
            weight: input.weight,
            notes: clean_notes(input.notes),
        };

        let package = self.packages.insert(package).await?;
        sync_shelves(self.shelves.as_ref(), shelf_deltas([(None, Some(&package))])).await;

        let entry = LastEntry {
            owner: non_empty(&package.owner),
            shelf: non_empty(&package.shelf),
            tags: package.tags.clone(),
            status: Some(package.status),
        };
        if let Err(e) = self.presets.save_last_entry(entry).await {
            warn!(error = %e, "Failed to remember last entry");
        }

        metrics::counter!("packages_received_total").increment(1);
        info!(id = %package.id, tracking_number = %package.tracking_number, "Package received");

        Ok(package)
    }

    /// Returns one page of matching packages and the total number of matches.
    pub async fn list(
        &self,
        filter: &PackageFilter,
        offset: usize,
        limit: usize,
    ) -> (Vec<Package>, usize) {
        let matching: Vec<Package> = self
            .packages
            .list()
            .await
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        let total = matching.len();
        let page = matching.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }

    pub async fn get(&self, id: &str) -> Result<Package, AppError> {
        self.packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found", json!({ "id": id })))
    }

    /// Applies a partial update.
    ///
    /// Text fields are trimmed; an empty note clears it.
    pub async fn update(&self, id: &str, mut patch: PackagePatch) -> Result<Package, AppError> {
        if let Some(tn) = &patch.tracking_number {
            patch.tracking_number = Some(clean_tracking_number(tn)?);
        }
        if let Some(Some(weight)) = patch.weight {
            validate_weight(weight)?;
        }
        patch.owner = patch.owner.map(|o| o.trim().to_string());
        patch.shelf = patch.shelf.map(|s| s.trim().to_string());
        patch.tags = patch.tags.map(clean_tags);
        patch.notes = patch.notes.map(clean_notes);

        let (before, after) = self
            .packages
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found", json!({ "id": id })))?;

        sync_shelves(
            self.shelves.as_ref(),
            shelf_deltas([(Some(&before), Some(&after))]),
        )
        .await;

        Ok(after)
    }

    pub async fn delete(&self, id: &str) -> Result<Package, AppError> {
        let removed = self.packages.delete(&[id.to_string()]).await?;
        let package = removed
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Package not found", json!({ "id": id })))?;

        sync_shelves(self.shelves.as_ref(), shelf_deltas([(Some(&package), None)])).await;
        info!(id, "Package deleted");

        Ok(package)
    }

    pub async fn batch_status(
        &self,
        ids: &[String],
        status: PackageStatus,
    ) -> Result<BatchOutcome, AppError> {
        ensure_selection(ids)?;

        let changes = self.packages.set_status(ids, status).await?;
        sync_shelves(
            self.shelves.as_ref(),
            shelf_deltas(changes.iter().map(|(b, a)| (Some(b), Some(a)))),
        )
        .await;

        let affected = changes.into_iter().map(|(_, after)| after.id).collect();
        Ok(BatchOutcome::from_ids(ids, affected))
    }

    pub async fn batch_delete(&self, ids: &[String]) -> Result<BatchOutcome, AppError> {
        ensure_selection(ids)?;

        let removed = self.packages.delete(ids).await?;
        sync_shelves(
            self.shelves.as_ref(),
            shelf_deltas(removed.iter().map(|p| (Some(p), None))),
        )
        .await;
        info!(count = removed.len(), "Packages deleted");

        let affected = removed.into_iter().map(|p| p.id).collect();
        Ok(BatchOutcome::from_ids(ids, affected))
    }

    /// Renders the selected packages as CSV.
    ///
    /// With `ids`, exactly those packages are exported (in listing order);
    /// otherwise every package matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if nothing is selected.
    pub async fn export_csv(
        &self,
        ids: Option<&[String]>,
        filter: &PackageFilter,
    ) -> Result<PackageExport, AppError> {
        let selected: Vec<Package> = self
            .packages
            .list()
            .await
            .into_iter()
            .filter(|p| match ids {
                Some(ids) => ids.contains(&p.id),
                None => filter.matches(p),
            })
            .collect();

        if selected.is_empty() {
            return Err(AppError::bad_request(
                "No packages selected for export",
                json!({}),
            ));
        }

        let labels = self.presets.statuses().await;
        let content = render_csv(&selected, &labels).map_err(|e| {
            warn!(error = %e, "Failed to render CSV export");
            AppError::internal("Failed to render CSV export", json!({}))
        })?;

        Ok(PackageExport {
            filename: format!("packages_{}.csv", Utc::now().format("%Y-%m-%d")),
            rows: selected.len(),
            content,
        })
    }

    pub async fn last_entry(&self) -> LastEntry {
        self.presets.last_entry().await
    }
}

/// Writes a BOM-prefixed CSV with every field quoted.
fn render_csv(packages: &[Package], labels: &[StatusLabel]) -> Result<String, csv::Error> {
    let mut out = BOM.as_bytes().to_vec();
    {
        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(&mut out);
        wtr.write_record(CSV_HEADER)?;
        for (idx, p) in packages.iter().enumerate() {
            wtr.write_record([
                (idx + 1).to_string(),
                p.tracking_number.clone(),
                p.owner.clone(),
                p.shelf.clone(),
                p.tags.join(";"),
                label_for(labels, p.status),
                p.entry_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                format_weight(p.weight),
                p.notes.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn ensure_selection(ids: &[String]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::bad_request(
            "At least one package id is required",
            json!({ "field": "ids" }),
        ));
    }
    Ok(())
}
