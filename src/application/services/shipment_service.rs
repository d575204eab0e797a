//! Shipment creation and status tracking.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

use super::occupancy::{shelf_deltas, sync_shelves};
use crate::domain::entities::shipment::shipment_tracking_number;
use crate::domain::entities::{Package, PackageStatus, Recipient, Shipment, ShipmentStatus};
use crate::domain::repositories::{
    PackageChange, PackageRepository, ShelfRepository, ShipmentRepository,
};
use crate::error::AppError;
use crate::utils::id::generate_id;

/// Packages that can be put into a new shipment.
#[derive(Debug, Clone, Serialize)]
pub struct AvailablePackages {
    pub packages: Vec<Package>,
    /// Distinct owners among all available packages, sorted.
    pub owners: Vec<String>,
}

fn clean_recipient(recipient: Recipient) -> Result<Recipient, AppError> {
    let r = Recipient {
        name: recipient.name.trim().to_string(),
        phone: recipient.phone.trim().to_string(),
        email: recipient.email.trim().to_string(),
        address: recipient.address.trim().to_string(),
        country: recipient.country.trim().to_string(),
        zip_code: recipient.zip_code.trim().to_string(),
    };

    let missing: Vec<&str> = [
        ("name", &r.name),
        ("phone", &r.phone),
        ("address", &r.address),
        ("country", &r.country),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::bad_request(
            "Recipient details are incomplete",
            json!({ "missing": missing }),
        ));
    }
    if !r.email.is_empty() && !r.email.validate_email() {
        return Err(AppError::bad_request(
            "Invalid recipient email",
            json!({ "email": r.email }),
        ));
    }

    Ok(r)
}

/// Service for shipments.
///
/// Creating a shipment moves its packages out for delivery; delivering it
/// marks them delivered.
pub struct ShipmentService<S: ShipmentRepository, P: PackageRepository, H: ShelfRepository> {
    shipments: Arc<S>,
    packages: Arc<P>,
    shelves: Arc<H>,
}

impl<S, P, H> ShipmentService<S, P, H>
where
    S: ShipmentRepository,
    P: PackageRepository,
    H: ShelfRepository,
{
    pub fn new(shipments: Arc<S>, packages: Arc<P>, shelves: Arc<H>) -> Self {
        Self {
            shipments,
            packages,
            shelves,
        }
    }

    /// Lists packages in stock or pending, optionally for one owner.
    pub async fn available(&self, owner: Option<&str>) -> AvailablePackages {
        let available: Vec<Package> = self
            .packages
            .list()
            .await
            .into_iter()
            .filter(|p| p.status.is_shippable())
            .collect();

        let owners: BTreeSet<String> = available
            .iter()
            .filter(|p| !p.owner.is_empty())
            .map(|p| p.owner.clone())
            .collect();

        let packages = available
            .into_iter()
            .filter(|p| owner.is_none_or(|o| p.owner == o))
            .collect();

        AvailablePackages {
            packages,
            owners: owners.into_iter().collect(),
        }
    }

    /// Creates a pending shipment for the given packages.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty selection or incomplete recipient
    /// - [`AppError::NotFound`] if a package does not exist
    /// - [`AppError::Conflict`] if a package is not in stock or pending
    pub async fn create(
        &self,
        package_ids: Vec<String>,
        recipient: Recipient,
    ) -> Result<Shipment, AppError> {
        let mut ids: Vec<String> = Vec::with_capacity(package_ids.len());
        for id in package_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(AppError::bad_request(
                "Select at least one package",
                json!({ "field": "package_ids" }),
            ));
        }
        let recipient = clean_recipient(recipient)?;

        let changes = self.packages.claim_for_shipment(&ids).await?;

        let now = Utc::now();
        let shipment = Shipment {
            id: generate_id(),
            packages: changes.iter().map(|(_, after)| after.clone()).collect(),
            recipient,
            shipment_date: now,
            status: ShipmentStatus::Pending,
            tracking_number: shipment_tracking_number(now),
        };
        let shipment = match self.shipments.insert(shipment).await {
            Ok(shipment) => shipment,
            Err(e) => {
                self.release(&changes).await;
                return Err(e);
            }
        };

        sync_shelves(
            self.shelves.as_ref(),
            shelf_deltas(changes.iter().map(|(b, a)| (Some(b), Some(a)))),
        )
        .await;

        metrics::counter!("shipments_created_total").increment(1);
        info!(
            id = %shipment.id,
            tracking_number = %shipment.tracking_number,
            packages = ids.len(),
            "Shipment created"
        );

        Ok(shipment)
    }

    pub async fn list(&self) -> Vec<Shipment> {
        self.shipments.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Shipment, AppError> {
        self.shipments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Shipment not found", json!({ "id": id })))
    }

    /// Moves a shipment forward.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the shipment does not exist
    /// - [`AppError::Conflict`] for a transition that does not move forward
    pub async fn update_status(
        &self,
        id: &str,
        status: ShipmentStatus,
    ) -> Result<Shipment, AppError> {
        let updated = self
            .shipments
            .transition(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Shipment not found", json!({ "id": id })))?;

        if status == ShipmentStatus::Delivered {
            let ids = updated.package_ids();
            let changes = self
                .packages
                .set_status(&ids, PackageStatus::Delivered)
                .await?;
            sync_shelves(
                self.shelves.as_ref(),
                shelf_deltas(changes.iter().map(|(b, a)| (Some(b), Some(a)))),
            )
            .await;
        }

        info!(id, status = status.as_str(), "Shipment status updated");
        Ok(updated)
    }

    /// Puts claimed packages back to their previous status.
    async fn release(&self, changes: &[PackageChange]) {
        for status in [PackageStatus::InStock, PackageStatus::Pending] {
            let ids: Vec<String> = changes
                .iter()
                .filter(|(before, _)| before.status == status)
                .map(|(before, _)| before.id.clone())
                .collect();
            if ids.is_empty() {
                continue;
            }
            if let Err(e) = self.packages.set_status(&ids, status).await {
                warn!(error = %e, ?ids, "Failed to release packages after shipment insert failed");
            }
        }
    }
}
