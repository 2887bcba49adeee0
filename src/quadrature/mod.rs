//! Truck reconciliation ("quadrature") confirmation.
//!
//! Confirmation and the follow-up notification are independent: once the
//! backend accepts the quadrature it stays confirmed, whatever happens to the
//! message to the administrator.

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{ConfirmReply, QuadratureRejection, Session, WhatsAppMessage};
use crate::screens::Notice;

/// Shown when the backend rejects without a usable reason.
const DEFAULT_REJECTION: &str = "You still have products pending verification.";

/// What happened to the administrator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent { to: String },
    NoAdminPhone,
    Failed { reason: String },
}

/// Outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadratureOutcome {
    Confirmed { notification: NotificationStatus },
    Rejected {
        pending_codes: Vec<String>,
        message: String,
    },
}

impl QuadratureOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            QuadratureOutcome::Confirmed {
                notification: NotificationStatus::Sent { .. },
            } => Notice::success(
                "Quadrature confirmed!",
                "All products are verified and the confirmation message was sent.",
            ),
            QuadratureOutcome::Confirmed {
                notification: NotificationStatus::NoAdminPhone,
            } => Notice::warning(
                "Quadrature confirmed",
                "No administrator phone number was found to send the message.",
            ),
            QuadratureOutcome::Confirmed {
                notification: NotificationStatus::Failed { .. },
            } => Notice::warning(
                "Quadrature confirmed",
                "The quadrature was confirmed but the administrator could not be notified.",
            ),
            QuadratureOutcome::Rejected { message, .. } => {
                Notice::error("You cannot confirm yet", message.clone())
            }
        }
    }
}

/// Confirm the session truck's quadrature, then try to notify the administrator.
pub async fn confirm(api: &ApiClient, session: &Session) -> Result<QuadratureOutcome, AppError> {
    let plate = session.license_plate().ok_or_else(|| {
        AppError::Forbidden("Only users with an assigned plate can confirm a quadrature".to_string())
    })?;

    tracing::info!("Confirming quadrature for plate {}", plate);
    if let ConfirmReply::Rejected { detail } = api.confirm_quadrature(plate).await? {
        let outcome = rejection(detail.as_ref());
        tracing::info!("Quadrature for {} rejected: {:?}", plate, outcome);
        return Ok(outcome);
    }

    let notification = notify_admin(api, session, plate).await;
    Ok(QuadratureOutcome::Confirmed { notification })
}

async fn notify_admin(api: &ApiClient, session: &Session, plate: &str) -> NotificationStatus {
    let phone = match api.admin_phone().await {
        Ok(Some(phone)) => phone,
        Ok(None) => return NotificationStatus::NoAdminPhone,
        Err(e) => {
            tracing::warn!("Could not fetch the administrator's number: {}", e);
            return NotificationStatus::NoAdminPhone;
        }
    };

    let message = WhatsAppMessage {
        to: phone.clone(),
        message: confirmation_message(session, plate),
    };

    match api.send_whatsapp(&message).await {
        Ok(()) => {
            tracing::info!("Quadrature notification sent to {}", phone);
            NotificationStatus::Sent { to: phone }
        }
        Err(e) => {
            tracing::warn!("Quadrature notification failed: {}", e);
            NotificationStatus::Failed {
                reason: e.message(),
            }
        }
    }
}

pub fn confirmation_message(session: &Session, plate: &str) -> String {
    format!(
        "Truck of user {} with plate {} has successfully confirmed its quadrature.",
        session.display_name(),
        plate
    )
}

fn rejection(detail: Option<&serde_json::Value>) -> QuadratureOutcome {
    if let Some(codes) = detail.and_then(QuadratureRejection::pending_codes) {
        let message = if codes.is_empty() {
            DEFAULT_REJECTION.to_string()
        } else {
            format!("Products pending verification:\n{}", codes.join(", "))
        };
        return QuadratureOutcome::Rejected {
            pending_codes: codes,
            message,
        };
    }

    let message = detail
        .and_then(|d| d.as_str())
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_REJECTION.to_string());

    QuadratureOutcome::Rejected {
        pending_codes: Vec::new(),
        message,
    }
}
