//! Quadrature and notification endpoints.

use super::{endpoints, Access, ApiClient};
use crate::errors::{AppError, BackendErrorBody};
use crate::models::{AdminPhone, ConfirmReply, WhatsAppMessage};

impl ApiClient {
    /// POST /product/patente/:plate/confirm-quadrature - Reconcile a truck's batch.
    ///
    /// Every 4xx other than 401, 404 included, is the backend refusing the
    /// quadrature and comes back as `Rejected` with its `detail`.
    pub async fn confirm_quadrature(&self, plate: &str) -> Result<ConfirmReply, AppError> {
        let response = self
            .send(
                self.post(&endpoints::confirm_quadrature(plate)),
                Access::Authenticated,
            )
            .await?;
        let status = response.status();

        if status.is_success() {
            return Ok(ConfirmReply::Accepted);
        }
        if status.is_client_error() {
            let body = response.json::<BackendErrorBody>().await.ok();
            return Ok(ConfirmReply::Rejected {
                detail: body.and_then(|b| b.detail),
            });
        }

        Err(Self::backend_error(response).await)
    }

    /// GET /users/admin-phone - Notification target, if one is configured.
    pub async fn admin_phone(&self) -> Result<Option<String>, AppError> {
        let reply: AdminPhone = self.fetch(self.get(endpoints::ADMIN_PHONE)).await?;
        Ok(reply
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()))
    }

    /// POST /whatsapp/send - Dispatch a message.
    pub async fn send_whatsapp(&self, message: &WhatsAppMessage) -> Result<(), AppError> {
        self.submit(self.post(endpoints::SEND_WHATSAPP).json(message))
            .await
    }
}
