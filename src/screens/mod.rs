//! Role screens.
//!
//! Each role lands on its own screen after login. Screens share the product
//! board, the selection list and the notice dialog.

mod board;
mod notice;
mod selection;

pub use board::*;
pub use notice::*;
pub use selection::*;

use crate::errors::AppError;
use crate::models::{Role, Session};

/// Where a session lands after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Administrator,
    Warehouse,
    Driver,
}

impl Screen {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Screen::Administrator,
            Role::Warehouse => Screen::Warehouse,
            Role::Driver => Screen::Driver,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Administrator => "Administrator",
            Screen::Warehouse => "Warehouse",
            Screen::Driver => "Driver",
        }
    }

    /// Whether the screen offers the quadrature confirmation.
    pub fn can_confirm_quadrature(&self) -> bool {
        matches!(self, Screen::Driver)
    }

    /// Whether the screen can list staff accounts.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Screen::Administrator)
    }
}

/// Welcome dialog for the session's home screen.
pub fn home(session: &Session) -> Notice {
    let screen = Screen::for_role(session.role);
    let greeting = if session.first_name.trim().is_empty() {
        "Welcome!".to_string()
    } else {
        format!("Welcome, {}!", session.first_name.trim())
    };

    let mut message = greeting;
    if let Some(plate) = session.license_plate() {
        message.push_str(&format!("\nPlate: {}", plate));
    }

    Notice::info(screen.title(), message)
}

/// Reject an operation the session's screen does not offer.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    if Screen::for_role(session.role).can_manage_users() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "The {} screen cannot list users",
            session.role
        )))
    }
}
