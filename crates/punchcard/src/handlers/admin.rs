use actix_web::{web, HttpResponse, Responder};

use crate::{
    app_state::AppState,
    credentials::{self, ResetOutcome},
    models::*,
};

/// POST /api/admin/reset-pin
/// Admin-initiated reset. With no PIN in the payload the credential is reset
/// to the default, which forces the employee through a change at next sign-in.
pub async fn reset_pin(
    app_state: web::Data<AppState>,
    payload: web::Json<ResetPinPayload>,
) -> impl Responder {
    let employee_id: i32 = match payload.employee_id.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ApiMessage::fail("Invalid employee ID"));
        }
    };

    log::info!("PIN reset request for employee {}", employee_id);

    match credentials::reset_pin(&app_state.db, employee_id, payload.new_pin.as_deref()).await {
        Ok(ResetOutcome::Ok { pin }) => {
            log::info!("PIN reset successful for employee {}", employee_id);
            HttpResponse::Ok().json(ApiMessage::ok(format!("PIN reset to {} successfully", pin)))
        }
        Ok(ResetOutcome::EmployeeNotFound) => {
            log::warn!("PIN reset for unknown employee {}", employee_id);
            HttpResponse::NotFound().json(ApiMessage::fail("Employee not found"))
        }
        Ok(ResetOutcome::InvalidPinFormat) => {
            HttpResponse::BadRequest().json(ApiMessage::fail("PIN must be a 4-digit number"))
        }
        Err(e) => {
            log::error!("Database error resetting PIN for employee {}: {}", employee_id, e);
            HttpResponse::InternalServerError().json(ApiMessage::fail("Database error occurred"))
        }
    }
}

/// GET /api/admin/pin-status
/// PIN coverage for every employee, for the staff-administration page.
pub async fn pin_status(app_state: web::Data<AppState>) -> impl Responder {
    match credentials::pin_status(&app_state.db).await {
        Ok(rows) => {
            log::info!("Retrieved PIN status for {} employees", rows.len());
            let data = rows
                .into_iter()
                .map(|(employee, credential)| PinStatusEntry {
                    employee_id: employee.id,
                    has_pin: credential.is_some(),
                    last_updated: credential.map(|c| c.updated_at),
                })
                .collect();
            HttpResponse::Ok().json(PinStatusResponse {
                success: true,
                data,
            })
        }
        Err(e) => {
            log::error!("Database error retrieving PIN status: {}", e);
            HttpResponse::InternalServerError().json(ApiMessage::fail("Database error occurred"))
        }
    }
}

/// GET /api/employees
/// Active employees for the sign-in picker.
pub async fn list_employees(app_state: web::Data<AppState>) -> impl Responder {
    match credentials::active_employees(&app_state.db).await {
        Ok(employees) => {
            let entries: Vec<EmployeeEntry> = employees
                .into_iter()
                .map(|e| EmployeeEntry {
                    id: e.id,
                    name: e.full_name(),
                })
                .collect();
            HttpResponse::Ok().json(entries)
        }
        Err(e) => {
            log::error!("Failed to fetch employees: {}", e);
            HttpResponse::InternalServerError().json(ApiMessage::fail("Could not load employees"))
        }
    }
}
