use actix_web::{web, HttpResponse, Responder};
use punchcard_core::rate_limit::Gate;
use punchcard_core::session::AuthFlow;

use crate::{
    app_state::AppState,
    credentials::{self, ChangeOutcome, VerifyOutcome},
    models::*,
};

/// POST /api/auth/verify-pin
/// Check an employee's PIN. A success on the shared default PIN is reported
/// with `mustChangePin` so the client runs the mandatory rotation before
/// treating the session as signed in.
pub async fn verify_pin(
    app_state: web::Data<AppState>,
    payload: web::Json<VerifyPinPayload>,
) -> impl Responder {
    let employee_id: i32 = match payload.employee_id.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ApiMessage::fail("Invalid employee ID"));
        }
    };

    log::info!("PIN verification attempt for employee {}", employee_id);

    if let Gate::Locked { remaining } = app_state.rate_limiter.check(employee_id) {
        let secs = remaining.as_secs().max(1);
        log::warn!(
            "Verification refused for employee {}: locked out for {}s",
            employee_id,
            secs
        );
        return HttpResponse::TooManyRequests().json(ApiMessage::fail(format!(
            "Too many failed attempts. Try again in {} seconds.",
            secs
        )));
    }

    match credentials::verify_pin(&app_state.db, employee_id, &payload.pin).await {
        Ok(VerifyOutcome::InvalidFormat) => {
            HttpResponse::BadRequest().json(ApiMessage::fail("PIN must be exactly 4 digits"))
        }
        Ok(VerifyOutcome::NoCredential) => {
            log::warn!("No PIN credential found for employee {}", employee_id);
            HttpResponse::Unauthorized().json(ApiMessage::fail(
                "No PIN set for this employee. Please contact your administrator.",
            ))
        }
        Ok(VerifyOutcome::Mismatch) => {
            log::warn!("Invalid PIN attempt for employee {}", employee_id);
            app_state.rate_limiter.record_failure(employee_id);
            HttpResponse::Unauthorized().json(ApiMessage::fail("Invalid PIN"))
        }
        Ok(VerifyOutcome::Valid { is_default }) => {
            log::info!("PIN verification successful for employee {}", employee_id);
            app_state.rate_limiter.record_success(employee_id);

            let flow = AuthFlow::new().pin_verified(employee_id, is_default);
            let must_change_pin = matches!(flow, AuthFlow::MustChangePin { .. });

            let message = if must_change_pin {
                "PIN verified; the default PIN must be changed before continuing"
            } else {
                "PIN verified successfully"
            };

            HttpResponse::Ok().json(VerifyPinResponse {
                success: true,
                message: message.to_string(),
                must_change_pin,
            })
        }
        Err(e) => {
            log::error!("Database error verifying PIN for employee {}: {}", employee_id, e);
            HttpResponse::InternalServerError().json(ApiMessage::fail("Database error occurred"))
        }
    }
}

/// POST /api/auth/change-pin
/// Self-service rotation. The current-PIN check counts as a verification
/// attempt, so it runs behind the same throttle as verify-pin.
pub async fn change_pin(
    app_state: web::Data<AppState>,
    payload: web::Json<ChangePinPayload>,
) -> impl Responder {
    let employee_id: i32 = match payload.employee_id.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ApiMessage::fail("Invalid employee ID"));
        }
    };

    log::info!("PIN change attempt for employee {}", employee_id);

    if let Gate::Locked { remaining } = app_state.rate_limiter.check(employee_id) {
        let secs = remaining.as_secs().max(1);
        log::warn!(
            "PIN change refused for employee {}: locked out for {}s",
            employee_id,
            secs
        );
        return HttpResponse::TooManyRequests().json(ApiMessage::fail(format!(
            "Too many failed attempts. Try again in {} seconds.",
            secs
        )));
    }

    match credentials::change_pin(
        &app_state.db,
        employee_id,
        &payload.current_pin,
        &payload.new_pin,
        &payload.confirm_pin,
    )
    .await
    {
        Ok(ChangeOutcome::Ok) => {
            log::info!("PIN changed successfully for employee {}", employee_id);
            app_state.rate_limiter.record_success(employee_id);
            HttpResponse::Ok().json(ApiMessage::ok("PIN changed successfully"))
        }
        Ok(ChangeOutcome::InvalidPinFormat) => {
            HttpResponse::BadRequest().json(ApiMessage::fail("PIN must be exactly 4 digits"))
        }
        Ok(ChangeOutcome::NewPinIsDefault) => HttpResponse::BadRequest().json(ApiMessage::fail(
            "New PIN cannot be the default 0000",
        )),
        Ok(ChangeOutcome::ConfirmMismatch) => HttpResponse::BadRequest()
            .json(ApiMessage::fail("New PIN and confirmation do not match")),
        Ok(ChangeOutcome::NoCredential) => {
            log::warn!("PIN change for employee {} with no credential", employee_id);
            HttpResponse::Unauthorized().json(ApiMessage::fail(
                "No PIN set for this employee. Please contact your administrator.",
            ))
        }
        Ok(ChangeOutcome::CurrentPinMismatch) => {
            log::warn!("Wrong current PIN in change attempt for employee {}", employee_id);
            app_state.rate_limiter.record_failure(employee_id);
            HttpResponse::Unauthorized().json(ApiMessage::fail("Current PIN is incorrect"))
        }
        Err(e) => {
            log::error!("Database error changing PIN for employee {}: {}", employee_id, e);
            HttpResponse::InternalServerError().json(ApiMessage::fail("Database error occurred"))
        }
    }
}
