use chrono::Utc;
use entity::{employee, pin_credential};
use punchcard_core::{hashing, pin};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Outcome of checking a candidate PIN against the stored credential.
///
/// Store faults surface as `Err(DbErr)`; everything an operator or caller can
/// act on is a distinct variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid {
        /// The verified PIN is still the shared default and must be rotated
        /// before the session counts as signed in.
        is_default: bool,
    },
    InvalidFormat,
    /// No credential row exists; "never provisioned" is deliberately kept
    /// apart from "guessed wrong".
    NoCredential,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Ok { pin: String },
    EmployeeNotFound,
    InvalidPinFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Ok,
    InvalidPinFormat,
    NewPinIsDefault,
    ConfirmMismatch,
    NoCredential,
    CurrentPinMismatch,
}

/// Check a candidate PIN for an employee.
///
/// Format is validated before the store is touched. The stored digest is
/// recomputed with the stored salt and compared in constant time.
pub async fn verify_pin(
    db: &DatabaseConnection,
    employee_id: i32,
    candidate: &str,
) -> Result<VerifyOutcome, DbErr> {
    if pin::validate_pin(candidate).is_err() {
        return Ok(VerifyOutcome::InvalidFormat);
    }

    let Some(credential) = pin_credential::Entity::find_by_id(employee_id).one(db).await? else {
        return Ok(VerifyOutcome::NoCredential);
    };

    let computed = hashing::hash_pin(candidate, &credential.salt);

    if hashing::constant_time_eq(&credential.pin_hash, &computed) {
        Ok(VerifyOutcome::Valid {
            is_default: pin::is_default_pin(candidate),
        })
    } else {
        Ok(VerifyOutcome::Mismatch)
    }
}

/// Admin-initiated reset. Omitting the PIN falls back to the default, which
/// forces the employee through a change at next sign-in.
///
/// Resetting is allowed whether or not a credential row exists yet; the
/// employee record itself must exist.
pub async fn reset_pin(
    db: &DatabaseConnection,
    employee_id: i32,
    new_pin: Option<&str>,
) -> Result<ResetOutcome, DbErr> {
    let new_pin = new_pin.unwrap_or(pin::DEFAULT_PIN);

    if pin::validate_pin(new_pin).is_err() {
        return Ok(ResetOutcome::InvalidPinFormat);
    }

    if employee::Entity::find_by_id(employee_id).one(db).await?.is_none() {
        return Ok(ResetOutcome::EmployeeNotFound);
    }

    upsert_credential(db, employee_id, new_pin).await?;

    Ok(ResetOutcome::Ok {
        pin: new_pin.to_string(),
    })
}

/// Self-service rotation. The current PIN is verified against the store
/// before anything is written; the new PIN may not be the reserved default
/// and must match its confirmation exactly.
pub async fn change_pin(
    db: &DatabaseConnection,
    employee_id: i32,
    current_pin: &str,
    new_pin: &str,
    confirm_pin: &str,
) -> Result<ChangeOutcome, DbErr> {
    if pin::validate_pin(current_pin).is_err() || pin::validate_pin(new_pin).is_err() {
        return Ok(ChangeOutcome::InvalidPinFormat);
    }
    if pin::is_default_pin(new_pin) {
        return Ok(ChangeOutcome::NewPinIsDefault);
    }
    if new_pin != confirm_pin {
        return Ok(ChangeOutcome::ConfirmMismatch);
    }

    match verify_pin(db, employee_id, current_pin).await? {
        VerifyOutcome::Valid { .. } => {
            upsert_credential(db, employee_id, new_pin).await?;
            Ok(ChangeOutcome::Ok)
        }
        VerifyOutcome::NoCredential => Ok(ChangeOutcome::NoCredential),
        VerifyOutcome::Mismatch => Ok(ChangeOutcome::CurrentPinMismatch),
        // Unreachable: format was validated above.
        VerifyOutcome::InvalidFormat => Ok(ChangeOutcome::InvalidPinFormat),
    }
}

/// PIN coverage report for the staff-administration page: every employee,
/// whether a credential exists, and when it last changed.
pub async fn pin_status(
    db: &DatabaseConnection,
) -> Result<Vec<(employee::Model, Option<pin_credential::Model>)>, DbErr> {
    employee::Entity::find()
        .find_also_related(pin_credential::Entity)
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
}

/// Employees shown in the sign-in picker.
pub async fn active_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>, DbErr> {
    employee::Entity::find()
        .filter(employee::Column::Active.eq(true))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
}

/// Insert or overwrite the credential row with a fresh salt and digest.
/// `updated_at` is refreshed on every write.
async fn upsert_credential(
    db: &DatabaseConnection,
    employee_id: i32,
    new_pin: &str,
) -> Result<(), DbErr> {
    let salt = hashing::generate_salt();
    let digest = hashing::hash_pin(new_pin, &salt);
    let now = Utc::now();

    match pin_credential::Entity::find_by_id(employee_id).one(db).await? {
        Some(existing) => {
            let mut active: pin_credential::ActiveModel = existing.into();
            active.pin_hash = Set(digest.to_vec());
            active.salt = Set(salt.to_vec());
            active.updated_at = Set(now);
            active.update(db).await?;
        }
        None => {
            let credential = pin_credential::ActiveModel {
                employee_id: Set(employee_id),
                pin_hash: Set(digest.to_vec()),
                salt: Set(salt.to_vec()),
                updated_at: Set(now),
            };
            credential.insert(db).await?;
        }
    }

    Ok(())
}
