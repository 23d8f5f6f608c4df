/// Authentication flow for one sign-in.
///
/// Verifying a PIN that still equals the shared default drops the session
/// into `MustChangePin`; the only way out is a successful change (forward to
/// `Authenticated`) or cancellation (back to `Unauthenticated`). Timesheet
/// submission requires `Authenticated`, so an employee can never act while
/// their credential is still the default.
///
/// This is an explicit value a caller carries through its sign-in flow,
/// one flow per employee, so concurrent sign-ins cannot cross-contaminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Unauthenticated,
    MustChangePin { employee_id: i32 },
    Authenticated { employee_id: i32 },
}

impl AuthFlow {
    pub fn new() -> Self {
        AuthFlow::Unauthenticated
    }

    /// Outcome of a successful PIN verification.
    pub fn pin_verified(self, employee_id: i32, is_default: bool) -> Self {
        if is_default {
            AuthFlow::MustChangePin { employee_id }
        } else {
            AuthFlow::Authenticated { employee_id }
        }
    }

    /// A completed self-service rotation promotes the pending session.
    /// Only meaningful from `MustChangePin`; other states are unchanged.
    pub fn pin_changed(self) -> Self {
        match self {
            AuthFlow::MustChangePin { employee_id } => AuthFlow::Authenticated { employee_id },
            other => other,
        }
    }

    /// Declining the mandatory rotation abandons the whole sign-in.
    pub fn cancel(self) -> Self {
        AuthFlow::Unauthenticated
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthFlow::Authenticated { .. })
    }

    /// The employee this session may submit timesheets for.
    pub fn authenticated_employee(&self) -> Option<i32> {
        match self {
            AuthFlow::Authenticated { employee_id } => Some(*employee_id),
            _ => None,
        }
    }
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_default_pin_authenticates_directly() {
        let flow = AuthFlow::new().pin_verified(7, false);
        assert_eq!(flow, AuthFlow::Authenticated { employee_id: 7 });
        assert_eq!(flow.authenticated_employee(), Some(7));
    }

    #[test]
    fn test_default_pin_forces_rotation() {
        let flow = AuthFlow::new().pin_verified(7, true);
        assert_eq!(flow, AuthFlow::MustChangePin { employee_id: 7 });
        assert!(!flow.is_authenticated());
        assert_eq!(flow.authenticated_employee(), None);
    }

    #[test]
    fn test_completed_change_authenticates() {
        let flow = AuthFlow::new().pin_verified(7, true).pin_changed();
        assert_eq!(flow, AuthFlow::Authenticated { employee_id: 7 });
    }

    #[test]
    fn test_cancel_reverts_to_unauthenticated() {
        let flow = AuthFlow::new().pin_verified(7, true).cancel();
        assert_eq!(flow, AuthFlow::Unauthenticated);
        assert_eq!(flow.authenticated_employee(), None);
    }

    #[test]
    fn test_pin_changed_outside_rotation_is_inert() {
        assert_eq!(AuthFlow::Unauthenticated.pin_changed(), AuthFlow::Unauthenticated);
        let authed = AuthFlow::Authenticated { employee_id: 3 };
        assert_eq!(authed.pin_changed(), authed);
    }
}
