use model::entities::user;

/// Visibility filter derived from the caller's role and identity.
///
/// Threaded as an explicit parameter into every store query instead of
/// living in ambient "current user" state. There are exactly two levels:
/// everything, or the clients owned by one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Administrator caller: matches everything.
    Unrestricted,
    /// Manager caller: matches only clients owned by this manager.
    RestrictedTo(i32),
}

impl Scope {
    pub fn for_caller(caller: &user::Model) -> Self {
        if caller.role.has_administrator_privilege() {
            Scope::Unrestricted
        } else {
            Scope::RestrictedTo(caller.id)
        }
    }

    /// The manager id to filter on, or `None` when unrestricted.
    pub fn manager_id(&self) -> Option<i32> {
        match self {
            Scope::Unrestricted => None,
            Scope::RestrictedTo(manager_id) => Some(*manager_id),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Scope::Unrestricted)
    }
}
