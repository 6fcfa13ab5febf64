use chrono::{DateTime, Utc};
use crate::application::ports::StoreError;
use crate::domain::entities::{Invitation, InvitationStatus};
use crate::domain::value_objects::{CustomerId, Email, InvitationCode, PersonName, Role};

/// Column list matching [`DbInvitation`], for SELECT and RETURNING clauses.
pub const INVITATION_COLUMNS: &str = "id, customer_id, first_name, last_name, email, role, status, \
     invitation_code, invited_on, accepted_on";

#[derive(Debug, sqlx::FromRow)]
pub struct DbInvitation {
    pub id: i64,
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub invitation_code: String,
    pub invited_on: DateTime<Utc>,
    pub accepted_on: Option<DateTime<Utc>>,
}

impl TryFrom<DbInvitation> for Invitation {
    type Error = StoreError;

    fn try_from(row: DbInvitation) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |field: &str, e: String| StoreError::Corrupt(format!("row {id} {field}: {e}"));
        Ok(Invitation {
            id,
            customer_id: CustomerId::from_string(row.customer_id),
            first_name: PersonName::from_db(row.first_name),
            last_name: PersonName::from_db(row.last_name),
            email: Email::from_db(row.email),
            role: Role::from_db(row.role),
            status: row
                .status
                .parse::<InvitationStatus>()
                .map_err(|e| corrupt("status", e))?,
            invitation_code: InvitationCode::from_string(row.invitation_code),
            invited_on: row.invited_on,
            accepted_on: row.accepted_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(first_name: &str, status: &str) -> DbInvitation {
        DbInvitation {
            id: 7,
            customer_id: "CUST7".to_string(),
            first_name: first_name.to_string(),
            last_name: "Cooper".to_string(),
            email: "Legacy@Example.com".to_string(),
            role: "Admin".to_string(),
            status: status.to_string(),
            invitation_code: "INV7".to_string(),
            invited_on: Utc::now(),
            accepted_on: None,
        }
    }

    #[test]
    fn legacy_rows_are_read_as_stored() {
        let invitation = Invitation::try_from(row("  ", "pending")).unwrap();
        assert_eq!(invitation.first_name.as_str(), "  ");
        assert_eq!(invitation.email.as_str(), "Legacy@Example.com");
        assert_eq!(invitation.role.as_str(), "Admin");
        assert_eq!(invitation.status, InvitationStatus::Pending);
    }

    #[test]
    fn unknown_status_is_corrupt() {
        let err = Invitation::try_from(row("Alice", "archived")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(ref msg) if msg.contains("row 7 status")), "{err:?}");
    }
}
