pub mod issue_invitation;
