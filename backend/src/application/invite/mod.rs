// Invitee persona: accepts an invitation

pub mod accept_invitation;
