pub mod invitation;

pub use invitation::{Invitation, InvitationStatus, NewInvitation};
