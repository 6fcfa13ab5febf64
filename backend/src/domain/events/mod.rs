pub mod domain_event;
pub mod invitation_issued;

pub use domain_event::DomainEvent;
pub use invitation_issued::InvitationIssued;
