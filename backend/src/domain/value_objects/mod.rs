pub mod email;
pub mod identifiers;
pub mod person_name;
pub mod role;

pub use email::Email;
pub use identifiers::{CustomerId, InvitationCode};
pub use person_name::PersonName;
pub use role::Role;
