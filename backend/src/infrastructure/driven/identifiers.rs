use rand::Rng;
use crate::application::ports::IdentifierGenerator;
use crate::domain::value_objects::{CustomerId, InvitationCode};

/// Uppercase alphabet without the look-alikes 0/O and 1/I.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const CUSTOMER_ID_PREFIX: &str = "CUST";
pub const CUSTOMER_ID_SUFFIX_LEN: usize = 12;
pub const INVITATION_CODE_PREFIX: &str = "INV";
pub const INVITATION_CODE_SUFFIX_LEN: usize = 10;

fn random_token(prefix: &str, len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut token = String::with_capacity(prefix.len() + len);
    token.push_str(prefix);
    token.extend((0..len).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char));
    token
}

/// Identifiers drawn from the thread-local CSPRNG.
///
/// 32^12 customer ids and 32^10 codes keep collisions negligible whatever the
/// table size; the rare collision is retried by the issue handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifierGenerator;

impl IdentifierGenerator for RandomIdentifierGenerator {
    fn new_customer_id(&self) -> CustomerId {
        CustomerId::from_string(random_token(CUSTOMER_ID_PREFIX, CUSTOMER_ID_SUFFIX_LEN))
    }

    fn new_invitation_code(&self) -> InvitationCode {
        InvitationCode::from_string(random_token(INVITATION_CODE_PREFIX, INVITATION_CODE_SUFFIX_LEN))
    }
}
