use std::time::Duration;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use url::Url;
use crate::application::ports::{Notifier, NotifyError};
use crate::domain::entities::Invitation;

/// Port for implicit TLS; every other port negotiates STARTTLS.
const SMTPS_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    pub from_name: String,
    pub accept_url: String,
    pub product_name: String,
    pub timeout: Duration,
}

/// Sends invitation emails through an SMTP relay.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
    accept_url: Url,
    product_name: String,
}

impl SmtpNotifier {
    pub fn new(settings: SmtpSettings) -> Result<Self, NotifyError> {
        let from: Mailbox = format!("{} <{}>", settings.from_name, settings.from_address)
            .parse()
            .map_err(|e| NotifyError::Address(format!("invalid from address: {e}")))?;
        let accept_url = Url::parse(&settings.accept_url)
            .map_err(|e| NotifyError::Message(format!("invalid accept url: {e}")))?;

        let builder = if settings.port == SMTPS_PORT {
            SmtpTransport::relay(&settings.host)
        } else {
            SmtpTransport::starttls_relay(&settings.host)
        }
        .map_err(|e| NotifyError::Delivery(format!("SMTP relay error: {e}")))?
        .port(settings.port)
        .timeout(Some(settings.timeout));

        let builder = match (settings.username, settings.password) {
            (Some(user), Some(pass)) => builder.credentials(Credentials::new(user, pass)),
            _ => builder,
        };

        Ok(Self {
            transport: builder.build(),
            from,
            accept_url,
            product_name: settings.product_name,
        })
    }

    fn accept_link(&self, invitation: &Invitation) -> String {
        let mut url = self.accept_url.clone();
        url.query_pairs_mut()
            .append_pair("code", invitation.invitation_code.as_str())
            .append_pair("email", invitation.email.as_str());
        url.into()
    }

    fn subject(&self, invitation: &Invitation) -> String {
        format!("Welcome to {} - Your {} Invitation", self.product_name, invitation.role.title())
    }

    fn html_body(&self, invitation: &Invitation) -> String {
        let product = escape_html(&self.product_name);
        let first_name = escape_html(invitation.first_name.as_str());
        let role = escape_html(invitation.role.as_str());
        let code = escape_html(invitation.invitation_code.as_str());
        let link = escape_html(&self.accept_link(invitation));
        format!(
            r#"<html>
<body>
    <h2>Welcome to {product}!</h2>
    <p>Hi {first_name},</p>
    <p>You've been invited to join {product} as a <strong>{role}</strong>.</p>
    <p>Your invitation code is: <strong>{code}</strong></p>
    <p>Click the link below to accept your invitation:</p>
    <p><a href="{link}">Accept Invitation</a></p>
    <p>Best regards,<br>The {product} Team</p>
</body>
</html>"#
        )
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, invitation: &Invitation) -> Result<(), NotifyError> {
        let to: Mailbox = invitation
            .email
            .as_str()
            .parse()
            .map_err(|e| NotifyError::Address(format!("invalid recipient {}: {e}", invitation.email)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject(invitation))
            .header(ContentType::TEXT_HTML)
            .body(self.html_body(invitation))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        let mailer = self.transport.clone();
        let response = tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| NotifyError::Delivery(format!("email task failed: {e}")))?
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        tracing::info!(email = %invitation.email, code = %response.code(), "Invitation email sent");
        Ok(())
    }
}
