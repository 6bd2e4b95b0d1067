//! Contact form submission.
//!
//! A configured form hands the message to a `MessageTransport` (the
//! external message service). Without credentials it falls back to a
//! `mailto:` link that a `MailOpener` hands to the user's mail client.

use lumen_config::ContactSettings;
use serde::{Deserialize, Serialize};

use crate::error::ContactError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ContactError::InvalidEmail(email.to_string())),
        }
    }

    pub fn subject(&self) -> String {
        format!("Contact Form Message from {}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }
}

/// Template parameters sent to the message service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

impl OutgoingMessage {
    pub fn new(message: &ContactMessage, recipient: &str) -> Self {
        Self {
            from_name: message.name.clone(),
            from_email: message.email.clone(),
            message: message.message.clone(),
            to_email: recipient.to_string(),
            reply_to: message.email.clone(),
        }
    }
}

/// Service credentials, present only when the form is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCredentials<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub public_key: &'a str,
}

pub trait MessageTransport {
    /// Deliver `params` through the external service. Failures should be
    /// reported as `ContactError::Delivery` carrying the service's message.
    fn send(
        &mut self,
        credentials: ServiceCredentials<'_>,
        params: &OutgoingMessage,
    ) -> Result<(), ContactError>;
}

pub trait MailOpener {
    fn open(&mut self, url: &str) -> Result<(), ContactError>;
}

/// How a message left the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    OpenedMailClient { url: String },
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    settings: ContactSettings,
}

impl ContactForm {
    pub fn new(settings: ContactSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// The `mailto:` link used when the service is not configured.
    pub fn mailto_url(&self, message: &ContactMessage) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.settings.recipient,
            urlencoding::encode(&message.subject()),
            urlencoding::encode(&message.body())
        )
    }

    fn credentials(&self) -> Option<ServiceCredentials<'_>> {
        if !self.settings.is_configured() {
            return None;
        }
        Some(ServiceCredentials {
            service_id: self.settings.service_id.as_deref()?,
            template_id: self.settings.template_id.as_deref()?,
            public_key: self.settings.public_key.as_deref()?,
        })
    }

    /// Validate and deliver a message.
    ///
    /// Service failures are returned as-is; use
    /// `ContactError::is_configuration_error` to tell bad credentials from
    /// transient failures.
    pub fn submit<T, M>(
        &self,
        message: &ContactMessage,
        transport: &mut T,
        opener: &mut M,
    ) -> Result<Delivery, ContactError>
    where
        T: MessageTransport + ?Sized,
        M: MailOpener + ?Sized,
    {
        message.validate()?;

        let Some(credentials) = self.credentials() else {
            let url = self.mailto_url(message);
            log::info!("message service not configured, opening mail client");
            opener.open(&url)?;
            return Ok(Delivery::OpenedMailClient { url });
        };

        let params = OutgoingMessage::new(message, &self.settings.recipient);
        match transport.send(credentials, &params) {
            Ok(()) => {
                log::info!("contact message from {} sent", message.email);
                Ok(Delivery::Sent)
            }
            Err(err) => {
                if err.is_configuration_error() {
                    log::warn!("message service rejected its configuration: {err}");
                } else {
                    log::warn!("contact message delivery failed: {err}");
                }
                Err(err)
            }
        }
    }
}
