// src/mail.rs
//! Contact form relay over SMTP

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use crate::core::config_manager::MailConfig;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Recipients::One(address) => vec![address],
            Recipients::Many(addresses) => addresses,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub to: Option<Recipients>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl ContactRequest {
    /// Every validation problem, empty when the request is valid
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Numele este obligatoriu"));
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email-ul este obligatoriu"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Email invalid"));
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::new("message", "Mesajul este obligatoriu"));
        }
        if let Some(Recipients::Many(list)) = &self.to {
            if list.is_empty() {
                errors.push(FieldError::new("to", "Lista de destinatari este goală"));
            }
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Mailer for the configured account, `None` without credentials
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Ok(None);
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .with_context(|| format!("Invalid SMTP relay: {}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .build();

        let from = format!("InternStud <{}>", username)
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address: {}", username))?;

        Ok(Some(Self { transport, from }))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.as_str());
        for address in &mail.to {
            let mailbox: Mailbox = address
                .parse()
                .with_context(|| format!("Invalid recipient: {}", address))?;
            builder = builder.to(mailbox);
        }
        if let Some(reply_to) = &mail.reply_to {
            if let Ok(mailbox) = reply_to.parse::<Mailbox>() {
                builder = builder.reply_to(mailbox);
            }
        }

        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                mail.text.clone(),
                mail.html.clone(),
            ))
            .context("Failed to build email")?;

        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;
        Ok(())
    }
}

/// Used when no SMTP account is configured
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<()> {
        anyhow::bail!("Email delivery is not configured")
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    default_recipients: Vec<String>,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, default_recipients: Vec<String>) -> Self {
        Self {
            mailer,
            default_recipients,
        }
    }

    pub fn from_config(config: &MailConfig) -> Result<Self> {
        let mailer: Arc<dyn Mailer> = match SmtpMailer::from_config(config)? {
            Some(mailer) => {
                info!(
                    "Contact relay using {}:{}",
                    config.smtp_host, config.smtp_port
                );
                Arc::new(mailer)
            }
            None => {
                warn!("EMAIL_USER/EMAIL_PASSWORD not set, contact messages cannot be delivered");
                Arc::new(DisabledMailer)
            }
        };
        Ok(Self::new(mailer, config.default_recipients.clone()))
    }

    pub fn compose(&self, request: &ContactRequest) -> OutgoingMail {
        let name = request.name.trim();
        let email = request.email.trim();
        let message = request.message.trim();

        let to = match &request.to {
            Some(recipients) => recipients.clone().into_vec(),
            None => self.default_recipients.clone(),
        };

        let text = format!("Nume: {}\nEmail: {}\n\nMesaj:\n{}", name, email, message);
        let html = format!(
            "<h3>Mesaj nou de pe InternStud</h3>\
             <p><strong>Nume:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Mesaj:</strong><br>{}</p>",
            escape_html(name),
            escape_html(email),
            escape_html(message).replace('\n', "<br>")
        );

        OutgoingMail {
            to,
            reply_to: Some(email.to_string()),
            subject: format!("Mesaj nou de la {}", name),
            text,
            html,
        }
    }

    pub async fn relay(&self, request: &ContactRequest) -> Result<()> {
        let mail = self.compose(request);
        if mail.to.is_empty() {
            anyhow::bail!("No recipients configured for contact messages");
        }
        self.mailer.send(&mail).await?;
        info!("Relayed contact message from {}", request.email.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            to: None,
        }
    }

    #[test]
    fn test_validation_reports_all_errors() {
        let errors = request("  ", "not-an-email", "\n").validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
        assert!(request("Ana", "ana@example.ro", "Salut").validate().is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a.b@c.ro"));
        assert!(!is_valid_email("a b@c.ro"));
        assert!(!is_valid_email("a@c"));
    }

    #[test]
    fn test_recipients_accept_string_or_list() {
        let one: ContactRequest =
            serde_json::from_str(r#"{"name":"a","email":"a@b.ro","message":"m","to":"x@y.ro"}"#)
                .unwrap();
        assert_eq!(one.to.unwrap().into_vec(), vec!["x@y.ro"]);

        let many: ContactRequest = serde_json::from_str(
            r#"{"name":"a","email":"a@b.ro","message":"m","to":["x@y.ro","z@y.ro"]}"#,
        )
        .unwrap();
        assert_eq!(many.to.unwrap().into_vec().len(), 2);
    }

    #[test]
    fn test_compose_escapes_html_and_uses_defaults() {
        let relay = ContactRelay::new(
            Arc::new(DisabledMailer),
            vec!["office@internstud.ro".to_string()],
        );
        let mail = relay.compose(&request("Ion <b>", "ion@x.ro", "Linia 1\nLinia 2 & more"));

        assert_eq!(mail.to, vec!["office@internstud.ro"]);
        assert_eq!(mail.subject, "Mesaj nou de la Ion <b>");
        assert!(mail.html.contains("Ion &lt;b&gt;"));
        assert!(mail.html.contains("Linia 1<br>Linia 2 &amp; more"));
        assert!(mail.text.contains("Linia 1\nLinia 2 & more"));
        assert_eq!(mail.reply_to.as_deref(), Some("ion@x.ro"));
    }

    #[tokio::test]
    async fn test_disabled_mailer_fails_relay() {
        let relay = ContactRelay::new(Arc::new(DisabledMailer), vec!["a@b.ro".to_string()]);
        assert!(relay.relay(&request("Ana", "ana@x.ro", "Hi")).await.is_err());
    }
}
