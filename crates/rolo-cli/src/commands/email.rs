//! Email command handler
//!
//! Composes an email to a client from a canned template and hands the
//! resulting `mailto:` URL to the system mail client.

use anyhow::{bail, Result};
use clap::ValueEnum;

use rolo_core::{Client, Store};

use crate::commands::resolve_client_id;
use crate::output::Output;

/// Canned email templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmailTemplate {
    /// Follow up after a conversation
    FollowUp,
    /// Periodic check-in
    CheckIn,
    /// First contact
    Intro,
}

impl EmailTemplate {
    fn subject(&self, client: &Client) -> String {
        match self {
            EmailTemplate::FollowUp => format!("Following up - {}", client.name),
            EmailTemplate::CheckIn => "Checking in".to_string(),
            EmailTemplate::Intro => "Introduction".to_string(),
        }
    }

    fn body(&self, client: &Client) -> String {
        let first_name = client.name.split_whitespace().next().unwrap_or("there");
        match self {
            EmailTemplate::FollowUp => format!(
                "Hi {},\n\nJust following up on our last conversation. \
                 Let me know if you have any questions.\n",
                first_name
            ),
            EmailTemplate::CheckIn => format!(
                "Hi {},\n\nIt's been a while - how are things going on your end?\n",
                first_name
            ),
            EmailTemplate::Intro => format!(
                "Hi {},\n\nGreat to connect. I'd love to find a time to talk \
                 about how we can work together.\n",
                first_name
            ),
        }
    }
}

/// Compose an email to a client and open the system mail client
pub fn compose(
    store: &Store,
    id: String,
    template: EmailTemplate,
    output: &Output,
) -> Result<()> {
    let uuid = resolve_client_id(store, &id)?;

    let client = store
        .get_client(uuid)
        .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?;

    let Some(ref email) = client.email else {
        bail!("Client '{}' has no email address", client.name);
    };

    let url = mailto_url(email, &template.subject(client), &template.body(client));

    if output.is_json() || output.is_quiet() {
        // Scripting modes print the URL instead of opening a mail client
        println!("{}", url);
        return Ok(());
    }

    open::that(&url)?;
    output.success(&format!("Composing email to {}", email));
    Ok(())
}

/// Build a `mailto:` URL with an encoded subject and body
fn mailto_url(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        to,
        percent_encode(subject),
        percent_encode(body)
    )
}

/// Percent-encode a string for use in a mailto query component
fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("hello"), "hello");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(percent_encode("line\nbreak"), "line%0Abreak");
    }

    #[test]
    fn test_mailto_url() {
        let url = mailto_url("a@example.com", "Hi there", "Body text");
        assert!(url.starts_with("mailto:a@example.com?subject=Hi%20there&body="));
        assert!(url.contains("Body%20text"));
    }

    #[test]
    fn test_template_uses_first_name() {
        let mut client = Client::new("Dina Aziz");
        client.set_email(Some("dina@example.com".to_string()));

        let body = EmailTemplate::FollowUp.body(&client);
        assert!(body.starts_with("Hi Dina,"));

        let subject = EmailTemplate::FollowUp.subject(&client);
        assert!(subject.contains("Dina Aziz"));
    }
}
