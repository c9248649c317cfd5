//! Contact form. Submission only confirms locally; nothing leaves the machine.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};
use colored::Colorize;

pub const INTRO: &str =
    "Have questions about quantum computing or want to learn more about Myriad? Reach out to us using the form below.";
pub const THANKS: &str = "Thank you for your message! We'll respond to your quantum inquiry soon.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// `local@domain.tld`, no spaces, one `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

impl ContactForm {
    /// All problems at once, in field order.
    pub fn validate(&self) -> Vec<String> {
        let mut errs = Vec::new();
        if self.name.trim().is_empty() {
            errs.push("Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errs.push("Email is required".to_string());
        } else if !is_valid_email(&self.email) {
            errs.push(format!("'{}' is not a valid email address", self.email.trim()));
        }
        if self.message.trim().is_empty() {
            errs.push("Message is required".to_string());
        }
        errs
    }
}

fn prompt(label: &str, placeholder: &str) -> Result<String> {
    print!("{} ({}): ", label.bold(), placeholder.dimmed());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

pub fn run(name: Option<String>, email: Option<String>, message: Option<String>) -> Result<()> {
    println!("{}\n{INTRO}\n", "Contact Us".bold());
    let interactive = io::stdin().is_terminal();
    let ask = |v: Option<String>, label: &str, ph: &str| -> Result<String> {
        match v {
            Some(v) => Ok(v),
            None if interactive => prompt(label, ph),
            None => Ok(String::new()),
        }
    };
    let form = ContactForm {
        name: ask(name, "Name", "Your name")?,
        email: ask(email, "Email", "your.email@example.com")?,
        message: ask(message, "Message", "Your message here...")?,
    };
    let errs = form.validate();
    if !errs.is_empty() {
        for e in &errs {
            eprintln!("{} {e}", "error:".bright_red().bold());
        }
        bail!("contact form has {} problem(s)", errs.len());
    }
    crate::debug_log!("contact form accepted for {}", form.email);
    println!("{} {THANKS}", "ok:".green().bold());
    Ok(())
}
