use std::io;

use nextsms::{Credentials, MessageText, NextSmsClient, RawPhoneNumber, SendBulk, SendSms};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let username = required_env("NEXTSMS_USERNAME")?;
    let password = required_env("NEXTSMS_PASSWORD")?;
    // Comma-separated list of recipients.
    let phones = required_env("NEXTSMS_PHONES")?;

    // Bulk demo always goes to the sandbox.
    let client = NextSmsClient::builder()
        .credentials(Credentials::new(username, password)?)
        .sandbox(true)
        .build()?;

    let mut request = SendBulk::default();
    for (idx, phone) in phones.split(',').enumerate() {
        request.push(SendSms::with_default_sender(
            RawPhoneNumber::new(phone)?,
            MessageText::new(format!("Bulk message #{}", idx + 1))?,
        ));
    }

    let response = client.send_bulk(request).await?;
    println!("{response}");

    Ok(())
}
