use std::io;

use nextsms::{Credentials, MessageText, NextSmsClient, RawPhoneNumber, SendSms, SenderId};

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
    let phone_raw = required_env("NEXTSMS_PHONE")?;
    let message = std::env::var("NEXTSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the nextsms demo.".to_owned());
    let sender = match std::env::var("NEXTSMS_SENDER_ID") {
        Ok(value) => SenderId::new(value)?,
        Err(_) => SenderId::default(),
    };
    let sandbox = std::env::var("NEXTSMS_SANDBOX").is_ok_and(|value| value == "1");

    let client = NextSmsClient::builder()
        .credentials(Credentials::new(username, password)?)
        .sandbox(sandbox)
        .build()?;

    let request = SendSms::new(
        sender,
        RawPhoneNumber::new(phone_raw)?,
        MessageText::new(message)?,
    );
    let response = client.send(request).await?;
    println!("{response}");

    Ok(())
}
