//! Fetch a WSDL with `open` and perform a SOAP exchange with `send`.
//!
//! Usage: cargo run --example soap_call -- http://host/service

use std::io::Read;
use std::time::Duration;

use soap_transport::{Request, Transport};
use ureq_transport::UreqTransport;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .ok_or("usage: soap_call <endpoint-url>")?;

    let transport = UreqTransport::new().timeout(Duration::from_secs(30));

    let mut wsdl = String::new();
    transport
        .open(&Request::get(format!("{endpoint}?wsdl")))?
        .read_to_string(&mut wsdl)?;
    println!("fetched WSDL, {} bytes", wsdl.len());

    let envelope = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body/>
</s:Envelope>"#;

    let reply = transport.send(
        &Request::post(endpoint, envelope)
            .header("Content-Type", "text/xml; charset=\"utf-8\"")
            .header("SOAPAction", "\"\""),
    )?;

    println!("status {}", reply.status);
    println!("{}", String::from_utf8_lossy(&reply.body));
    Ok(())
}
