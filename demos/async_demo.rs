/* demos/async_demo.rs */

use myip_foo::{Client, ErrorKind};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== myip.foo async client ===\n");

    let client = Client::new()?;

    let ip = client.get_ip().await?;
    println!("IP: {}", ip);

    match client.get_ip_data().await {
        Ok(data) => println!("City: {}, ISP: {}", data.location.city, data.network.isp),
        Err(e) if e.kind() == ErrorKind::Status => println!("Service unavailable: {}", e),
        Err(e) => return Err(e.into()),
    }

    let dual = client.get_dual_stack().await;
    if dual.is_empty() {
        println!("Neither address family is reachable");
    }
    for address in dual.addresses() {
        println!("Address: {}", address);
    }

    let conn = client.get_connection_type().await?;
    println!("Connection type: {}", conn.connection_type);

    println!("\n=== Done ===");
    Ok(())
}
