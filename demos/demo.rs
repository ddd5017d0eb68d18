/* demos/demo.rs */

use myip_foo::{ClientConfig, MyIpError, blocking};
use std::time::Duration;

fn main() -> Result<(), MyIpError> {
    tracing_subscriber::fmt::init();

    println!("=== myip.foo blocking client ===\n");

    let config = ClientConfig::new().with_dual_stack_timeout(Duration::from_secs(3));
    let client = blocking::Client::with_config(config)?;

    // Example 1: Plain IP
    example_1_plain_ip(&client)?;

    // Example 2: Full data with geolocation
    example_2_ip_data(&client)?;

    // Example 3: Dual-stack, never fails
    example_3_dual_stack(&client);

    // Example 4: Connection type
    example_4_connection_type(&client)?;

    // Example 5: Headers and user agent
    example_5_headers(&client)?;

    println!("=== All examples completed! ===");
    Ok(())
}

fn example_1_plain_ip(client: &blocking::Client) -> Result<(), MyIpError> {
    println!("Example 1: Plain IP");
    println!("IP: {}", client.get_ip()?);
    println!();
    Ok(())
}

fn example_2_ip_data(client: &blocking::Client) -> Result<(), MyIpError> {
    println!("Example 2: Full IP data");

    let data = client.get_ip_data()?;
    println!("IP: {} ({})", data.ip, data.ip_type);
    println!("Location: {}, {}", data.location.city, data.location.country);
    println!("Network: AS{} {}", data.network.asn, data.network.isp);
    println!("Served by: {}", data.cloudflare.colo);
    println!();
    Ok(())
}

fn example_3_dual_stack(client: &blocking::Client) {
    println!("Example 3: Dual-stack IPv4/IPv6");

    let dual = client.get_dual_stack();
    println!("IPv4: {}", dual.ipv4.as_deref().unwrap_or("not available"));
    println!("IPv6: {}", dual.ipv6.as_deref().unwrap_or("not available"));
    println!();
}

fn example_4_connection_type(client: &blocking::Client) -> Result<(), MyIpError> {
    println!("Example 4: Connection type");

    match client.get_connection_type() {
        Ok(conn) => println!("{} is {}", conn.ip, conn.connection_type),
        Err(e) if e.is_timeout() => println!("Timed out, try again later"),
        Err(e) => return Err(e),
    }
    println!();
    Ok(())
}

fn example_5_headers(client: &blocking::Client) -> Result<(), MyIpError> {
    println!("Example 5: Headers as seen by the server");

    let headers = client.get_headers()?;
    for (key, value) in &headers {
        println!("  {}: {}", key, value);
    }
    println!("User-Agent: {}", client.get_user_agent()?);
    println!();
    Ok(())
}
