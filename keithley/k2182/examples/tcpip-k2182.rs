use lablink::TcpIpInterface;

use keithley_2182::Keithley2182;

fn main() {
    let address = "192.168.1.101:1234";

    // Define the TCP/IP instrument interface, e.g., a GPIB-to-Ethernet bridge.
    let interface = TcpIpInterface::try_new(address).expect("Failed to connect to the bridge");

    // Now we can open the 2182 with the interface; this runs the initialization sequence.
    let mut inst = Keithley2182::try_new(interface).unwrap();

    // Query and print the name of the instrument
    println!("Instrument name: {}", inst.get_name().unwrap());

    // Fetch and print a few readings
    for _ in 0..5 {
        println!("Voltage: {} V", inst.read_fresh().unwrap().as_volts());
    }
}
