use fuji_pxr4::{Pxr4, SerialInterfacePxr4};

fn main() {
    let port = "/dev/ttyUSB0";
    let slave_address = 1;

    // Define the serial instrument interface with the PXR4 link parameters.
    let serial_inst = SerialInterfacePxr4::simple(port).expect("Failed to open serial port");

    // Now we can open the PXR4 with the serial interface.
    let mut inst = Pxr4::try_new(serial_inst, slave_address).unwrap();

    // Query and print the process value
    println!(
        "Temperature: {} ºC",
        inst.read_temperature().unwrap().as_celsius()
    );
}
