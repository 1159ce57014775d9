//! Static configuration for the acquisition setup.
//!
//! The defaults describe the rack this utility was written for; adjust them here when the wiring
//! changes.

use std::time::Duration;

/// Serial link parameters for the Fuji PXR4 temperature controller.
#[derive(Clone, Debug)]
pub struct Pxr4Config {
    /// Serial port the RS-485 adapter enumerates as.
    pub port: String,
    /// Modbus slave address of the controller.
    pub slave_address: u8,
    /// Baud rate of the serial link.
    pub baud_rate: u32,
    /// Read timeout of the serial link.
    pub timeout: Duration,
}

impl Default for Pxr4Config {
    fn default() -> Self {
        Pxr4Config {
            port: "/dev/ttyUSB0".to_string(),
            slave_address: 1,
            baud_rate: 9600,
            timeout: Duration::from_secs(1),
        }
    }
}

/// Network address of the Keithley 2182 nanovoltmeter.
#[derive(Clone, Debug)]
pub struct K2182Config {
    /// `host:port` of the GPIB-to-Ethernet bridge the 2182 sits behind.
    pub address: String,
}

impl Default for K2182Config {
    fn default() -> Self {
        K2182Config {
            address: "192.168.1.101:1234".to_string(),
        }
    }
}

/// Where the excitation current comes from.
#[derive(Clone, Debug)]
pub struct CurrentSourceConfig {
    /// Current assumed when no Keithley 224 is attached, in amperes.
    pub fallback_amperes: f64,
    /// `host:port` of the Keithley 224 bridge; `None` uses the static fallback current.
    ///
    /// Live readback from the 224 is still experimental, see the `keithley-224` crate docs.
    pub address: Option<String>,
}

impl Default for CurrentSourceConfig {
    fn default() -> Self {
        CurrentSourceConfig {
            fallback_amperes: 100e-6,
            address: None,
        }
    }
}

/// Aggregated configuration for one acquisition run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Temperature controller link.
    pub pxr4: Pxr4Config,
    /// Nanovoltmeter link.
    pub k2182: K2182Config,
    /// Current source selection.
    pub current: CurrentSourceConfig,
}
