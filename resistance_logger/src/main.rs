//! Continuous resistance logging from a Fuji PXR4, a Keithley 2182, and an optional Keithley 224.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

use fuji_pxr4::Pxr4;
use keithley_224::Keithley224;
use keithley_2182::Keithley2182;
use lablink::{SerialInterface, TcpIpInterface};

use resistance_logger::acquisition::AcquisitionLoop;
use resistance_logger::config::Config;
use resistance_logger::recorder::Recorder;
use resistance_logger::sources::{CurrentSource, FixedCurrent};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::default();

    let filename = prompt_filename().context("Could not read the file name")?;
    let recorder = Recorder::create(&filename)
        .with_context(|| format!("Could not create the log file {filename}"))?;

    let serial = serialport::new(&config.pxr4.port, config.pxr4.baud_rate)
        .timeout(config.pxr4.timeout)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One);
    let pxr4_interface = SerialInterface::full(serial)
        .with_context(|| format!("Could not open the serial port {}", config.pxr4.port))?;
    let pxr4 = Pxr4::try_new(pxr4_interface, config.pxr4.slave_address)
        .context("Could not set up the temperature controller")?;

    let k2182_interface = TcpIpInterface::try_new(&config.k2182.address)
        .with_context(|| format!("Could not connect to the nanovoltmeter at {}", config.k2182.address))?;
    let k2182 =
        Keithley2182::try_new(k2182_interface).context("Could not initialize the nanovoltmeter")?;

    let mut current: Box<dyn CurrentSource> = match &config.current.address {
        Some(address) => {
            let interface = TcpIpInterface::try_new(address)
                .with_context(|| format!("Could not connect to the current source at {address}"))?;
            Box::new(Keithley224::new(interface))
        }
        None => {
            log::info!(
                "No current source attached, assuming {} A",
                config.current.fallback_amperes
            );
            Box::new(FixedCurrent::new(config.current.fallback_amperes))
        }
    };
    current.set_output(true).context("Could not enable the current source")?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .context("Could not install the interrupt handler")?;

    log::info!("Logging to {filename}, press Ctrl-C to stop");
    AcquisitionLoop::new(current, pxr4, k2182, recorder, stop)
        .run()
        .context("Acquisition aborted")?;
    Ok(())
}

/// Ask the user for the name of the log file on stdin.
fn prompt_filename() -> io::Result<String> {
    print!("Enter the name of the file: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
