use std::io::Write;
use std::path::Path;
use std::time::Duration;

use serial_core::{BaudRate, CharSize, FlowControl, Parity, PortSettings, SerialPort, StopBits};
use tracing::{debug, info};

use crate::Error;

/// Terminator appended to every line written to the device.
pub const LINE_TERMINATOR: &str = "\r\n";

pub const BAUD_RATE: BaudRate = BaudRate::Baud115200;

/// Time a single write may block before it fails.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(10000);

pub fn default_port_settings() -> PortSettings {
    PortSettings {
        baud_rate: BAUD_RATE,
        char_size: CharSize::Bits8,
        parity: Parity::ParityNone,
        stop_bits: StopBits::Stop1,
        flow_control: FlowControl::FlowNone,
    }
}

/// Writes command lines to a transport, usually a serial port.
///
/// The transport is released when the writer is dropped or [`PortWriter::close`]d.
#[derive(Debug)]
pub struct PortWriter<W: Write> {
    transport: W,
}

impl PortWriter<serial::SystemPort> {
    /// Open the serial device at `device` with [`default_port_settings`].
    pub fn open(device: &Path) -> Result<Self, Error> {
        let open_error = |source| Error::DeviceOpen {
            device: device.to_path_buf(),
            source,
        };

        let mut port = serial::open(device).map_err(open_error)?;
        port.configure(&default_port_settings())
            .map_err(open_error)?;
        port.set_timeout(WRITE_TIMEOUT).map_err(open_error)?;

        info!(
            device = %device.display(),
            "Opened serial device at {} baud.",
            BAUD_RATE.speed()
        );
        Ok(Self::new(port))
    }
}

impl<W: Write> PortWriter<W> {
    pub fn new(transport: W) -> Self {
        Self { transport }
    }

    /// Write `text` followed by [`LINE_TERMINATOR`].
    ///
    /// Short writes are continued until every byte has been accepted. A failed write is
    /// not retried.
    pub fn send_line(&mut self, text: &str) -> Result<(), Error> {
        let line = format!("{}{}", text, LINE_TERMINATOR);
        debug!("Writing line: {:?}", line);

        let write_error = |source| Error::Write {
            line: text.to_string(),
            source,
        };

        self.transport
            .write_all(line.as_bytes())
            .map_err(write_error)?;
        self.transport.flush().map_err(write_error)?;

        debug!(bytes = line.len(), "Line written.");
        Ok(())
    }

    /// Flush and release the transport.
    pub fn close(mut self) -> Result<W, Error> {
        self.transport
            .flush()
            .map_err(|source| Error::Flush { source })?;

        info!("Closed transport.");
        Ok(self.transport)
    }
}
