//! Candidate-port scanning for the firmware link.

use serialport::SerialPort;
use tracing::{debug, info, warn};

use crate::{SerialResult, BAUD_RATE, PORT_TIMEOUT};

/// Device-path prefix the firmware's USB CDC interface enumerates under.
pub const CANDIDATE_PREFIX: &str = "/dev/ttyACM";

/// True when a system port path looks like the firmware device.
pub fn is_candidate(path: &str) -> bool {
    path.starts_with(CANDIDATE_PREFIX)
}

/// Scan candidate device paths and open the first that accepts our settings.
///
/// Returns `None` when no device is present; the caller runs disconnected.
pub fn discover_port() -> Option<Box<dyn SerialPort>> {
    let ports = match serialport::available_ports() {
        Ok(ports) => ports,
        Err(e) => {
            warn!("Port enumeration failed: {e}");
            return None;
        }
    };

    for info in ports {
        if !is_candidate(&info.port_name) {
            continue;
        }
        match open_port(&info.port_name) {
            Ok(port) => {
                info!(port = %info.port_name, "Serial link established");
                return Some(port);
            }
            Err(e) => {
                debug!(port = %info.port_name, "Candidate rejected: {e}");
            }
        }
    }

    None
}

/// Open one named device at the firmware's settings.
pub fn open_port(path: &str) -> SerialResult<Box<dyn SerialPort>> {
    let port = serialport::new(path, BAUD_RATE)
        .timeout(PORT_TIMEOUT)
        .open()?;
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_filter_matches_acm_devices() {
        assert!(is_candidate("/dev/ttyACM0"));
        assert!(is_candidate("/dev/ttyACM17"));
        assert!(!is_candidate("/dev/ttyUSB0"));
        assert!(!is_candidate("/dev/ttyS0"));
        assert!(!is_candidate("COM3"));
    }
}
