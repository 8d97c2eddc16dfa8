//! Debug telemetry framing
//!
//! The core produces bare `ACC_X:..,MAG:..` lines; the wire frame adds
//! the `>` prefix and CRLF that the host-side plotter expects.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::UartTx;

use pacer_core::telemetry::TelemetryRecord;

/// Write one framed telemetry line
///
/// Best-effort: a debug stream is not worth stalling the engine over,
/// so transmit errors are dropped.
pub fn write_telemetry(tx: &mut UartTx<'static, Blocking>, record: &TelemetryRecord) {
    let line = record.format_line();
    let _ = tx.blocking_write(b">");
    let _ = tx.blocking_write(line.as_bytes());
    let _ = tx.blocking_write(b"\r\n");
}
