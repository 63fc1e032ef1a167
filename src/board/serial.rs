//! Diagnostic serial console (TX only).

use defmt::warn;
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::UarteTx;

use wash_panel::touch::DiagnosticSink;
use wash_panel::Error;

pub struct UartDiagnostics {
    tx: UarteTx<'static, UARTE0>,
}

impl UartDiagnostics {
    pub fn new(tx: UarteTx<'static, UARTE0>) -> Self {
        Self { tx }
    }
}

impl DiagnosticSink for UartDiagnostics {
    fn emit(&mut self, line: &str) {
        if self.tx.blocking_write(line.as_bytes()).is_err() {
            warn!("Serial: {}", Error::Serial);
        }
    }
}
