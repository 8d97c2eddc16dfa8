//! Display transmit task
//!
//! Waits for view updates from the engine and writes rendered frames
//! to the display UART. UART writes block, which is why this runs
//! outside the engine loop.

use defmt::*;
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::UartTx;

use crate::channels::DISPLAY_VIEW;
use crate::display::render;

#[embassy_executor::task]
pub async fn display_task(mut tx: UartTx<'static, Blocking>) {
    info!("Display task started");

    loop {
        let view = DISPLAY_VIEW.wait().await;
        let frame = render(&view);
        if tx.blocking_write(frame.as_bytes()).is_err() {
            warn!("Display write failed");
        }
    }
}
