//! Inter-task communication
//!
//! Display views flow from the engine task to the display task through
//! a signal; only the latest view matters, so a missed frame is
//! replaced rather than queued.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use pacer_core::engine::DisplayView;

pub static DISPLAY_VIEW: Signal<CriticalSectionRawMutex, DisplayView> = Signal::new();
