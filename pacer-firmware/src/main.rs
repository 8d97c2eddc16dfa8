//! Pacer - Wearable Step Counter Firmware
//!
//! Main firmware binary for STM32C031-based boards with an LSM6DS
//! accelerometer and an analog joystick shield. All behavioral logic
//! lives in pacer-core; this binary wires the hardware to the engine.
//!
//! Pin map:
//! - ADC1: PA0 potentiometer, PA1 joystick Y, PA4 joystick X
//! - Buttons: PB0 up, PB1 down (active low), PB2 joystick click
//! - LEDs: PB3 right, PB4 down, PB5 left, PA6 partial (TIM3 CH1 PWM)
//! - Buzzer: PA8 (TIM1 CH1 PWM)
//! - USART2 PA2: debug telemetry stream
//! - USART1 PB6: serial display
//! - I2C1 PB8/PB9: LSM6DS accelerometer

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{Config as UartConfig, UartTx};
use embassy_stm32::{i2c, peripherals};
use {defmt_rtt as _, panic_probe as _};

use pacer_drivers::imu::Lsm6ds;

use crate::led::GoalLeds;
use crate::tasks::engine::{engine_task, EngineHardware};
use crate::tasks::display_tx::display_task;

mod buttons;
mod buzzer;
mod channels;
mod display;
mod led;
mod serial;
mod tasks;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pacer firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Analog inputs
    let adc = Adc::new(p.ADC1);
    let pot = p.PA0.degrade_adc();
    let joy_y = p.PA1.degrade_adc();
    let joy_x = p.PA4.degrade_adc();

    // Buttons and joystick click, all active low
    let up_button = Input::new(p.PB0, Pull::Up);
    let down_button = Input::new(p.PB1, Pull::Up);
    let click = Input::new(p.PB2, Pull::Up);

    // Goal progress LEDs
    let leds = GoalLeds::new(
        Output::new(p.PB3, Level::Low, Speed::Low),
        Output::new(p.PB4, Level::Low, Speed::Low),
        Output::new(p.PB5, Level::Low, Speed::Low),
        SimplePwm::new(
            p.TIM3,
            Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
            None,
            None,
            None,
            Hertz::khz(1),
            CountingMode::EdgeAlignedUp,
        ),
    );

    // Buzzer PWM; the frequency is retuned per melody note
    let buzzer_pwm = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new_ch1(p.PA8, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz::hz(440),
        CountingMode::EdgeAlignedUp,
    );

    // Debug telemetry over the ST-Link virtual COM port
    let serial_tx = UartTx::new_blocking(p.USART2, p.PA2, UartConfig::default())
        .expect("USART2 config");

    // External serial display
    let display_uart = UartTx::new_blocking(p.USART1, p.PB6, UartConfig::default())
        .expect("USART1 config");

    // Accelerometer
    let bus = i2c::I2c::new_blocking(p.I2C1, p.PB8, p.PB9, Hertz::khz(100), Default::default());
    let mut sensor = Lsm6ds::new(bus);
    if sensor.init().is_err() {
        // The engine tolerates a dead sensor; buttons and test mode
        // still work without one
        warn!("LSM6DS init failed, motion detection unavailable");
    }

    let hw = EngineHardware {
        adc,
        pot,
        joy_y,
        joy_x,
        up_button,
        down_button,
        click,
        leds,
        buzzer_pwm,
        serial_tx,
        sensor,
    };

    unwrap!(spawner.spawn(engine_task(hw)));
    unwrap!(spawner.spawn(display_task(display_uart)));

    info!("Tasks spawned, engine running");
}
