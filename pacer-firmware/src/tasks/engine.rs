//! Engine loop task
//!
//! Runs the pacer-core engine at a 1ms tick. Each iteration gathers
//! one [`InputFrame`] from the hardware, polls the engine, and fans the
//! outputs out to the collaborators. If an iteration overruns, the
//! engine's scheduler catches the affected tasks up on the following
//! iterations.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::gpio::Input;
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{ADC1, TIM1};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::usart::UartTx;
use embassy_time::{Duration, Instant, Ticker};

use pacer_core::engine::{ButtonEvents, Engine, InputFrame};
use pacer_core::joystick::AdcFrame;
use pacer_drivers::imu::Lsm6ds;

use crate::buttons::DebouncedButton;
use crate::buzzer::{BuzzerCommand, MelodyPlayer};
use crate::channels::DISPLAY_VIEW;
use crate::led::{GoalLeds, LedPattern};
use crate::serial;

/// Everything the engine loop owns
pub struct EngineHardware {
    pub adc: Adc<'static, ADC1>,
    pub pot: AnyAdcChannel<ADC1>,
    pub joy_y: AnyAdcChannel<ADC1>,
    pub joy_x: AnyAdcChannel<ADC1>,
    pub up_button: Input<'static>,
    pub down_button: Input<'static>,
    pub click: Input<'static>,
    pub leds: GoalLeds,
    pub buzzer_pwm: SimplePwm<'static, TIM1>,
    pub serial_tx: UartTx<'static, Blocking>,
    pub sensor: Lsm6ds<embassy_stm32::i2c::I2c<'static, Blocking>>,
}

#[embassy_executor::task]
pub async fn engine_task(mut hw: EngineHardware) {
    info!("Engine task started");

    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(1));

    let mut engine = Engine::new(0);
    let mut up = DebouncedButton::new();
    let mut down = DebouncedButton::new();
    let mut melody = MelodyPlayer::new();

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        let buttons = ButtonEvents {
            up: up.update(hw.up_button.is_low()),
            down: down.update(hw.down_button.is_low()),
            left: false,
            right: false,
        };

        let adc = AdcFrame {
            potentiometer: hw.adc.blocking_read(&mut hw.pot),
            y_axis: hw.adc.blocking_read(&mut hw.joy_y),
            x_axis: hw.adc.blocking_read(&mut hw.joy_x),
        };

        let frame = InputFrame {
            now_ms,
            buttons,
            adc,
            click_held: hw.click.is_low(),
        };

        let out = engine.poll(&frame, &mut hw.sensor);

        if let Some(view) = out.display {
            DISPLAY_VIEW.signal(view);
        }
        if let Some(record) = out.telemetry {
            serial::write_telemetry(&mut hw.serial_tx, &record);
        }
        if out.chime_start {
            info!("Step goal reached");
            melody.start(now_ms);
        }
        if let Some(progress) = out.led_progress {
            hw.leds.apply(LedPattern::from_progress(progress));
        }

        match melody.update(now_ms) {
            Some(BuzzerCommand::Tone(freq)) => {
                hw.buzzer_pwm.set_frequency(Hertz::hz(freq as u32));
                hw.buzzer_pwm.ch1().set_duty_cycle_percent(50);
                hw.buzzer_pwm.ch1().enable();
            }
            Some(BuzzerCommand::Silence) => {
                hw.buzzer_pwm.ch1().disable();
            }
            None => {}
        }
    }
}
