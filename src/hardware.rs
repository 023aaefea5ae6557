//! Pin map for the Pico board.
//!
//! | Signal                          | Pins          |
//! |---------------------------------|---------------|
//! | Digit select, position 0..7     | GP0..GP7      |
//! | Segments A..G, decimal point    | GP8..GP15     |
//! | Keypad rows 0..3 (driven)       | GP16..GP19    |
//! | Keypad columns 0..3 (pulled up) | GP20..22, 26  |
//! | Relay                           | GP25          |
//! | Timer / calculator selector     | GP27 / GP28   |

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Delay;

use crate::display::{DisplayWiring, OutputArray, SegmentDisplay};
use crate::keypad::Keypad4x4;
use crate::mode::ModeSwitch;
use crate::relay::RelayPin;

pub type BoardDisplay = SegmentDisplay<Output<'static>, Output<'static>>;
pub type BoardKeypad = Keypad4x4<Output<'static>, Input<'static>, Delay>;
pub type BoardRelay = RelayPin<Output<'static>>;
pub type BoardModeSwitch = ModeSwitch<Input<'static>>;

pub struct Hardware {
    pub display: BoardDisplay,
    pub keypad: BoardKeypad,
    pub relay: BoardRelay,
    pub modes: BoardModeSwitch,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        // Common anode: cells start LOW (off), segments start HIGH (off).
        let cells = OutputArray::new([
            Output::new(peripherals.PIN_0, Level::Low),
            Output::new(peripherals.PIN_1, Level::Low),
            Output::new(peripherals.PIN_2, Level::Low),
            Output::new(peripherals.PIN_3, Level::Low),
            Output::new(peripherals.PIN_4, Level::Low),
            Output::new(peripherals.PIN_5, Level::Low),
            Output::new(peripherals.PIN_6, Level::Low),
            Output::new(peripherals.PIN_7, Level::Low),
        ]);

        let segments = OutputArray::new([
            Output::new(peripherals.PIN_8, Level::High),
            Output::new(peripherals.PIN_9, Level::High),
            Output::new(peripherals.PIN_10, Level::High),
            Output::new(peripherals.PIN_11, Level::High),
            Output::new(peripherals.PIN_12, Level::High),
            Output::new(peripherals.PIN_13, Level::High),
            Output::new(peripherals.PIN_14, Level::High),
            Output::new(peripherals.PIN_15, Level::High),
        ]);

        let display = SegmentDisplay::new(cells, segments, DisplayWiring::COMMON_ANODE);

        let rows = [
            Output::new(peripherals.PIN_16, Level::High),
            Output::new(peripherals.PIN_17, Level::High),
            Output::new(peripherals.PIN_18, Level::High),
            Output::new(peripherals.PIN_19, Level::High),
        ];
        let columns = [
            Input::new(peripherals.PIN_20, Pull::Up),
            Input::new(peripherals.PIN_21, Pull::Up),
            Input::new(peripherals.PIN_22, Pull::Up),
            Input::new(peripherals.PIN_26, Pull::Up),
        ];
        let keypad = Keypad4x4::new(rows, columns, Delay);

        let relay = RelayPin::new(Output::new(peripherals.PIN_25, Level::Low));

        // The selector has external pull-downs.
        let modes = ModeSwitch::new(
            Input::new(peripherals.PIN_28, Pull::None),
            Input::new(peripherals.PIN_27, Pull::None),
        );

        Self {
            display,
            keypad,
            relay,
            modes,
        }
    }
}
