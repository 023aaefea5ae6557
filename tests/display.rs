//! Host-level tests for the display multiplexer and the GPIO segment display.

mod common;

use common::{DisplayCall, MockPin, RecordingDisplay, pins};
use timer_calc::{
    DigitBuffer, DisplayAdapter, DisplayMultiplexer, DisplayWiring, Error, Glyph, Mode,
    OutputArray, SegmentDisplay, SharedState, format,
};

/// Runs one full scan and returns what each position showed.
fn scan(shared: &SharedState) -> [Option<(Glyph, bool)>; 8] {
    let mut multiplexer = DisplayMultiplexer::new();
    let mut shown = [None; 8];
    for slot in &mut shown {
        let mut display = RecordingDisplay::default();
        multiplexer.step(shared, &mut display).expect("recording never fails");
        assert_eq!(display.calls.first(), Some(&DisplayCall::Blank));
        let lit = display.lit();
        assert!(lit.len() <= 1, "more than one position lit in one step");
        *slot = lit.first().map(|&(_, glyph, decimal_point)| (glyph, decimal_point));
    }
    assert_eq!(multiplexer.position(), 0);
    shown
}

fn shared_with(mode: Mode, buffer: DigitBuffer) -> SharedState {
    let shared = SharedState::new_static();
    shared.with(|core| {
        core.mode = mode;
        core.buffer = buffer;
    });
    shared
}

#[test]
fn positions_cycle_in_order() {
    let shared = shared_with(Mode::Countdown, DigitBuffer::countdown([0; 4], 8));
    let mut multiplexer = DisplayMultiplexer::new();
    let mut display = RecordingDisplay::default();
    for _ in 0..10 {
        multiplexer.step(&shared, &mut display).expect("recording never fails");
    }
    let positions: Vec<u8> = display.lit().iter().map(|&(position, _, _)| position).collect();
    assert_eq!(positions, [0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
}

#[test]
fn idle_countdown_is_single_zero() {
    let shared = SharedState::new_static();
    let shown = scan(&shared);
    assert_eq!(shown[0], Some((Glyph::Digit(0), false)));
    assert!(shown[1..].iter().all(Option::is_none));
}

#[test]
fn countdown_separators_on_two_four_six() {
    let shared = shared_with(Mode::Countdown, DigitBuffer::countdown([78, 56, 34, 12], 8));
    let shown = scan(&shared);
    let expected = [
        (8, false),
        (7, false),
        (6, true),
        (5, false),
        (4, true),
        (3, false),
        (2, true),
        (1, false),
    ];
    for (slot, (digit, decimal_point)) in shown.iter().zip(expected) {
        assert_eq!(*slot, Some((Glyph::Digit(digit), decimal_point)));
    }
}

#[test]
fn calculator_negative_value() {
    let shared = shared_with(Mode::Calculator, format(-3.5).expect("fits"));
    let shown = scan(&shared);
    assert_eq!(shown[0], Some((Glyph::Digit(5), false)));
    assert_eq!(shown[1], Some((Glyph::Digit(3), true)));
    assert_eq!(shown[2], Some((Glyph::Minus, false)));
    assert!(shown[3..].iter().all(Option::is_none));
}

#[test]
fn calculator_error() {
    let shared = shared_with(Mode::Calculator, DigitBuffer::error());
    let shown = scan(&shared);
    assert_eq!(
        shown[..3],
        [
            Some((Glyph::R, false)),
            Some((Glyph::R, false)),
            Some((Glyph::E, false))
        ]
    );
    assert!(shown[3..].iter().all(Option::is_none));
}

#[test]
fn calculator_ignores_countdown_separators() {
    let shared = shared_with(Mode::Calculator, format(1_234_567.0).expect("fits"));
    let shown = scan(&shared);
    assert!(shown[..7].iter().all(|slot| matches!(slot, Some((_, false)))));
    assert_eq!(shown[7], None);
}

#[test]
fn seven_digit_negative_fits_sign() {
    let shared = shared_with(Mode::Calculator, format(-1_234_567.0).expect("fits"));
    let shown = scan(&shared);
    assert_eq!(shown[7], Some((Glyph::Minus, false)));
}

struct Lines {
    cells: [MockPin; 8],
    segments: [MockPin; 8],
}

impl Lines {
    fn levels(pins: &[MockPin; 8]) -> [bool; 8] {
        core::array::from_fn(|index| pins[index].is_high_level())
    }
}

fn segment_display(wiring: DisplayWiring) -> (SegmentDisplay<MockPin, MockPin>, Lines) {
    let (cells, cell_lines) = pins::<8>();
    let (segments, segment_lines) = pins::<8>();
    let display = SegmentDisplay::new(OutputArray::new(cells), OutputArray::new(segments), wiring);
    (
        display,
        Lines {
            cells: cell_lines,
            segments: segment_lines,
        },
    )
}

#[test]
fn common_anode_levels() {
    let (mut display, lines) = segment_display(DisplayWiring::COMMON_ANODE);
    display.blank().expect("mock pins never fail");
    assert_eq!(Lines::levels(&lines.cells), [false; 8]);
    assert_eq!(Lines::levels(&lines.segments), [true; 8]);

    // "1." lights B, C and the decimal point, which sink low on a common-anode part.
    display.light(3, Glyph::Digit(1), true).expect("mock pins never fail");
    assert_eq!(
        Lines::levels(&lines.cells),
        [false, false, false, true, false, false, false, false]
    );
    assert_eq!(
        Lines::levels(&lines.segments),
        [true, false, false, true, true, true, true, false]
    );
}

#[test]
fn common_cathode_levels() {
    let (mut display, lines) = segment_display(DisplayWiring::COMMON_CATHODE);
    display.blank().expect("mock pins never fail");
    assert_eq!(Lines::levels(&lines.cells), [true; 8]);
    assert_eq!(Lines::levels(&lines.segments), [false; 8]);

    display.light(0, Glyph::Minus, false).expect("mock pins never fail");
    assert_eq!(
        Lines::levels(&lines.cells),
        [false, true, true, true, true, true, true, true]
    );
    assert_eq!(
        Lines::levels(&lines.segments),
        [false, false, false, false, false, false, true, false]
    );
}

#[test]
fn position_past_the_display_is_an_error() {
    let (mut display, _lines) = segment_display(DisplayWiring::COMMON_ANODE);
    assert_eq!(
        display.light(8, Glyph::Digit(0), false),
        Err(Error::IndexOutOfBounds)
    );
}
