//! State shared by the main loop and the two periodic tasks.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

use crate::countdown::CountdownState;
use crate::digit_buffer::DigitBuffer;
use crate::mode::Mode;
use crate::relay::RelayCommand;

/// Everything that more than one flow of control touches.
#[derive(Debug)]
pub struct SharedCore {
    pub mode: Mode,
    pub buffer: DigitBuffer,
    pub countdown: CountdownState,
}

impl SharedCore {
    const fn new() -> Self {
        Self {
            mode: Mode::Countdown,
            buffer: DigitBuffer::empty(),
            countdown: CountdownState::new(),
        }
    }
}

/// Static for the appliance: one per device, created with [`SharedState::new_static`].
///
/// All reads and writes of [`SharedCore`] run inside a critical section, so the multiplexer can
/// never see a half-written buffer and the countdown tick can never interleave with a keypress.
pub struct SharedState {
    core: Mutex<RefCell<SharedCore>>,
    relay_requests: Signal<CriticalSectionRawMutex, RelayCommand>,
}

impl SharedState {
    #[must_use]
    pub const fn new_static() -> Self {
        Self {
            core: Mutex::new(RefCell::new(SharedCore::new())),
            relay_requests: Signal::new(),
        }
    }

    /// Runs `f` with exclusive access to the shared core.
    ///
    /// Keep `f` short: the display refresh waits for it.
    pub fn with<R>(&self, f: impl FnOnce(&mut SharedCore) -> R) -> R {
        critical_section::with(|cs| f(&mut self.core.borrow_ref_mut(cs)))
    }

    /// A consistent copy of what the multiplexer needs.
    #[must_use]
    pub fn snapshot(&self) -> (Mode, DigitBuffer) {
        self.with(|core| (core.mode, core.buffer))
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.with(|core| core.mode)
    }

    /// Replaces the whole digit buffer.
    pub fn set_buffer(&self, buffer: DigitBuffer) {
        self.with(|core| core.buffer = buffer);
    }

    /// Asks the countdown tick task, which owns the relay, to act on its next tick.
    pub fn request_relay(&self, command: RelayCommand) {
        self.relay_requests.signal(command);
    }

    pub(crate) fn take_relay_request(&self) -> Option<RelayCommand> {
        self.relay_requests.try_take()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new_static()
    }
}
