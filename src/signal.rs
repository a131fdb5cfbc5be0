// SPDX-License-Identifier: MPL-2.0

//! Cooperative shutdown on SIGINT/SIGTERM.
//!
//! The playback loop has no natural end state; it polls a flag once per
//! iteration so the process can leave the loop cleanly when a service manager
//! or the terminal asks it to stop.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn raise_shutdown(_signal: nix::libc::c_int) {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Install SIGINT and SIGTERM handlers and return the flag they raise.
pub fn install_shutdown_flag() -> eyre::Result<&'static AtomicBool> {
    let action = SigAction::new(
        SigHandler::Handler(raise_shutdown),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe {
        sigaction(Signal::SIGINT, &action)?;
        sigaction(Signal::SIGTERM, &action)?;
    }
    Ok(&SHUTDOWN)
}
