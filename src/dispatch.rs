//! Backend selection
//!
//! The first call to [`calculator`] probes the CPU and binds either the
//! hardware or the software calculator; every later call returns the same
//! handle. With the `std` feature the probe happens at runtime, without it
//! the choice follows the compile-time target features.

use core::fmt;

use crate::accumulator::Accumulator;
use crate::hardware::Hardware;
use crate::software::Software;

/// Environment variable that forces the software backend when set to a
/// non-empty value other than `0`
pub const FORCE_SOFTWARE_ENV: &str = "CHUNKCRC_FORCE_SOFTWARE";

/// A CRC32C implementation
///
/// Implementations thread an [`Accumulator`] through any number of
/// [`update`](Calculator::update) calls; the result of
/// [`finalize`](Calculator::finalize) depends only on the concatenated input.
/// An accumulator may be handed from one calculator to another; bytes still
/// buffered by one are folded in by the next.
pub trait Calculator: Send + Sync + fmt::Debug {
    /// Which implementation this is
    fn backend(&self) -> Backend;

    /// Fold `data` into the accumulator
    fn update(&self, acc: &mut Accumulator, data: &[u8]);

    /// Produce the checksum of everything folded so far
    fn finalize(&self, acc: &Accumulator) -> u32;

    /// Checksum a sequence of chunks in one call
    #[inline]
    fn checksum<I>(&self, chunks: I) -> u32
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        checksum_with(self, chunks)
    }
}

/// Checksum a sequence of chunks with an explicit calculator
#[inline]
pub fn checksum_with<C, I>(calc: &C, chunks: I) -> u32
where
    C: Calculator + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut acc = Accumulator::new();

    for chunk in chunks {
        calc.update(&mut acc, chunk.as_ref());
    }

    calc.finalize(&acc)
}

/// Implementation bound by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Slice-by-16 lookup tables
    Software,
    /// x86 SSE4.2 `crc32` instruction
    Sse42,
    /// ARMv8 CRC extension
    ArmCrc,
}

impl Backend {
    /// Short lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            Backend::Software => "software",
            Backend::Sse42 => "sse4.2",
            Backend::ArmCrc => "arm-crc",
        }
    }

    /// True for the instruction-backed variants
    pub const fn is_hardware(&self) -> bool {
        !matches!(self, Backend::Software)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static SOFTWARE: Software = Software;

#[cfg(feature = "std")]
static CALCULATOR: std::sync::OnceLock<&'static dyn Calculator> = std::sync::OnceLock::new();

/// The calculator bound for this process
#[inline]
pub fn calculator() -> &'static dyn Calculator {
    #[cfg(feature = "std")]
    {
        *CALCULATOR.get_or_init(select)
    }

    #[cfg(not(feature = "std"))]
    {
        match Hardware::detect_static() {
            Some(hw) => hw as &'static dyn Calculator,
            None => &SOFTWARE,
        }
    }
}

/// The backend bound for this process
#[inline]
pub fn backend() -> Backend {
    calculator().backend()
}

#[cfg(feature = "std")]
fn select() -> &'static dyn Calculator {
    if forced(std::env::var_os(FORCE_SOFTWARE_ENV).as_deref()) {
        log::info!("{FORCE_SOFTWARE_ENV} set, using software CRC32C");
        return &SOFTWARE;
    }

    match Hardware::detect_static() {
        Some(hw) => {
            log::debug!(
                "CRC32C backend: {} ({}-bit folding)",
                hw.backend(),
                if hw.wide() { 64 } else { 8 }
            );
            hw as &'static dyn Calculator
        }
        None => {
            log::debug!("CRC32C backend: software (no CPU support)");
            &SOFTWARE
        }
    }
}

#[cfg(feature = "std")]
fn forced(value: Option<&std::ffi::OsStr>) -> bool {
    match value {
        Some(v) => !v.is_empty() && v != "0",
        None => false,
    }
}
