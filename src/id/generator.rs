//! # Identifier Generator
//!
//! `value = unix_seconds * SCALE + random`, with `random` drawn uniformly
//! from `[0, SCALE)` out of the OS CSPRNG and rendered in base 36.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::errors::{IdError, IdResult};
use crate::clock;

/// Width of the random component.
///
/// Must exceed the number of ids a deployment realistically creates within
/// one second while keeping the rendered text short.
pub const SCALE: u64 = 100_000_000;

const SCALE_U32: u32 = SCALE as u32;

/// Largest multiple of `SCALE` representable in a `u32`; draws at or above
/// it are rejected so the random component stays uniform.
const REJECTION_ZONE: u32 = (u32::MAX / SCALE_U32) * SCALE_U32;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A time-ordered identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(u64);

impl Id {
    /// Combine a timestamp and a random component
    pub fn from_parts(timestamp: u64, random: u64) -> IdResult<Self> {
        if random >= SCALE {
            return Err(IdError::Invalid(format!(
                "random component {} exceeds scale {}",
                random, SCALE
            )));
        }

        timestamp
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(random))
            .map(Id)
            .ok_or_else(|| IdError::Clock(format!("timestamp {} overflows identifier", timestamp)))
    }

    /// The decoded integer value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Unix seconds at generation time
    pub fn timestamp(&self) -> u64 {
        self.0 / SCALE
    }

    pub fn random_part(&self) -> u64 {
        self.0 % SCALE
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 36^13 > u64::MAX
        let mut buf = [0u8; 13];
        let mut pos = buf.len();
        let mut v = self.0;

        loop {
            pos -= 1;
            buf[pos] = DIGITS[(v % 36) as usize];
            v /= 36;
            if v == 0 {
                break;
            }
        }

        // Only ASCII digits were written
        f.write_str(std::str::from_utf8(&buf[pos..]).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // from_str_radix alone would accept a leading '+'
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdError::Invalid(s.to_string()));
        }

        u64::from_str_radix(s, 36)
            .map(Id)
            .map_err(|e| IdError::Invalid(format!("{}: {}", s, e)))
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for Id {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Random components already handed out for one second
#[derive(Debug, Clone, Default)]
struct IssuedSecond {
    second: u64,
    randoms: HashSet<u64>,
}

/// Identifier generator over a random source
///
/// Never returns the same id twice from one instance: a random component
/// already issued for the current second is redrawn. Separate instances
/// (other threads, other processes) are not coordinated.
#[derive(Debug, Clone)]
pub struct IdGenerator<R = OsRng> {
    rng: R,
    issued: IssuedSecond,
}

impl IdGenerator<OsRng> {
    /// Create a generator backed by the OS random source
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for IdGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> IdGenerator<R> {
    /// Create a generator over a caller-supplied random source
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            issued: IssuedSecond::default(),
        }
    }

    /// Generate an identifier for the current second
    pub fn generate(&mut self) -> IdResult<Id> {
        let now = clock::unix_now()?;
        self.generate_at(now)
    }

    /// Generate an identifier for the given Unix second
    pub fn generate_at(&mut self, unix_secs: u64) -> IdResult<Id> {
        if self.issued.second != unix_secs {
            self.issued.second = unix_secs;
            self.issued.randoms.clear();
        }

        if self.issued.randoms.len() as u64 >= SCALE {
            return Err(IdError::Exhausted(unix_secs));
        }

        loop {
            let random = self.random_component()?;
            if self.issued.randoms.insert(random) {
                return Id::from_parts(unix_secs, random);
            }
        }
    }

    fn random_component(&mut self) -> IdResult<u64> {
        let mut bytes = [0u8; 4];
        loop {
            self.rng.try_fill_bytes(&mut bytes)?;
            let draw = u32::from_le_bytes(bytes);
            if draw < REJECTION_ZONE {
                return Ok(u64::from(draw % SCALE_U32));
            }
        }
    }
}

thread_local! {
    static GENERATOR: RefCell<IdGenerator> = RefCell::new(IdGenerator::new());
}

/// Generate a new identifier from the OS random source and system clock.
///
/// Ids from the same thread never repeat. Across threads and processes
/// collisions are only made unlikely by the width of `SCALE`; nothing
/// coordinates them beyond the entropy source.
pub fn new_id() -> IdResult<Id> {
    GENERATOR.with(|generator| generator.borrow_mut().generate())
}
