//! Vehicle document and plate generation

use rand::Rng;
use serde::{Deserialize, Serialize};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NONZERO_DIGITS: &[u8] = b"123456789";

/// A registered vehicle, keyed by its plate number
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_number: String,
}

impl Vehicle {
    pub fn new(vehicle_number: impl Into<String>) -> Self {
        Self {
            vehicle_number: vehicle_number.into(),
        }
    }

    /// Bytes fed to the membership filter
    pub fn record(&self) -> Vec<u8> {
        self.vehicle_number.as_bytes().to_vec()
    }
}

/// Generate a sample plate of the form `LL-DD-LL-NNNN`
///
/// Letters are A-Z, the two middle digits are 1-9 and the trailing number
/// is 1000-9999, e.g. `AB-12-CD-3456`.
pub fn generate_plate<R: Rng>(rng: &mut R) -> String {
    let mut letter = || LETTERS[rng.gen_range(0..LETTERS.len())] as char;
    let (a, b) = (letter(), letter());
    let (e, f) = (letter(), letter());

    let mut digit = || NONZERO_DIGITS[rng.gen_range(0..NONZERO_DIGITS.len())] as char;
    let (c, d) = (digit(), digit());

    let number: u16 = rng.gen_range(1000..=9999);

    format!("{a}{b}-{c}{d}-{e}{f}-{number}")
}
