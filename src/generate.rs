//! Random values for generated variables.

use rand::Rng;
use serde::Deserialize;

/// Character class a generated value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Charset {
    Hex,
    Base64,
    UrlSafe,
    Numeric,
    Distinguishable,
    AsciiPrintable,
    Alphanumeric,
}

impl Charset {
    fn characters(self) -> &'static [u8] {
        match self {
            Charset::Hex => b"0123456789abcdef",
            Charset::Base64 => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/"
            }
            Charset::UrlSafe => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~"
            }
            Charset::Numeric => b"0123456789",
            Charset::Distinguishable => b"CDEHKMPRTUWXY012458",
            Charset::AsciiPrintable => {
                b"!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~"
            }
            Charset::Alphanumeric => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"
            }
        }
    }

    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.characters().contains(&(c as u8))
    }
}

/// Produces a random string of `length` characters drawn from `charset`.
pub fn random_string(charset: Charset, length: usize) -> String {
    let characters = charset.characters();
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| characters[rng.gen_range(0..characters.len())] as char)
        .collect()
}
