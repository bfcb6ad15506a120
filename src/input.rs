use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub fn read_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<u16>> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_addresses(content)
}

/// Parses whitespace separated decimal logical addresses.
///
/// The input is taken as raw bytes so that a token which is not valid UTF-8
/// is reported as an invalid address rather than an unreadable file.
pub fn parse_addresses<C: AsRef<[u8]>>(content: C) -> Result<Vec<u16>> {
    let mut addresses = Vec::new();
    for (line_number, line) in content.as_ref().split(|&b| b == b'\n').enumerate() {
        let tokens = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty());
        for token in tokens {
            let address = std::str::from_utf8(token)
                .ok()
                .and_then(|token| token.parse::<u16>().ok())
                .ok_or_else(|| Error::InvalidAddress {
                    token: String::from_utf8_lossy(token).into_owned(),
                    line: line_number + 1,
                })?;
            addresses.push(address);
        }
    }
    Ok(addresses)
}
