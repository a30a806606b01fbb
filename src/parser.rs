//! CIDR text validation

use core::net;

use crate::base::{Cidr, NetworkAddress};
use crate::Error;

#[inline]
///Splits `text` into address and optional prefix parts at the first `/`
pub(crate) fn split_cidr(text: &str) -> (&str, Option<&str>) {
    match text.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (text, None),
    }
}

///Parses IPv4 or IPv6 address literal
pub fn parse_addr(text: &str) -> Result<net::IpAddr, Error> {
    text.parse().map_err(|_| Error::MalformedAddress {
        address: text.to_owned(),
    })
}

fn parse_prefix(cidr: &str, prefix: &str, bits_len: u8) -> Result<u8, Error> {
    match prefix.parse::<u8>() {
        Ok(result) if result <= bits_len && !prefix.starts_with('+') => Ok(result),
        _ => Err(Error::InvalidPrefix {
            cidr: cidr.to_owned(),
            prefix: prefix.to_owned(),
        }),
    }
}

///Parses block of the family `A`
///
///Checks are performed in the following order:
///- Address part must be valid IPv4 or IPv6 literal;
///- Prefix must be present when `require_prefix` is set, otherwise missing prefix means single address;
///- Address must belong to the family `A`;
///- Prefix must not exceed address length.
pub fn parse_block<A: NetworkAddress>(text: &str, require_prefix: bool) -> Result<Cidr<A>, Error> {
    let (addr_text, prefix_text) = split_cidr(text);
    let addr = parse_addr(addr_text)?;

    if prefix_text.is_none() && require_prefix {
        return Err(Error::MissingPrefix {
            cidr: text.to_owned(),
        });
    }

    let addr = match A::from_ip(addr) {
        Some(addr) => addr,
        None => return Err(Error::FamilyMismatch {
            cidr: text.to_owned(),
            expected: A::FAMILY,
        }),
    };

    let prefix = match prefix_text {
        Some(prefix) => parse_prefix(text, prefix, A::BITS_LEN)?,
        None => A::BITS_LEN,
    };

    Cidr::new(addr, prefix).ok_or_else(|| Error::InvalidPrefix {
        cidr: text.to_owned(),
        prefix: prefix.to_string(),
    })
}
