//! IP block utilities
//!
//!- [BlockCalculator](calculator/struct.BlockCalculator.html) computes free aligned blocks within parent block, excluding taken blocks;
//!- [expand](expander/fn.expand.html) unrolls bracket pattern such as `10.0.[1,2,5-7].0/24` into list of addresses.

#![warn(missing_docs)]
#![allow(clippy::style)]

mod error;
pub use error::Error;
mod parser;
pub use parser::{parse_addr, parse_block};
pub mod base;
pub mod v4;
pub mod v6;
pub mod range;
pub mod calculator;
pub use calculator::{free_blocks, BlockCalculator, Options};
pub mod expander;
pub use expander::{expand, expand_version, Expansion, VersionedExpansion};

use core::{fmt, net};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IP address family
pub enum Family {
    ///IPv4
    V4,
    ///IPv6
    V6,
}

impl Family {
    #[inline(always)]
    ///Returns number of bits within address of the family
    pub const fn bits_len(self) -> u8 {
        match self {
            Self::V4 => v4::BITS_LEN,
            Self::V6 => v6::BITS_LEN,
        }
    }

    #[inline(always)]
    ///Returns IP version number
    pub const fn version(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }

    #[inline]
    ///Returns family by IP version number
    pub fn from_version(version: u8) -> Result<Self, Error> {
        match version {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            version => Err(Error::InvalidFamily { version }),
        }
    }

    #[inline]
    ///Determines family of the textual address, which is IPv6 if it contains `:`
    pub fn detect(text: &str) -> Self {
        if text.contains(':') {
            Self::V6
        } else {
            Self::V4
        }
    }
}

impl TryFrom<u8> for Family {
    type Error = Error;

    #[inline(always)]
    fn try_from(version: u8) -> Result<Self, Self::Error> {
        Self::from_version(version)
    }
}

impl fmt::Display for Family {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => fmt.write_str("IPv4"),
            Self::V6 => fmt.write_str("IPv6"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///CIDR representation
pub enum Cidr {
    ///IPv4 block
    V4(v4::Cidr),
    ///IPv6 block
    V6(v6::Cidr),
}

impl Cidr {
    ///Number of bits within ipv4 address
    pub const IPV4_BITS: u8 = v4::BITS_LEN;
    ///Number of bits within ipv6 address
    pub const IPV6_BITS: u8 = v6::BITS_LEN;

    #[inline]
    ///Constructs new CIDR verifying that `prefix` fits provided `addr`
    ///
    ///Returns `None` if `prefix` is greater than address length
    pub fn new(addr: net::IpAddr, prefix: u8) -> Option<Self> {
        match addr {
            net::IpAddr::V4(addr) => v4::Cidr::new(addr, prefix).map(Self::V4),
            net::IpAddr::V6(addr) => v6::Cidr::new(addr, prefix).map(Self::V6),
        }
    }

    #[inline(always)]
    ///Returns family of the block
    pub const fn family(&self) -> Family {
        match self {
            Self::V4(_) => Family::V4,
            Self::V6(_) => Family::V6,
        }
    }

    #[inline(always)]
    ///Returns address
    pub const fn addr(&self) -> net::IpAddr {
        match self {
            Self::V4(cidr) => net::IpAddr::V4(cidr.addr()),
            Self::V6(cidr) => net::IpAddr::V6(cidr.addr()),
        }
    }

    #[inline(always)]
    ///Returns prefix
    pub const fn prefix(&self) -> u8 {
        match self {
            Self::V4(cidr) => cidr.prefix(),
            Self::V6(cidr) => cidr.prefix(),
        }
    }

    #[inline(always)]
    ///Returns network address, which is lowest possible address within CIDR block
    pub fn network_addr(&self) -> net::IpAddr {
        self.addr()
    }

    #[inline(always)]
    ///Returns broadcast address, which is highest possible address within CIDR block
    pub fn broadcast_addr(&self) -> net::IpAddr {
        match self {
            Self::V4(cidr) => net::IpAddr::V4(cidr.broadcast_addr()),
            Self::V6(cidr) => net::IpAddr::V6(cidr.broadcast_addr()),
        }
    }

    #[inline(always)]
    ///Returns number of addresses within the block
    pub fn size(&self) -> u128 {
        match self {
            Self::V4(cidr) => cidr.size(),
            Self::V6(cidr) => cidr.size(),
        }
    }

    #[inline]
    ///Checks if a given `addr` is contained within `self`
    pub fn contains(&self, addr: net::IpAddr) -> bool {
        match (self, addr) {
            (Self::V4(cidr), net::IpAddr::V4(addr)) => cidr.contains(addr),
            (Self::V6(cidr), net::IpAddr::V6(addr)) => cidr.contains(addr),
            _ => false,
        }
    }

    #[inline]
    ///Checks if every address of `other` is contained within `self`
    ///
    ///Blocks of different families never contain each other
    pub fn contains_block(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::V4(cidr), Self::V4(other)) => cidr.contains_block(other),
            (Self::V6(cidr), Self::V6(other)) => cidr.contains_block(other),
            _ => false,
        }
    }

    #[inline]
    ///Checks if `self` and `other` share at least one address
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::V4(cidr), Self::V4(other)) => cidr.overlaps(other),
            (Self::V6(cidr), Self::V6(other)) => cidr.overlaps(other),
            _ => false,
        }
    }
}

impl From<v4::Cidr> for Cidr {
    #[inline(always)]
    fn from(cidr: v4::Cidr) -> Self {
        Self::V4(cidr)
    }
}

impl From<v6::Cidr> for Cidr {
    #[inline(always)]
    fn from(cidr: v6::Cidr) -> Self {
        Self::V6(cidr)
    }
}

impl fmt::Display for Cidr {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(cidr) => fmt::Display::fmt(cidr, fmt),
            Self::V6(cidr) => fmt::Display::fmt(cidr, fmt),
        }
    }
}

#[inline]
///Parses [Cidr](enum.Cidr.html) from the input `text`
///
///Family is determined by presence of `:`.
///
///If `prefix` is missing, prefix is assumed to be only for single IP:
///- In case of IPv4 it means prefix is assumed to be 32
///- In case of IPv6 it means prefix is assumed to be 128
pub fn parse_cidr(text: &str) -> Result<Cidr, Error> {
    match Family::detect(text) {
        Family::V4 => parse_block::<net::Ipv4Addr>(text, false).map(Cidr::V4),
        Family::V6 => parse_block::<net::Ipv6Addr>(text, false).map(Cidr::V6),
    }
}
