//! Error module

use crate::Family;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
///Possible errors while computing free blocks or expanding ranges
///
///Each variant carries the offending literal as it was supplied
pub enum Error {
    ///Address part is neither IPv4 nor IPv6 literal
    #[error("{address} does not appear to be an IPv4 or IPv6 block")]
    MalformedAddress {
        ///Address part of the input
        address: String,
    },
    ///Parent block is not in CIDR notation
    #[error("Address \"{cidr}\" MUST be in CIDR notation")]
    MissingPrefix {
        ///Supplied block
        cidr: String,
    },
    ///Prefix is not a number or is greater than address length
    #[error("Prefix \"{prefix}\" of \"{cidr}\" is not valid")]
    InvalidPrefix {
        ///Supplied block
        cidr: String,
        ///Prefix part of the block
        prefix: String,
    },
    ///Taken block belongs to the family other than parent's one
    #[error("Address \"{cidr}\" is not a valid address")]
    FamilyMismatch {
        ///Supplied block
        cidr: String,
        ///Family of the parent block
        expected: Family,
    },
    ///Minimum prefix length is outside of `1..=BITS_LEN`
    #[error("{family} prefix length \"{prefix}\" is not valid")]
    InvalidConfiguration {
        ///Family the prefix is configured for
        family: Family,
        ///Rejected prefix length
        prefix: u8,
    },
    ///IP version is neither 4 nor 6
    #[error("Invalid IP family version {version}")]
    InvalidFamily {
        ///Rejected version
        version: u8,
    },
}
