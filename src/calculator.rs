//! Free blocks calculator
//!
//!Computes the best aligned blocks within a parent block, excluding taken blocks or addresses.
//!The best block is the one that has the most free addresses in it, bounded by minimum prefix length.
//!
//!## Usage
//!
//!```rust
//!use ip_blocks::BlockCalculator;
//!
//!let calculator = BlockCalculator::new();
//!let free = calculator.compute("192.168.0.0/24", &["192.168.0.64/28"]).expect("valid input");
//!assert_eq!(free, ["192.168.0.0/26", "192.168.0.80/28", "192.168.0.96/27", "192.168.0.128/25"]);
//!```

use core::net;

use crate::base::{Cidr, NetworkAddress};
use crate::{parser, range, Error, Family};

///Default minimum prefix length of IPv4 free block
pub const DEFAULT_IPV4_MINIMUM_PREFIX: u8 = 8;
///Default minimum prefix length of IPv6 free block
pub const DEFAULT_IPV6_MINIMUM_PREFIX: u8 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
///Calculation options
///
///Options are immutable, each `with_*` method returns modified copy
pub struct Options {
    ipv4_minimum_prefix: u8,
    ipv6_minimum_prefix: u8,
    split_empty_root: u8,
}

impl Options {
    #[inline]
    ///Creates default options
    pub const fn new() -> Self {
        Self {
            ipv4_minimum_prefix: DEFAULT_IPV4_MINIMUM_PREFIX,
            ipv6_minimum_prefix: DEFAULT_IPV6_MINIMUM_PREFIX,
            split_empty_root: 0,
        }
    }

    ///Sets minimum prefix length of free blocks for each family
    ///
    ///For example, free IPv4 range `10.0.0.0-10.0.0.31` is reported as single `10.0.0.0/27` by default,
    ///while minimum prefix `30` reports it as eight `/30` blocks.
    ///
    ///Returns error if prefix is outside of `1..=32` for IPv4 or `1..=128` for IPv6
    pub fn with_minimum_prefix_length(self, ipv4: u8, ipv6: u8) -> Result<Self, Error> {
        for (family, prefix) in [(Family::V4, ipv4), (Family::V6, ipv6)] {
            if !(1..=family.bits_len()).contains(&prefix) {
                return Err(Error::InvalidConfiguration {
                    family,
                    prefix,
                });
            }
        }

        Ok(Self {
            ipv4_minimum_prefix: ipv4,
            ipv6_minimum_prefix: ipv6,
            ..self
        })
    }

    #[inline]
    ///Sets prefix offset to split parent block by, when there are no taken blocks within it
    ///
    ///- `192.168.0.0/24` and `0` => `192.168.0.0/24`
    ///- `192.168.0.0/24` and `1` => `192.168.0.0/25, 192.168.0.128/25`
    ///- `192.168.0.0/24` and `2` => `192.168.0.0/26, 192.168.0.64/26, 192.168.0.128/26, 192.168.0.192/26`
    pub const fn with_split_empty_root(self, offset: u8) -> Self {
        Self {
            split_empty_root: offset,
            ..self
        }
    }

    #[inline]
    ///Returns minimum prefix length of free blocks within `family`
    pub const fn minimum_prefix_length(&self, family: Family) -> u8 {
        match family {
            Family::V4 => self.ipv4_minimum_prefix,
            Family::V6 => self.ipv6_minimum_prefix,
        }
    }

    #[inline(always)]
    ///Returns prefix offset to split empty parent block by
    pub const fn split_empty_root(&self) -> u8 {
        self.split_empty_root
    }
}

impl Default for Options {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

///Computes free blocks of `parent` that are not covered by `taken`
///
///Only taken blocks entirely contained in `parent` are considered.
///Blocks crossing `parent` boundary are discarded rather than clipped.
///
///Result is ordered by address.
pub fn free_blocks<A: NetworkAddress>(parent: Cidr<A>, taken: impl IntoIterator<Item = Cidr<A>>, options: &Options) -> Vec<Cidr<A>> {
    let mut taken: Vec<_> = taken.into_iter().filter(|block| parent.contains_block(block)).collect();
    let minimum_prefix = options.minimum_prefix_length(A::FAMILY);

    if taken.is_empty() {
        return match options.split_empty_root() {
            0 => vec![parent],
            offset => {
                let prefix = parent.prefix().saturating_add(offset).max(minimum_prefix);
                parent.sub_blocks(prefix).collect()
            }
        };
    }

    range::sort_and_dedup(&mut taken);
    let floor = parent.prefix().max(minimum_prefix);
    range::free_ranges(&parent, &taken)
        .into_iter()
        .flat_map(|free| {
            tracing::trace!(range = %free, floor, "decomposing free range");
            free.aligned_blocks(floor)
        })
        .collect()
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
///Calculator of free blocks over textual input
pub struct BlockCalculator {
    options: Options,
}

impl BlockCalculator {
    #[inline]
    ///Creates calculator with default options
    pub const fn new() -> Self {
        Self::with_options(Options::new())
    }

    #[inline(always)]
    ///Creates calculator with provided `options`
    pub const fn with_options(options: Options) -> Self {
        Self {
            options,
        }
    }

    #[inline(always)]
    ///Returns options
    pub const fn options(&self) -> Options {
        self.options
    }

    #[inline]
    ///Returns calculator with modified minimum prefix length, see [Options](struct.Options.html#method.with_minimum_prefix_length)
    pub fn with_minimum_prefix_length(&self, ipv4: u8, ipv6: u8) -> Result<Self, Error> {
        self.options.with_minimum_prefix_length(ipv4, ipv6).map(Self::with_options)
    }

    #[inline]
    ///Returns calculator with modified split offset, see [Options](struct.Options.html#method.with_split_empty_root)
    pub const fn with_split_empty_root(&self, offset: u8) -> Self {
        Self::with_options(self.options.with_split_empty_root(offset))
    }

    ///Computes ordered list of free blocks in CIDR notation
    ///
    ///`parent` must be in CIDR notation, while `taken` entries without prefix are single addresses.
    ///Family of `parent` is determined by presence of `:` and every `taken` entry must be of the same family.
    ///
    ///Taken blocks that only partially overlap `parent` are ignored, they are not clipped to `parent`.
    ///
    ///Any invalid entry fails the whole calculation
    pub fn compute<T: AsRef<str>>(&self, parent: &str, taken: &[T]) -> Result<Vec<String>, Error> {
        let blocks = self.compute_blocks(parent, taken)?;
        Ok(blocks.iter().map(ToString::to_string).collect())
    }

    ///Computes ordered list of free blocks, see [compute](#method.compute)
    pub fn compute_blocks<T: AsRef<str>>(&self, parent: &str, taken: &[T]) -> Result<Vec<crate::Cidr>, Error> {
        match Family::detect(parent) {
            Family::V4 => {
                let blocks = self.compute_family::<net::Ipv4Addr, T>(parent, taken)?;
                Ok(blocks.into_iter().map(crate::Cidr::V4).collect())
            }
            Family::V6 => {
                let blocks = self.compute_family::<net::Ipv6Addr, T>(parent, taken)?;
                Ok(blocks.into_iter().map(crate::Cidr::V6).collect())
            }
        }
    }

    fn compute_family<A: NetworkAddress, T: AsRef<str>>(&self, parent: &str, taken: &[T]) -> Result<Vec<Cidr<A>>, Error> {
        let parent = parser::parse_block::<A>(parent, true)?;
        let taken = taken
            .iter()
            .map(|text| parser::parse_block::<A>(text.as_ref(), false))
            .collect::<Result<Vec<_>, _>>()?;

        let family = A::FAMILY;
        tracing::debug!(parent = %parent, family = %family, taken = taken.len(), "computing free blocks");
        let blocks = free_blocks(parent, taken, &self.options);
        tracing::debug!(parent = %parent, free = blocks.len(), "computed free blocks");
        Ok(blocks)
    }
}
