//! Base module

use core::{fmt, hash, marker, net};

use crate::Family;

///Network address trait
///
///Block arithmetic is performed on `u128`, IPv4 address occupies its lowest 32 bits
pub trait NetworkAddress: Clone + Copy + fmt::Debug + fmt::Display + PartialEq + Eq + PartialOrd + Ord + hash::Hash {
    ///Max possible length of the address in bits
    const BITS_LEN: u8;
    ///Family of the address
    const FAMILY: Family;

    ///Returns numeric value of the address
    fn to_u128(self) -> u128;
    ///Creates address from numeric value, discarding bits above `BITS_LEN`
    fn from_u128(bits: u128) -> Self;
    ///Extracts address if `addr` belongs to the same family
    fn from_ip(addr: net::IpAddr) -> Option<Self>;
}

#[inline]
///Returns bits of address `A` that are not covered by `prefix`
pub fn host_mask<A: NetworkAddress>(prefix: u8) -> u128 {
    if prefix >= A::BITS_LEN {
        0
    } else {
        (u128::MAX >> (u128::BITS - A::BITS_LEN as u32)) >> prefix
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///CIDR block of single address family
///
///Address is always network address of the block, hence ordering is by network address first and by prefix second
pub struct Cidr<A> {
    addr: A,
    prefix: u8,
}

impl<A: NetworkAddress> Cidr<A> {
    #[inline]
    ///Constructs new CIDR verifying that `prefix` fits provided `addr`
    ///
    ///Address is masked down to network address of the block.
    ///
    ///Returns `None` if `prefix` is greater than address length
    pub fn new(addr: A, prefix: u8) -> Option<Self> {
        if prefix > A::BITS_LEN {
            None
        } else {
            Some(Self::from_bits(addr.to_u128(), prefix))
        }
    }

    #[inline(always)]
    ///Constructs CIDR block of the single address
    pub fn new_single(addr: A) -> Self {
        Self {
            addr,
            prefix: A::BITS_LEN,
        }
    }

    #[inline]
    //`prefix` must not exceed `A::BITS_LEN`
    pub(crate) fn from_bits(bits: u128, prefix: u8) -> Self {
        Self {
            addr: A::from_u128(bits & !host_mask::<A>(prefix)),
            prefix,
        }
    }

    #[inline(always)]
    ///Returns address
    pub const fn addr(&self) -> A {
        self.addr
    }

    #[inline(always)]
    ///Returns prefix
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    #[inline(always)]
    ///Returns family of the block
    pub fn family(&self) -> Family {
        A::FAMILY
    }

    #[inline(always)]
    ///Returns network address, which is lowest possible address within CIDR block
    pub fn network_addr(&self) -> A {
        self.addr
    }

    #[inline(always)]
    ///Returns broadcast address, which is highest possible address within CIDR block
    pub fn broadcast_addr(&self) -> A {
        A::from_u128(self.last())
    }

    #[inline(always)]
    pub(crate) fn first(&self) -> u128 {
        self.addr.to_u128()
    }

    #[inline(always)]
    pub(crate) fn last(&self) -> u128 {
        self.addr.to_u128() | host_mask::<A>(self.prefix)
    }

    #[inline]
    ///Returns number of addresses within the block
    ///
    ///IPv6 `/0` block saturates to `u128::MAX`
    pub fn size(&self) -> u128 {
        let host_bits = u32::from(A::BITS_LEN - self.prefix);
        if host_bits >= u128::BITS {
            u128::MAX
        } else {
            1 << host_bits
        }
    }

    #[inline]
    ///Checks if a given `addr` is contained within `self`
    pub fn contains(&self, addr: A) -> bool {
        let addr = addr.to_u128();
        self.first() <= addr && addr <= self.last()
    }

    #[inline]
    ///Checks if every address of `other` is contained within `self`
    pub fn contains_block(&self, other: &Self) -> bool {
        self.first() <= other.first() && other.last() <= self.last()
    }

    #[inline]
    ///Checks if `self` and `other` share at least one address
    pub fn overlaps(&self, other: &Self) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }

    #[inline]
    ///Returns iterator over consecutive blocks of `prefix` that cover `self`
    ///
    ///`prefix` is bounded by `self.prefix()` from below and by address length from above
    pub fn sub_blocks(&self, prefix: u8) -> SubBlocks<A> {
        SubBlocks {
            cursor: Some(self.first()),
            end: self.last(),
            prefix: prefix.clamp(self.prefix, A::BITS_LEN),
            _family: marker::PhantomData,
        }
    }
}

impl<A: NetworkAddress> fmt::Display for Cidr<A> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { addr, prefix } = self;
        fmt.write_fmt(format_args!("{addr}/{prefix}"))
    }
}

#[derive(Clone, Debug)]
///Iterator over equal sized sibling blocks, see [Cidr::sub_blocks](struct.Cidr.html#method.sub_blocks)
pub struct SubBlocks<A> {
    cursor: Option<u128>,
    end: u128,
    prefix: u8,
    _family: marker::PhantomData<A>,
}

impl<A: NetworkAddress> Iterator for SubBlocks<A> {
    type Item = Cidr<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = Cidr::from_bits(self.cursor?, self.prefix);
        let last = block.last();
        self.cursor = if last >= self.end {
            None
        } else {
            Some(last + 1)
        };
        Some(block)
    }
}

impl<A: NetworkAddress> core::iter::FusedIterator for SubBlocks<A> {}

macro_rules! impl_base_methods {
    ($typ:ty where REPR=$repr:ident, FAMILY=$family:ident) => {
        pub(crate) const BITS_LEN: u8 = <$typ>::BITS as u8;

        ///CIDR block of the family
        pub type Cidr = $crate::base::Cidr<$typ>;

        impl $crate::base::NetworkAddress for $typ {
            const BITS_LEN: u8 = BITS_LEN;
            const FAMILY: $crate::Family = $crate::Family::$family;

            #[inline(always)]
            fn to_u128(self) -> u128 {
                u128::from(self.to_bits())
            }

            #[inline(always)]
            fn from_u128(bits: u128) -> Self {
                <$typ>::from_bits(bits as $repr)
            }

            #[inline(always)]
            fn from_ip(addr: core::net::IpAddr) -> Option<Self> {
                match addr {
                    core::net::IpAddr::$family(addr) => Some(addr),
                    _ => None,
                }
            }
        }
    }
}

pub(super) use impl_base_methods;
