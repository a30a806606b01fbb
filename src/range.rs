//! Address range arithmetic
//!
//!Free space of the parent block is described as list of inclusive ranges,
//!which are then decomposed into aligned CIDR blocks.

use core::{fmt, marker};

use crate::base::{Cidr, NetworkAddress};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
///Inclusive range of addresses `[start, end]` of single family
pub struct AddrRange<A> {
    start: u128,
    end: u128,
    _family: marker::PhantomData<A>,
}

impl<A: NetworkAddress> AddrRange<A> {
    #[inline]
    ///Creates new range
    ///
    ///Returns `None` if `start` is greater than `end`
    pub fn new(start: A, end: A) -> Option<Self> {
        if start > end {
            None
        } else {
            Some(Self::from_bits(start.to_u128(), end.to_u128()))
        }
    }

    #[inline(always)]
    //`start` must not be greater than `end`
    pub(crate) fn from_bits(start: u128, end: u128) -> Self {
        Self {
            start,
            end,
            _family: marker::PhantomData,
        }
    }

    #[inline(always)]
    ///Returns first address of the range
    pub fn start(&self) -> A {
        A::from_u128(self.start)
    }

    #[inline(always)]
    ///Returns last address of the range
    pub fn end(&self) -> A {
        A::from_u128(self.end)
    }

    #[inline]
    ///Checks if every address of `block` is within the range
    pub fn contains_block(&self, block: &Cidr<A>) -> bool {
        self.start <= block.first() && block.last() <= self.end
    }

    #[inline]
    ///Decomposes range into the minimal number of aligned blocks with prefix no less than `floor`
    pub fn aligned_blocks(&self, floor: u8) -> AlignedBlocks<A> {
        AlignedBlocks {
            cursor: Some(self.start),
            range: *self,
            floor: floor.min(A::BITS_LEN),
        }
    }
}

impl<A: NetworkAddress> From<Cidr<A>> for AddrRange<A> {
    #[inline(always)]
    fn from(block: Cidr<A>) -> Self {
        Self::from_bits(block.first(), block.last())
    }
}

impl<A: NetworkAddress> fmt::Display for AddrRange<A> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_fmt(format_args!("{}-{}", self.start(), self.end()))
    }
}

#[derive(Clone, Debug)]
///Greedy decomposition of [AddrRange](struct.AddrRange.html) into aligned blocks, ordered by address
///
///Each step emits the broadest block that starts at the cursor and does not overrun the range end,
///but never broader than `floor` prefix.
pub struct AlignedBlocks<A> {
    cursor: Option<u128>,
    range: AddrRange<A>,
    floor: u8,
}

impl<A: NetworkAddress> Iterator for AlignedBlocks<A> {
    type Item = Cidr<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        //Single address block always qualifies, hence search cannot fail while cursor is within range
        let block = (self.floor..=A::BITS_LEN).find_map(|prefix| {
            let block = Cidr::from_bits(cursor, prefix);
            (block.first() == cursor && self.range.contains_block(&block)).then_some(block)
        })?;

        let last = block.last();
        self.cursor = if last >= self.range.end {
            None
        } else {
            Some(last + 1)
        };
        Some(block)
    }
}

impl<A: NetworkAddress> core::iter::FusedIterator for AlignedBlocks<A> {}

///Sorts blocks by network address, broader block first, and keeps only the broadest block per network address
pub fn sort_and_dedup<A: NetworkAddress>(blocks: &mut Vec<Cidr<A>>) {
    blocks.sort_unstable();
    blocks.dedup_by(|block, kept| block.network_addr() == kept.network_addr());
}

///Computes ranges of `parent` that are not covered by `taken`
///
///`taken` must be sorted with [sort_and_dedup](fn.sort_and_dedup.html).
///Blocks that do not overlap `parent` are skipped.
pub fn free_ranges<A: NetworkAddress>(parent: &Cidr<A>, taken: &[Cidr<A>]) -> Vec<AddrRange<A>> {
    let mut ranges = Vec::new();
    //Highest address covered by already visited blocks
    let mut covered: Option<u128> = None;
    let mut blocks = taken.iter().filter(|block| parent.overlaps(block)).peekable();

    while let Some(block) = blocks.next() {
        let last = match covered {
            None => {
                if block.first() > parent.first() {
                    ranges.push(AddrRange::from_bits(parent.first(), block.first() - 1));
                }
                block.last()
            }
            Some(covered) => covered.max(block.last()),
        };
        covered = Some(last);

        let upper = match blocks.peek() {
            Some(next) => parent.last().min(next.first().saturating_sub(1)),
            None => parent.last(),
        };
        if last < upper {
            ranges.push(AddrRange::from_bits(last + 1, upper));
        }
    }

    if covered.is_none() {
        ranges.push(AddrRange::from(*parent));
    }

    ranges
}
