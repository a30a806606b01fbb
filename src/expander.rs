//! IP range pattern expander
//!
//!Pattern is a literal text with bracket groups `[item(,item)*]`, where `item` is either a token or `low-high` range.
//!Tokens are decimal numbers up to 3 digits for IPv4 and lowercase hexadecimal numbers up to 4 digits for IPv6.
//!Brackets with content that doesn't fit this syntax are kept as they are.
//!
//!## Usage
//!
//!```rust
//!let addrs: Vec<String> = ip_blocks::expand("192.0.2.[1,2,100-102]/24", None).collect();
//!assert_eq!(addrs, ["192.0.2.1/24", "192.0.2.2/24", "192.0.2.100/24", "192.0.2.101/24", "192.0.2.102/24"]);
//!
//!let addrs: Vec<String> = ip_blocks::expand("2001:db8:0:[0,fd-ff]::/64", None).collect();
//!assert_eq!(addrs, ["2001:db8:0:0::/64", "2001:db8:0:fd::/64", "2001:db8:0:fe::/64", "2001:db8:0:ff::/64"]);
//!```

use core::iter;

use crate::{Error, Family};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Item<'a> {
    //Kept as written
    Token(&'a str),
    //Inclusive, descending when `low > high`
    Span { low: u32, high: u32 },
}

impl Item<'_> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Self::Token(_) => 1,
            Self::Span { low, high } => low.abs_diff(*high) as usize + 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Group<'a> {
    items: Vec<Item<'a>>,
}

impl Group<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.items.iter().map(Item::len).sum()
    }

    fn write_value(&self, mut idx: usize, family: Family, out: &mut String) {
        for item in &self.items {
            let len = item.len();
            if idx >= len {
                idx -= len;
                continue;
            }

            match item {
                Item::Token(token) => out.push_str(token),
                Item::Span { low, high } => {
                    let step = idx as u32;
                    let value = if low <= high { low + step } else { low - step };
                    match family {
                        Family::V4 => out.push_str(&value.to_string()),
                        Family::V6 => out.push_str(&format!("{value:x}")),
                    }
                }
            }
            return;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Group(Group<'a>),
}

fn parse_token(token: &str, family: Family) -> Option<u32> {
    let (max_len, radix) = match family {
        Family::V4 => (3, 10),
        Family::V6 => (4, 16),
    };
    let is_digit = |ch: u8| match family {
        Family::V4 => ch.is_ascii_digit(),
        Family::V6 => ch.is_ascii_digit() || (b'a'..=b'f').contains(&ch),
    };

    if (1..=max_len).contains(&token.len()) && token.bytes().all(is_digit) {
        u32::from_str_radix(token, radix).ok()
    } else {
        None
    }
}

//Group requires at least two tokens
fn parse_group(content: &str, family: Family) -> Option<Group<'_>> {
    if !content.contains([',', '-']) {
        return None;
    }

    let items = content
        .split(',')
        .map(|item| match item.split_once('-') {
            Some((low, high)) => Some(Item::Span {
                low: parse_token(low, family)?,
                high: parse_token(high, family)?,
            }),
            None => parse_token(item, family).map(|_| Item::Token(item)),
        })
        .collect::<Option<Vec<_>>>()?;

    Some(Group { items })
}

fn parse_pattern(pattern: &str, family: Family) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut search = 0;

    while let Some(open) = pattern[search..].find('[').map(|pos| search + pos) {
        let content_start = open + 1;
        let group = pattern[content_start..].find(']').and_then(|len| {
            let content_end = content_start + len;
            parse_group(&pattern[content_start..content_end], family).map(|group| (group, content_end + 1))
        });

        match group {
            Some((group, group_end)) => {
                if literal_start < open {
                    segments.push(Segment::Literal(&pattern[literal_start..open]));
                }
                segments.push(Segment::Group(group));
                literal_start = group_end;
                search = group_end;
            }
            None => search = content_start,
        }
    }

    if literal_start < pattern.len() {
        segments.push(Segment::Literal(&pattern[literal_start..]));
    }

    segments
}

#[inline]
///Infers family of the `pattern`
///
///Pattern without `.` that contains hexadecimal group is IPv6, otherwise IPv4
pub fn infer_family(pattern: &str) -> Family {
    let is_v6 = !pattern.contains('.') && parse_pattern(pattern, Family::V6).iter().any(|segment| matches!(segment, Segment::Group(_)));
    if is_v6 {
        Family::V6
    } else {
        Family::V4
    }
}

#[derive(Clone, Debug)]
///Lazy expansion of the pattern, see [expand](fn.expand.html)
pub struct Expansion<'a> {
    family: Family,
    segments: Vec<Segment<'a>>,
    //Length of each group in order of appearance
    lens: Vec<usize>,
    //Value index of each group, `None` once exhausted
    cursor: Option<Vec<usize>>,
}

impl Expansion<'_> {
    #[inline(always)]
    ///Returns family the pattern is expanded with
    pub fn family(&self) -> Family {
        self.family
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.cursor.as_mut()?;

        let mut result = String::new();
        let mut positions = indices.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Group(group) => {
                    if let Some(&idx) = positions.next() {
                        group.write_value(idx, self.family, &mut result);
                    }
                }
            }
        }

        //Last group varies fastest
        let mut is_exhausted = true;
        for (idx, len) in indices.iter_mut().zip(&self.lens).rev() {
            *idx += 1;
            if *idx < *len {
                is_exhausted = false;
                break;
            }
            *idx = 0;
        }
        if is_exhausted {
            self.cursor = None;
        }

        Some(result)
    }
}

impl iter::FusedIterator for Expansion<'_> {}

///Expands `pattern` into every address it denotes
///
///Groups are expanded left to right with the first group varying slowest.
///Range bounds are inclusive and values are written in family's base, while single tokens are kept as written.
///Pattern without groups is returned as it is.
///
///When `family` is not specified, it is inferred with [infer_family](fn.infer_family.html)
pub fn expand(pattern: &str, family: Option<Family>) -> Expansion<'_> {
    let family = match family {
        Some(family) => family,
        None => {
            let family = infer_family(pattern);
            tracing::trace!(pattern, family = %family, "inferred pattern family");
            family
        }
    };

    let segments = parse_pattern(pattern, family);
    let lens: Vec<usize> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Group(group) => Some(group.len()),
            Segment::Literal(_) => None,
        })
        .collect();

    Expansion {
        family,
        cursor: Some(vec![0; lens.len()]),
        segments,
        lens,
    }
}

#[derive(Clone, Debug)]
enum VersionedState<'a> {
    Expanding(Expansion<'a>),
    Failed(Option<Error>),
}

#[derive(Clone, Debug)]
///Expansion with numeric IP version, see [expand_version](fn.expand_version.html)
pub struct VersionedExpansion<'a> {
    state: VersionedState<'a>,
}

impl Iterator for VersionedExpansion<'_> {
    type Item = Result<String, Error>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            VersionedState::Expanding(expansion) => expansion.next().map(Ok),
            VersionedState::Failed(error) => error.take().map(Err),
        }
    }
}

impl iter::FusedIterator for VersionedExpansion<'_> {}

///Expands `pattern` with numeric IP `version`, which must be either `4` or `6`
///
///Invalid version is reported as the first item, after which iteration stops
pub fn expand_version(pattern: &str, version: Option<u8>) -> VersionedExpansion<'_> {
    let state = match version.map(Family::from_version).transpose() {
        Ok(family) => VersionedState::Expanding(expand(pattern, family)),
        Err(error) => VersionedState::Failed(Some(error)),
    };

    VersionedExpansion {
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_group_items() {
        let group = parse_group("1,2,100-102", Family::V4).expect("valid group");
        assert_eq!(group.items, [Item::Token("1"), Item::Token("2"), Item::Span { low: 100, high: 102 }]);
        assert_eq!(group.len(), 5);

        let group = parse_group("0,fd-ff", Family::V6).expect("valid group");
        assert_eq!(group.items, [Item::Token("0"), Item::Span { low: 0xfd, high: 0xff }]);
    }

    #[test]
    fn should_reject_invalid_group() {
        let inputs = ["1", "", "1,", ",1", "1,,2", "1--2", "1-2-3", "1,1000", "a,b", "1, 2"];
        for content in inputs {
            assert_eq!(parse_group(content, Family::V4), None, "'{content}' must not be group");
        }

        let inputs = ["ffff0,1", "A,B", "g-h", "fff"];
        for content in inputs {
            assert_eq!(parse_group(content, Family::V6), None, "'{content}' must not be group");
        }
    }

    #[test]
    fn should_split_pattern_into_segments() {
        let segments = parse_pattern("a[1,2]b[x][3-4]", Family::V4);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::Literal("a"));
        assert!(matches!(segments[1], Segment::Group(_)));
        assert_eq!(segments[2], Segment::Literal("b[x]"));
        assert!(matches!(segments[3], Segment::Group(_)));

        let segments = parse_pattern("[[1,2]", Family::V4);
        assert_eq!(segments[0], Segment::Literal("["));
        assert!(matches!(segments[1], Segment::Group(_)));
    }

    #[test]
    fn should_write_descending_span() {
        let group = Group {
            items: vec![Item::Span { low: 3, high: 1 }],
        };
        let values: Vec<String> = (0..group.len())
            .map(|idx| {
                let mut out = String::new();
                group.write_value(idx, Family::V4, &mut out);
                out
            })
            .collect();
        assert_eq!(values, ["3", "2", "1"]);
    }
}
