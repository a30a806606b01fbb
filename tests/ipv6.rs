use core::net;

use ip_blocks::{v6, Error, Family};

const MAX: u16 = u16::MAX;

#[test]
fn should_verify_v6_prefix_size() {
    let addr = net::Ipv6Addr::UNSPECIFIED;

    let cidr = v6::Cidr::new(addr, 0).expect("to create");
    //Saturates as whole space doesn't fit u128
    assert_eq!(cidr.size(), u128::MAX, "/0 has invalid size");
    assert_eq!(cidr.broadcast_addr(), net::Ipv6Addr::new(MAX, MAX, MAX, MAX, MAX, MAX, MAX, MAX));

    for prefix in 1..=128 {
        let cidr = v6::Cidr::new(addr, prefix).expect("to create");
        let expected_size = 2u128.pow((128 - prefix) as _);
        assert_eq!(cidr.size(), expected_size, "/{} has invalid size", prefix);

        let last = net::Ipv6Addr::from_bits(expected_size - 1);
        assert!(cidr.contains(addr), "{} is not contained in cidr={}", addr, cidr);
        assert!(cidr.contains(last), "{} is not contained in cidr={}", last, cidr);
        assert!(!cidr.contains(net::Ipv6Addr::from_bits(expected_size)));
    }

    assert!(v6::Cidr::new(addr, 129).is_none());
}

#[test]
fn should_mask_v6_network() {
    let addr = net::Ipv6Addr::new(0x2a0d, 0x7c40, 0x1001, 0, 0x0100, 0, 0, 1);
    let cidr = v6::Cidr::new(addr, 80).expect("to create");
    assert_eq!(cidr.addr(), net::Ipv6Addr::new(0x2a0d, 0x7c40, 0x1001, 0, 0x0100, 0, 0, 0));
    assert_eq!(cidr.network_addr(), cidr.addr());
    assert_eq!(cidr.broadcast_addr(), net::Ipv6Addr::new(0x2a0d, 0x7c40, 0x1001, 0, 0x0100, MAX, MAX, MAX));
    assert_eq!(cidr.family(), Family::V6);
    assert_eq!(cidr.to_string(), "2a0d:7c40:1001:0:100::/80");

    let cidr = v6::Cidr::new(addr, 64).expect("to create");
    assert_eq!(cidr.network_addr(), net::Ipv6Addr::new(0x2a0d, 0x7c40, 0x1001, 0, 0, 0, 0, 0));
    assert_eq!(cidr.broadcast_addr(), net::Ipv6Addr::new(0x2a0d, 0x7c40, 0x1001, 0, MAX, MAX, MAX, MAX));
}

#[test]
fn should_split_v6_block_into_sub_blocks() {
    let cidr = v6::Cidr::new(net::Ipv6Addr::new(0x2a02, 0xb48, 0, 0, 0, 0, 0, 0), 29).expect("to create");
    let blocks: Vec<String> = cidr.sub_blocks(31).map(|block| block.to_string()).collect();
    assert_eq!(blocks, ["2a02:b48::/31", "2a02:b4a::/31", "2a02:b4c::/31", "2a02:b4e::/31"]);

    let cidr = v6::Cidr::new(net::Ipv6Addr::new(MAX, MAX, MAX, MAX, MAX, MAX, MAX, MAX), 127).expect("to create");
    let blocks: Vec<String> = cidr.sub_blocks(128).map(|block| block.to_string()).collect();
    assert_eq!(blocks, ["ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe/128", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/128"]);
}

#[test]
fn should_parse_v6_cidr() {
    let inputs = [
        ("::", "::/128"),
        ("::/0", "::/0"),
        ("2a02:b48::/29", "2a02:b48::/29"),
        ("2A02:0B48:0000::1/64", "2a02:b48::/64"),
        ("2a0d:7c40:1001:0:0100::", "2a0d:7c40:1001:0:100::/128"),
        ("cafe:babe::1/64", "cafe:babe::/64"),
    ];

    for (text, expected) in inputs {
        let cidr = match ip_blocks::parse_cidr(text) {
            Ok(cidr) => cidr,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(cidr.family(), Family::V6);
        assert_eq!(cidr.to_string(), expected);
    }
}

#[test]
fn should_not_parse_v6_cidr() {
    let inputs = [
        ("1::2::3/64", Error::MalformedAddress { address: "1::2::3".to_owned() }),
        ("12345::/64", Error::MalformedAddress { address: "12345::".to_owned() }),
        (":", Error::MalformedAddress { address: ":".to_owned() }),
        ("::/129", Error::InvalidPrefix { cidr: "::/129".to_owned(), prefix: "129".to_owned() }),
    ];

    for (text, expected_error) in inputs {
        println!("Parse '{text}'");
        let error = ip_blocks::parse_cidr(text).expect_err("should fail");
        assert_eq!(error, expected_error);
    }

    let error = ip_blocks::parse_block::<net::Ipv6Addr>("127.0.0.1/32", false).expect_err("should fail");
    assert_eq!(error, Error::FamilyMismatch { cidr: "127.0.0.1/32".to_owned(), expected: Family::V6 });
}
