//!IPv6 module

use core::net;

crate::base::impl_base_methods!(net::Ipv6Addr where REPR=u128, FAMILY=V6);
